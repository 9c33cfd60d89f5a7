//! Thumbnail strip: one cell per attachment, the current one highlighted.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::truncate_str;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Width of one thumbnail cell, separator included.
const CELL_WIDTH: usize = 18;

/// Render the thumbnail strip.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let snap = &app.snapshot;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_thumbnails_title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let per_page = (inner.width as usize / CELL_WIDTH).max(1);
    let current = snap.current_index.unwrap_or(0);
    let start = (current / per_page) * per_page;
    let end = (start + per_page).min(snap.len());

    let mut names = Vec::new();
    let mut kinds = Vec::new();
    for (i, att) in snap.attachments[start..end].iter().enumerate() {
        let index = start + i;
        let style = if Some(index) == snap.current_index {
            theme.thumb_selected
        } else {
            theme.thumb_normal
        };
        let name = truncate_str(
            &format!("{} {}", index + 1, att.display_name()),
            CELL_WIDTH - 2,
        );
        names.push(Span::styled(format!(" {name:<w$}", w = CELL_WIDTH - 2), style));
        names.push(Span::raw(" "));
        kinds.push(Span::styled(
            format!(" {:<w$}", att.kind().label(), w = CELL_WIDTH - 2),
            theme.help_dim,
        ));
        kinds.push(Span::raw(" "));
    }

    let para = Paragraph::new(vec![Line::from(names), Line::from(kinds)]);
    frame.render_widget(para, inner);
}
