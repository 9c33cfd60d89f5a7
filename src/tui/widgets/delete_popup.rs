//! Delete confirmation dialog, stacked on the preview.

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::{centered_rect_exact, truncate_str};
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the confirmation dialog centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let area = centered_rect_exact(48, 7, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error)
        .title(Span::styled(i18n::tui_delete_title(), theme.error))
        .style(theme.popup);

    let name = app
        .snapshot
        .current()
        .map(|a| truncate_str(a.display_name(), area.width.saturating_sub(4) as usize))
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(i18n::tui_delete_question(), theme.value)),
        Line::from(Span::styled(name, theme.slide_title)),
        Line::from(""),
        Line::from(Span::styled(i18n::tui_delete_choices(), theme.key_hint)),
    ];

    let para = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(para, area);
}
