//! Primary slide: the current attachment with caption and "i / n" overlay.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::{format_size, truncate_str};
use crate::i18n;
use crate::media::MediaKind;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};
use crate::viewer::{LoadState, ViewerSnapshot};

/// Render the slide panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let snap = &app.snapshot;

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(i18n::tui_slide_title(), theme.slide_title));
    if let Some(label) = snap.page_label() {
        let overlay = Line::from(Span::styled(format!(" {label} "), theme.page_overlay));
        block = block.title_top(overlay.right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match snap.current() {
        Some(_) => slide_lines(snap, &theme, inner.width as usize),
        None => empty_lines(snap, &theme),
    };

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn slide_lines(snap: &ViewerSnapshot, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let Some(att) = snap.current() else {
        return Vec::new();
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            truncate_str(att.display_name(), width.saturating_sub(2)),
            theme.slide_title,
        )),
        Line::from(""),
    ];

    let kind = match att.kind() {
        MediaKind::Pdf => "PDF".to_string(),
        MediaKind::Image => i18n::tui_image().to_string(),
        MediaKind::Unsupported => i18n::tui_unsupported().to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", i18n::tui_col_type()), theme.label),
        Span::styled(format!("{kind} ({})", att.mime_type), theme.value),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", i18n::tui_col_size()), theme.label),
        Span::styled(format_size(att.estimated_size()), theme.value),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", i18n::tui_col_filename()), theme.label),
        Span::styled(att.suggested_filename(), theme.value),
    ]));

    if let Some(caption) = snap.caption() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(caption.to_string(), theme.caption)));
    }
    lines
}

fn empty_lines(snap: &ViewerSnapshot, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    match &snap.load {
        LoadState::Loading => {
            lines.push(Line::from(Span::styled(i18n::tui_loading(), theme.value)));
        }
        LoadState::Ready => {
            lines.push(Line::from(Span::styled(i18n::tui_no_attachments(), theme.value)));
        }
        LoadState::Failed { reason } => {
            lines.push(Line::from(Span::styled(i18n::err_fetch_failed(), theme.error)));
            lines.push(Line::from(Span::styled(reason.clone(), theme.help_dim)));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("r", theme.key_hint),
                Span::styled(format!(" {}", i18n::tui_hint_refresh()), theme.value),
            ]));
        }
    }
    lines
}
