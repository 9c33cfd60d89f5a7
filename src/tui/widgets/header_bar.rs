//! Top header bar showing the record, attachment count and load state.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;
use crate::viewer::LoadState;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let snap = &app.snapshot;

    let mut spans = vec![
        Span::styled(format!(" {}", i18n::app_name()), theme.header_bar),
        Span::styled(format!(" | {}", app.record_name), theme.header_bar),
    ];

    match &snap.load {
        LoadState::Loading => {
            spans.push(Span::styled(format!(" | {}", i18n::tui_loading()), theme.header_bar));
        }
        LoadState::Ready => {
            spans.push(Span::styled(
                format!(" | {} {}", snap.len(), i18n::msg_attachments()),
                theme.header_bar,
            ));
        }
        LoadState::Failed { .. } => {
            spans.push(Span::styled(
                format!(" | {}", i18n::err_fetch_failed()),
                theme.error,
            ));
        }
    }

    if snap.stale {
        spans.push(Span::styled(format!(" | {}", i18n::tui_stale()), theme.warning));
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.width()).sum();
    let right_text = i18n::tui_help_hint();
    let width = area.width as usize;
    if width > left_len + right_text.width() {
        let padding = width - left_len - right_text.width();
        spans.push(Span::styled(" ".repeat(padding), theme.header_bar));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
