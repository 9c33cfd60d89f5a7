//! Bottom status bar showing transient messages or context-sensitive keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::media::MediaKind;
use crate::tui::app::App;
use crate::tui::theme::current_theme;
use crate::viewer::{ModalState, PdfView};

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the status bar at the bottom with context-sensitive hints and version.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let version_text = format!("v{VERSION} ");
    let version_width = version_text.len() as u16;

    // Split: hints (flexible) | version (fixed)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(version_width)])
        .split(area);

    let content = if let Some((msg, _)) = &app.status_message {
        Line::from(Span::styled(format!(" {msg}"), theme.status_bar))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.key_hint));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Return hint pairs (key, description) for the current dialog state.
fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let snap = &app.snapshot;
    let mut hints = Vec::new();

    match snap.modal {
        ModalState::Closed => {
            if !snap.is_empty() {
                hints.push(("\u{2190}/\u{2192}", i18n::tui_hint_nav()));
                hints.push(("Enter", i18n::tui_hint_open()));
                hints.push(("d", i18n::tui_hint_download()));
            }
            hints.push(("r", i18n::tui_hint_refresh()));
            hints.push(("?", i18n::tui_hint_help()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
        ModalState::PreviewOpen => {
            hints.push(("\u{2190}/\u{2192}", i18n::tui_hint_nav()));
            if snap.media == Some(MediaKind::Pdf) {
                hints.push(("PgUp/PgDn", i18n::tui_hint_page()));
                hints.push(("+/-", i18n::tui_hint_zoom()));
                if matches!(snap.pdf, PdfView::Failed { .. }) {
                    hints.push(("R", i18n::tui_hint_retry()));
                }
            }
            hints.push(("d", i18n::tui_hint_download()));
            if snap.settings.allow_delete {
                hints.push(("x", i18n::tui_hint_delete()));
            }
            hints.push(("Esc", i18n::tui_hint_close()));
        }
        ModalState::ConfirmDelete => {
            hints.push(("y", i18n::tui_hint_confirm()));
            hints.push(("n", i18n::tui_hint_cancel()));
        }
    }

    hints
}
