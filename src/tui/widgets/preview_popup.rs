//! Full-screen preview of the current attachment.
//!
//! PDFs show the session readout (page, zoom, viewport, render sequence);
//! images show their metadata; anything else gets the placeholder.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::{centered_rect, format_size, truncate_str};
use crate::i18n;
use crate::media::MediaKind;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};
use crate::viewer::{PdfView, ViewerSnapshot};

/// Render the preview popup.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let snap = &app.snapshot;
    let area = centered_rect(90, 85, frame.area());

    frame.render_widget(Clear, area);

    let title = match snap.current() {
        Some(att) => format!(
            " {} ",
            truncate_str(att.display_name(), area.width.saturating_sub(8) as usize)
        ),
        None => i18n::tui_preview_title().to_string(),
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(Span::styled(title, theme.popup_title))
        .style(theme.popup);
    if let Some(label) = snap.page_label() {
        let overlay = Line::from(Span::styled(format!(" {label} "), theme.page_overlay));
        block = block.title_top(overlay.right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    match snap.media {
        Some(MediaKind::Pdf) => pdf_lines(&mut lines, snap, &theme),
        Some(MediaKind::Image) => image_lines(&mut lines, snap, &theme),
        Some(MediaKind::Unsupported) => placeholder_lines(&mut lines, snap, &theme),
        None => {}
    }

    if let Some(caption) = snap.caption() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(caption.to_string(), theme.caption)));
    }

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn field(theme: &Theme, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label),
        Span::styled(value, theme.value),
    ])
}

fn pdf_lines(lines: &mut Vec<Line<'static>>, snap: &ViewerSnapshot, theme: &Theme) {
    match &snap.pdf {
        PdfView::Inactive | PdfView::Loading => {
            lines.push(Line::from(Span::styled(i18n::tui_pdf_loading(), theme.help_dim)));
        }
        PdfView::Ready(page) => {
            lines.push(field(
                theme,
                i18n::tui_pdf_page(),
                format!("{} / {}", page.current_page, page.total_pages),
            ));
            lines.push(field(
                theme,
                i18n::tui_pdf_zoom(),
                format!("{:.0}%", page.zoom * 100.0),
            ));
            lines.push(field(
                theme,
                i18n::tui_pdf_viewport(),
                format!("{} x {} px", page.viewport.width, page.viewport.height),
            ));
            lines.push(field(theme, i18n::tui_pdf_render(), format!("#{}", page.render_seq)));
        }
        PdfView::Failed { message } => {
            lines.push(Line::from(Span::styled(i18n::tui_pdf_failed(), theme.error)));
            lines.push(Line::from(Span::styled(message.clone(), theme.help_dim)));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(i18n::tui_pdf_retry(), theme.key_hint)));
        }
    }
}

fn image_lines(lines: &mut Vec<Line<'static>>, snap: &ViewerSnapshot, theme: &Theme) {
    let Some(att) = snap.current() else { return };
    lines.push(Line::from(Span::styled(i18n::tui_image(), theme.slide_title)));
    lines.push(Line::from(""));
    lines.push(field(theme, i18n::tui_col_type(), att.mime_type.clone()));
    lines.push(field(theme, i18n::tui_col_size(), format_size(att.estimated_size())));
    lines.push(field(theme, i18n::tui_col_filename(), att.suggested_filename()));
}

fn placeholder_lines(lines: &mut Vec<Line<'static>>, snap: &ViewerSnapshot, theme: &Theme) {
    lines.push(Line::from(Span::styled(i18n::tui_unsupported(), theme.warning)));
    if let Some(att) = snap.current() {
        lines.push(Line::from(Span::styled(att.mime_type.clone(), theme.help_dim)));
    }
    if let Some(icon) = &snap.placeholder {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[{} \u{b7} {}]", i18n::tui_placeholder_icon(), format_size(icon.len() as u64)),
            theme.help_dim,
        )));
    }
}
