//! Help popup showing keyboard shortcuts in multi-column layout.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::{centered_rect_exact, truncate_str};
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width of the key column.
const KEY_WIDTH: usize = 9;

/// A single shortcut entry.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

/// Render the help popup centered on screen with multi-column shortcuts.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = current_theme();
    let screen = frame.area();

    let popup_width = (screen.width * 78 / 100).min(screen.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2) as usize;

    let cols = if inner_width >= 90 {
        3
    } else if inner_width >= 56 {
        2
    } else {
        1
    };
    let col_width = inner_width / cols;
    let sep_width = inner_width.saturating_sub(2);

    let lines = build_lines(app, cols, col_width, sep_width, &theme);

    let content_height = lines.len() as u16 + 1;
    let popup_height = (content_height + 2).min(screen.height.saturating_sub(2));
    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn build_lines(
    app: &App,
    cols: usize,
    col_width: usize,
    sep_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("  {}", i18n::app_name()), theme.popup_title),
        Span::styled(format!("  v{VERSION}"), theme.help_dim),
    ]));
    lines.push(Line::from(Span::styled(
        format!("  {}", i18n::tui_help_description()),
        theme.help_dim,
    )));
    lines.push(Line::from(""));

    let sections: [(&str, Vec<Shortcut>); 4] = [
        (
            i18n::tui_help_navigation(),
            vec![
                Shortcut { key: "\u{2190} / \u{2192}", desc: i18n::tui_help_next_prev() },
                Shortcut { key: "h / l", desc: i18n::tui_help_next_prev() },
                Shortcut { key: "1-9", desc: i18n::tui_help_jump() },
                Shortcut { key: "g / G", desc: i18n::tui_help_first_last() },
            ],
        ),
        (i18n::tui_help_preview(), preview_shortcuts(app)),
        (
            i18n::tui_help_pdf(),
            vec![
                Shortcut { key: "PgDn/PgUp", desc: i18n::tui_help_page() },
                Shortcut { key: "g / G", desc: i18n::tui_help_first_last_page() },
                Shortcut { key: "+ / -", desc: i18n::tui_help_zoom() },
                Shortcut { key: "R", desc: i18n::tui_help_retry() },
            ],
        ),
        (
            i18n::tui_help_general(),
            vec![
                Shortcut { key: "r", desc: i18n::tui_help_refresh() },
                Shortcut { key: "?", desc: i18n::tui_help_help() },
                Shortcut { key: "q", desc: i18n::tui_help_quit() },
            ],
        ),
    ];

    for (title, shortcuts) in &sections {
        add_section_header(&mut lines, title, theme, sep_width);
        add_shortcuts_columns(&mut lines, shortcuts, cols, col_width, theme);
        lines.push(Line::from(""));
    }

    lines
}

fn preview_shortcuts(app: &App) -> Vec<Shortcut> {
    let mut shortcuts = vec![
        Shortcut { key: "Enter", desc: i18n::tui_help_open_preview() },
        Shortcut { key: "Esc", desc: i18n::tui_help_close() },
        Shortcut { key: "d", desc: i18n::tui_help_download() },
    ];
    if app.snapshot.settings.allow_delete {
        shortcuts.push(Shortcut { key: "x", desc: i18n::tui_help_delete() });
        shortcuts.push(Shortcut { key: "y / n", desc: i18n::tui_help_confirm() });
    }
    shortcuts
}

/// Add a section header with a trailing separator line.
fn add_section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme, width: usize) {
    let remaining = width.saturating_sub(title.width() + 4);
    lines.push(Line::from(vec![
        Span::styled(format!("  {title} "), theme.help_section),
        Span::styled("\u{2500}".repeat(remaining), theme.help_dim),
    ]));
}

/// Lay out shortcuts in N columns per row.
fn add_shortcuts_columns(
    lines: &mut Vec<Line<'static>>,
    shortcuts: &[Shortcut],
    cols: usize,
    col_width: usize,
    theme: &Theme,
) {
    for row in shortcuts.chunks(cols) {
        let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];
        for s in row {
            let desc = truncate_str(s.desc, col_width.saturating_sub(KEY_WIDTH + 3));
            let padding = col_width.saturating_sub(KEY_WIDTH + 1 + desc.width()).max(1);
            spans.push(Span::styled(format!("{:>KEY_WIDTH$}", s.key), theme.key_hint));
            spans.push(Span::styled(format!(" {desc}"), theme.popup));
            spans.push(Span::raw(" ".repeat(padding)));
        }
        lines.push(Line::from(spans));
    }
}
