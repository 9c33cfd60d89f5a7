//! TUI widgets for rendering different UI panels.

pub mod delete_popup;
pub mod header_bar;
pub mod help_popup;
pub mod preview_popup;
pub mod slide;
pub mod status_bar;
pub mod thumbnails;

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate a centered rectangle as a percentage of `area`.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    centered_rect_exact(width, height, area)
}

/// Calculate a centered rectangle with exact dimensions, clamped to `area`.
pub(crate) fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Truncate to `max_width` display columns, ending in "..." when cut.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    let width = UnicodeWidthStr::width(s);
    if width <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 3 > max_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }
        result.push_str("...");
        result
    }
}

/// Human-readable payload size of an attachment.
pub(crate) fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("photo.png", 20), "photo.png");
        assert_eq!(truncate_str("a-very-long-name.pdf", 10), "a-very-...");
        assert_eq!(truncate_str("ñandú.gif", 6), "ñan...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }

    #[test]
    fn test_centered_rect_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect_exact(100, 4, area), Rect::new(0, 3, 40, 4));
        assert_eq!(centered_rect(50, 50, area), Rect::new(10, 2, 20, 5));
    }
}
