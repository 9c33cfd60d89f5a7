//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Height of the thumbnail strip, borders included.
const THUMBNAIL_HEIGHT: u16 = 4;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();
    let thumbs = if app.snapshot.settings.show_thumbnails {
        THUMBNAIL_HEIGHT
    } else {
        0
    };

    // Vertical layout: header (1) + slide (flex) + thumbnails + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(thumbs),
            Constraint::Length(1),
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);
    widgets::slide::render(frame, app, vertical[1]);
    if thumbs > 0 {
        widgets::thumbnails::render(frame, app, vertical[2]);
    }
    widgets::status_bar::render(frame, app, vertical[3]);

    // Popups (rendered on top of everything)
    if app.snapshot.modal.is_preview_open() {
        widgets::preview_popup::render(frame, app);
    }
    if app.snapshot.modal.is_delete_confirm_open() {
        widgets::delete_popup::render(frame, app);
    }
    if app.show_help {
        widgets::help_popup::render(frame, app);
    }
}
