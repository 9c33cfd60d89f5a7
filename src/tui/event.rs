//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use crate::viewer::ModalState;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Ctrl+C always quits
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // ── Help popup captures all keys ──────────────────────
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    match app.snapshot.modal {
        ModalState::ConfirmDelete => handle_confirm_keys(app, key),
        ModalState::PreviewOpen => handle_preview_keys(app, key),
        ModalState::Closed => handle_browse_keys(app, key),
    }
    app.sync();
    Ok(())
}

/// Keys for the slide view, no dialog open.
fn handle_browse_keys(app: &mut App, key: KeyEvent) {
    if handle_slide_keys(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_slide(index);
        }
        KeyCode::Char('g') | KeyCode::Home => app.select_slide(0),
        KeyCode::Char('G') | KeyCode::End => app.last_slide(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.viewer.open_preview();
        }
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

/// Keys inside the preview popup.
fn handle_preview_keys(app: &mut App, key: KeyEvent) {
    if handle_slide_keys(app, key) {
        return;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.viewer.close_preview();
        }
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),

        // ── PDF ──────────────────────────────────────────────
        KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Down => {
            app.viewer.pdf_next_page();
        }
        KeyCode::PageUp | KeyCode::Char('k') | KeyCode::Up => {
            app.viewer.pdf_prev_page();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.viewer.pdf_goto_page(1);
        }
        KeyCode::Char('G') | KeyCode::End => app.pdf_last_page(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.viewer.pdf_zoom(app.zoom_step);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.viewer.pdf_zoom(-app.zoom_step);
        }
        KeyCode::Char('R') => {
            app.viewer.retry_pdf();
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

/// Keys of the delete confirmation dialog.
fn handle_confirm_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.viewer.cancel_delete();
        }
        _ => {}
    }
}

/// Slide movement and download, shared by the slide view and the preview.
/// Returns whether the key was consumed.
fn handle_slide_keys(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.viewer.previous();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.viewer.next();
        }
        KeyCode::Char('d') => app.download(),
        _ => return false,
    }
    true
}
