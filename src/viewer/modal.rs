//! Preview and delete-confirmation dialogs.
//!
//! The delete dialog stacks on top of an open preview; it is never open on
//! its own, and nothing else opens while either is showing.

use serde::Serialize;

/// Which dialogs are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ModalState {
    #[default]
    Closed,
    /// Full-screen preview of the current attachment.
    PreviewOpen,
    /// Delete confirmation shown over the preview.
    ConfirmDelete,
}

impl ModalState {
    pub fn is_preview_open(self) -> bool {
        matches!(self, Self::PreviewOpen | Self::ConfirmDelete)
    }

    pub fn is_delete_confirm_open(self) -> bool {
        matches!(self, Self::ConfirmDelete)
    }
}

/// Dialog state machine. Every method returns whether a transition happened.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalLifecycle {
    state: ModalState,
}

impl ModalLifecycle {
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// `Closed -> PreviewOpen`.
    pub fn open_preview(&mut self) -> bool {
        self.transition(ModalState::Closed, ModalState::PreviewOpen)
    }

    /// `PreviewOpen -> Closed`. The preview cannot close under an open
    /// delete confirmation.
    pub fn close_preview(&mut self) -> bool {
        self.transition(ModalState::PreviewOpen, ModalState::Closed)
    }

    /// `PreviewOpen -> ConfirmDelete`.
    pub fn request_delete(&mut self) -> bool {
        self.transition(ModalState::PreviewOpen, ModalState::ConfirmDelete)
    }

    /// `ConfirmDelete -> PreviewOpen`.
    pub fn cancel_delete(&mut self) -> bool {
        self.transition(ModalState::ConfirmDelete, ModalState::PreviewOpen)
    }

    /// First half of confirm: `ConfirmDelete -> PreviewOpen`.
    ///
    /// The caller runs the delete and then calls [`Self::close_preview`] on
    /// success.
    pub fn take_confirmation(&mut self) -> bool {
        self.cancel_delete()
    }

    /// Drop every dialog, whatever the current state.
    pub fn reset(&mut self) {
        self.state = ModalState::Closed;
    }

    fn transition(&mut self, from: ModalState, to: ModalState) -> bool {
        if self.state != from {
            tracing::debug!(current = ?self.state, requested = ?to, "Ignoring dialog transition");
            return false;
        }
        self.state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_open_and_close() {
        let mut modal = ModalLifecycle::default();
        assert!(modal.open_preview());
        assert_eq!(modal.state(), ModalState::PreviewOpen);
        assert!(!modal.open_preview());
        assert!(modal.close_preview());
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_delete_requires_preview() {
        let mut modal = ModalLifecycle::default();
        assert!(!modal.request_delete());
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_cancel_returns_to_preview() {
        let mut modal = ModalLifecycle::default();
        modal.open_preview();
        assert!(modal.request_delete());
        assert!(modal.state().is_preview_open());
        assert!(modal.state().is_delete_confirm_open());
        assert!(modal.cancel_delete());
        assert_eq!(modal.state(), ModalState::PreviewOpen);
    }

    #[test]
    fn test_preview_stays_under_confirmation() {
        let mut modal = ModalLifecycle::default();
        modal.open_preview();
        modal.request_delete();
        assert!(!modal.close_preview());
        assert!(!modal.open_preview());
        assert_eq!(modal.state(), ModalState::ConfirmDelete);
    }

    #[test]
    fn test_confirm_sequence() {
        let mut modal = ModalLifecycle::default();
        modal.open_preview();
        modal.request_delete();
        assert!(modal.take_confirmation());
        assert!(modal.close_preview());
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!modal.take_confirmation());
    }
}
