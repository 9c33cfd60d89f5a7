//! Read-only view of the controller state handed to the presentation layer.

use std::sync::Arc;

use serde::Serialize;

use super::modal::ModalState;
use super::pdf::{PdfSession, Viewport};
use crate::config::DisplayConfig;
use crate::media::MediaKind;
use crate::model::attachment::Attachment;

/// Progress of the attachment-list fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum LoadState {
    /// Constructed, fetch not finished yet.
    #[default]
    Loading,
    Ready,
    /// Fetch failed. The list is empty and a refresh may be offered.
    Failed { reason: String },
}

/// PDF page data for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PdfPageView {
    pub current_page: u32,
    pub total_pages: u32,
    pub zoom: f32,
    pub viewport: Viewport,
    /// Re-rasterize whenever this changes.
    pub render_seq: u64,
}

impl From<&PdfSession> for PdfPageView {
    fn from(session: &PdfSession) -> Self {
        let render = session.render_request();
        Self {
            current_page: session.current_page(),
            total_pages: session.total_pages(),
            zoom: session.zoom_factor(),
            viewport: render.viewport,
            render_seq: render.seq,
        }
    }
}

/// State of the PDF sub-view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum PdfView {
    /// No PDF previewed.
    #[default]
    Inactive,
    /// Open in progress; show a neutral placeholder.
    Loading,
    Ready(PdfPageView),
    /// Open failed; show the error and offer a retry.
    Failed { message: String },
}

impl PdfView {
    pub fn page(&self) -> Option<&PdfPageView> {
        match self {
            Self::Ready(page) => Some(page),
            _ => None,
        }
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone)]
pub struct ViewerSnapshot {
    pub load: LoadState,
    pub attachments: Arc<[Attachment]>,
    pub current_index: Option<usize>,
    pub modal: ModalState,
    /// Renderer for the current attachment.
    pub media: Option<MediaKind>,
    pub pdf: PdfView,
    pub settings: DisplayConfig,
    /// Image shown when an attachment cannot be rendered.
    pub placeholder: Option<Arc<[u8]>>,
    /// A delete succeeded and the list needs a refetch.
    pub stale: bool,
}

impl ViewerSnapshot {
    pub(crate) fn initial(settings: DisplayConfig) -> Self {
        Self {
            load: LoadState::Loading,
            attachments: Arc::from(Vec::new()),
            current_index: None,
            modal: ModalState::Closed,
            media: None,
            pdf: PdfView::Inactive,
            settings,
            placeholder: None,
            stale: false,
        }
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// No attachments to show.
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn current(&self) -> Option<&Attachment> {
        self.current_index.and_then(|i| self.attachments.get(i))
    }

    /// The `"i / n"` overlay, 1-based, when enabled and not empty.
    pub fn page_label(&self) -> Option<String> {
        if !self.settings.show_page_numbers {
            return None;
        }
        self.current_index
            .map(|i| format!("{} / {}", i + 1, self.attachments.len()))
    }

    /// Caption of the current slide, when enabled.
    pub fn caption(&self) -> Option<&str> {
        if !self.settings.show_captions {
            return None;
        }
        self.current().and_then(|a| a.note_text.as_deref())
    }
}
