//! The viewer state machine.
//!
//! [`ViewerController`] owns navigation, dialogs and the PDF session, and
//! publishes a fresh [`ViewerSnapshot`] after every command that changed
//! something. Commands run one at a time (`&mut self`); the snapshot is only
//! published once a command has fully applied.
//!
//! Two things suspend: the attachment fetch (`load`, `refresh`) and PDF
//! opening. PDF opens run on the blocking pool and report back through a
//! channel; each carries a generation number so a result for an attachment
//! that is no longer previewed is dropped.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::modal::ModalLifecycle;
use super::navigation::Navigator;
use super::pdf::{PdfSession, ZoomLimits};
use super::snapshot::{LoadState, PdfView, ViewerSnapshot};
use crate::config::{Config, DisplayConfig};
use crate::error::{Result, ViewerError};
use crate::export::{self, codec, FileExporter};
use crate::media::MediaKind;
use crate::model::attachment::Attachment;
use crate::store::{AttachmentStore, ResourceLoader};

/// Result of one PDF open, tagged with the generation that started it.
struct PdfOutcome {
    generation: u64,
    result: Result<PdfSession>,
}

/// PDF sub-state, keyed by the attachment it belongs to.
enum PdfSlot {
    Idle,
    Opening {
        generation: u64,
        attachment_id: String,
        cancel: CancellationToken,
    },
    Ready {
        attachment_id: String,
        session: PdfSession,
    },
    Failed {
        attachment_id: String,
        message: String,
    },
}

impl PdfSlot {
    fn attachment_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Opening { attachment_id, .. }
            | Self::Ready { attachment_id, .. }
            | Self::Failed { attachment_id, .. } => Some(attachment_id),
        }
    }

    fn view(&self) -> PdfView {
        match self {
            Self::Idle => PdfView::Inactive,
            Self::Opening { .. } => PdfView::Loading,
            Self::Ready { session, .. } => PdfView::Ready(session.into()),
            Self::Failed { message, .. } => PdfView::Failed {
                message: message.clone(),
            },
        }
    }

    /// Drop the current state, cancelling an in-flight open.
    fn release(&mut self) {
        if let Self::Opening {
            generation, cancel, ..
        } = self
        {
            debug!(generation, "Cancelling PDF open");
            cancel.cancel();
        }
        *self = Self::Idle;
    }
}

/// Media viewer for the attachments of one host record.
pub struct ViewerController {
    store: Arc<dyn AttachmentStore>,
    exporter: Box<dyn FileExporter>,
    runtime: Handle,
    settings: DisplayConfig,
    limits: ZoomLimits,
    chunk_size: usize,

    host_record_id: Option<String>,
    load: LoadState,
    attachments: Arc<[Attachment]>,
    nav: Navigator,
    modal: ModalLifecycle,
    pdf: PdfSlot,
    generation: u64,
    placeholder: Option<Arc<[u8]>>,
    stale: bool,

    pdf_tx: mpsc::UnboundedSender<PdfOutcome>,
    pdf_rx: mpsc::UnboundedReceiver<PdfOutcome>,
    cancel: CancellationToken,
    snapshot_tx: watch::Sender<ViewerSnapshot>,
}

impl ViewerController {
    /// Create a controller in the loading state.
    ///
    /// Must be called within a Tokio runtime; PDF opens are spawned on it.
    pub fn new(
        config: &Config,
        store: Arc<dyn AttachmentStore>,
        exporter: Box<dyn FileExporter>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| ViewerError::NoRuntime)?;
        let (pdf_tx, pdf_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(ViewerSnapshot::initial(config.display.clone()));

        Ok(Self {
            store,
            exporter,
            runtime,
            settings: config.display.clone(),
            limits: ZoomLimits::from(&config.pdf),
            chunk_size: config.export.chunk_size,
            host_record_id: None,
            load: LoadState::Loading,
            attachments: Arc::from(Vec::new()),
            nav: Navigator::default(),
            modal: ModalLifecycle::default(),
            pdf: PdfSlot::Idle,
            generation: 0,
            placeholder: None,
            stale: false,
            pdf_tx,
            pdf_rx,
            cancel: CancellationToken::new(),
            snapshot_tx,
        })
    }

    // ── Observation ─────────────────────────────────────────────

    /// Receive a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ViewerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Token cancelled by [`Self::shutdown`].
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The attachment at the current index.
    pub fn current(&self) -> Option<&Attachment> {
        self.nav.current().and_then(|i| self.attachments.get(i))
    }

    /// Open PDF session, if the preview shows a parsed PDF.
    pub fn pdf_session(&self) -> Option<&PdfSession> {
        match &self.pdf {
            PdfSlot::Ready { session, .. } => Some(session),
            _ => None,
        }
    }

    // ── Loading ─────────────────────────────────────────────────

    /// Fetch the attachments of `host_record_id` and show the first one.
    ///
    /// A failed fetch is not an error: the viewer shows an empty list and
    /// [`LoadState::Failed`]. Only cancellation is returned as an error.
    pub async fn load(&mut self, host_record_id: &str) -> Result<usize> {
        self.host_record_id = Some(host_record_id.to_string());
        self.load = LoadState::Loading;
        self.publish();

        let attachments = self.fetch(host_record_id).await?;
        self.modal.reset();
        self.install(attachments, None);
        Ok(self.attachments.len())
    }

    /// Fetch the list again, keeping the current attachment selected when it
    /// is still there.
    pub async fn refresh(&mut self) -> Result<usize> {
        let Some(record) = self.host_record_id.clone() else {
            return Err(ViewerError::Fetch("no host record loaded".into()));
        };
        let keep = self.current().map(|a| a.id.clone());

        let attachments = self.fetch(&record).await?;
        let preferred = keep
            .and_then(|id| attachments.iter().position(|a| a.id == id))
            .or(self.nav.current());
        self.install(attachments, preferred);
        Ok(self.attachments.len())
    }

    /// Fetch raced against shutdown. Store failures become an empty list.
    async fn fetch(&mut self, record: &str) -> Result<Vec<Attachment>> {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return Err(ViewerError::Cancelled),
            result = self.store.fetch(record) => result,
        };
        match result {
            Ok(list) => {
                self.load = LoadState::Ready;
                Ok(list)
            }
            Err(ViewerError::Cancelled) => Err(ViewerError::Cancelled),
            Err(e) => {
                warn!(record, error = %e, "Attachment fetch failed, showing empty list");
                self.load = LoadState::Failed {
                    reason: e.to_string(),
                };
                Ok(Vec::new())
            }
        }
    }

    fn install(&mut self, attachments: Vec<Attachment>, preferred: Option<usize>) {
        self.attachments = attachments.into();
        self.nav.reset(self.attachments.len(), preferred);
        if self.attachments.is_empty() {
            self.modal.reset();
        }
        self.stale = false;
        info!(count = self.attachments.len(), "Attachment list installed");
        self.sync_pdf();
        self.publish();
    }

    /// Load the placeholder image. Failures leave no placeholder.
    pub async fn load_placeholder(
        &mut self,
        loader: &dyn ResourceLoader,
        resource_path: &str,
    ) -> bool {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return false,
            result = loader.get(resource_path) => result,
        };
        match result {
            Ok(bytes) => {
                self.placeholder = Some(bytes.into());
                self.publish();
                true
            }
            Err(e) => {
                warn!(path = resource_path, error = %e, "Could not load placeholder");
                false
            }
        }
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Next slide, wrapping after the last.
    pub fn next(&mut self) -> Option<usize> {
        self.move_by(1)
    }

    /// Previous slide, wrapping before the first.
    pub fn previous(&mut self) -> Option<usize> {
        self.move_by(-1)
    }

    /// Move `delta` slides. `None` when the list is empty.
    pub fn move_by(&mut self, delta: isize) -> Option<usize> {
        let index = self.nav.move_by(delta);
        if index.is_some() {
            self.sync_pdf();
            self.publish();
        }
        index
    }

    /// Jump to `index` (thumbnail click).
    pub fn select_thumbnail(&mut self, index: usize) -> Result<Option<usize>> {
        let selected = self.nav.jump_to(index)?;
        if selected.is_some() {
            self.sync_pdf();
            self.publish();
        }
        Ok(selected)
    }

    // ── Dialogs ─────────────────────────────────────────────────

    /// Open the preview of the current attachment.
    pub fn open_preview(&mut self) -> bool {
        if self.nav.is_empty() {
            return false;
        }
        self.transition(ModalLifecycle::open_preview)
    }

    /// Close the preview and release any PDF session.
    pub fn close_preview(&mut self) -> bool {
        self.transition(ModalLifecycle::close_preview)
    }

    /// Ask for delete confirmation of the previewed attachment.
    pub fn request_delete(&mut self) -> Result<bool> {
        if !self.settings.allow_delete {
            return Err(ViewerError::DeleteDisabled);
        }
        Ok(self.transition(ModalLifecycle::request_delete))
    }

    /// Dismiss the delete confirmation, back to the preview.
    pub fn cancel_delete(&mut self) -> bool {
        self.transition(ModalLifecycle::cancel_delete)
    }

    /// Delete the previewed attachment and close the preview.
    ///
    /// The list itself is not edited; on success the snapshot is marked
    /// `stale` until [`Self::refresh`]. On failure the preview stays open and
    /// the error is returned.
    pub async fn confirm_delete(&mut self) -> Result<bool> {
        if !self.modal.state().is_delete_confirm_open() {
            return Ok(false);
        }
        let Some(id) = self.current().map(|a| a.id.clone()) else {
            self.modal.reset();
            self.publish();
            return Ok(false);
        };
        self.modal.take_confirmation();

        let result = tokio::select! {
            _ = self.cancel.cancelled() => Err(ViewerError::Cancelled),
            result = self.store.delete(&id) => result,
        };

        match result {
            Ok(()) => {
                info!(id = %id, "Attachment deleted");
                self.modal.close_preview();
                self.stale = true;
                self.sync_pdf();
                self.publish();
                Ok(true)
            }
            Err(e) => {
                error!(id = %id, error = %e, "Attachment delete failed");
                self.publish();
                Err(match e {
                    ViewerError::Delete { .. } | ViewerError::Cancelled => e,
                    other => ViewerError::Delete {
                        id,
                        reason: other.to_string(),
                    },
                })
            }
        }
    }

    fn transition(&mut self, apply: fn(&mut ModalLifecycle) -> bool) -> bool {
        let changed = apply(&mut self.modal);
        if changed {
            self.sync_pdf();
            self.publish();
        }
        changed
    }

    // ── Export ──────────────────────────────────────────────────

    /// Decode the current attachment and hand it to the file exporter.
    pub fn download(&self) -> Result<()> {
        let attachment = self
            .current()
            .ok_or_else(|| ViewerError::Export("no attachment selected".into()))?;
        export::export_attachment(attachment, self.exporter.as_ref(), self.chunk_size)
            .inspect_err(|e| error!(id = %attachment.id, error = %e, "Download failed"))
    }

    // ── PDF ─────────────────────────────────────────────────────

    pub fn pdf_next_page(&mut self) -> bool {
        self.with_session(|s| s.shift_page(1))
    }

    pub fn pdf_prev_page(&mut self) -> bool {
        self.with_session(|s| s.shift_page(-1))
    }

    /// Go to the 1-based `page`; out-of-range pages are ignored.
    pub fn pdf_goto_page(&mut self, page: u32) -> bool {
        self.with_session(|s| s.goto_page(page))
    }

    pub fn pdf_zoom(&mut self, delta: f32) -> bool {
        self.with_session(|s| s.zoom(delta))
    }

    /// Open the previewed PDF again after a failure.
    pub fn retry_pdf(&mut self) -> bool {
        if !matches!(self.pdf, PdfSlot::Failed { .. }) {
            return false;
        }
        self.pdf = PdfSlot::Idle;
        self.sync_pdf();
        self.publish();
        true
    }

    fn with_session(&mut self, op: impl FnOnce(&mut PdfSession) -> bool) -> bool {
        let PdfSlot::Ready { session, .. } = &mut self.pdf else {
            return false;
        };
        let changed = op(session);
        if changed {
            self.publish();
        }
        changed
    }

    /// Apply finished PDF opens without waiting. Returns whether anything
    /// changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.pdf_rx.try_recv() {
            changed |= self.apply_pdf(outcome);
        }
        if changed {
            self.publish();
        }
        changed
    }

    /// Wait until no PDF open is pending.
    pub async fn wait_for_pdf(&mut self) -> Result<()> {
        while matches!(self.pdf, PdfSlot::Opening { .. }) {
            let outcome = tokio::select! {
                _ = self.cancel.cancelled() => return Err(ViewerError::Cancelled),
                outcome = self.pdf_rx.recv() => outcome,
            };
            let Some(outcome) = outcome else {
                return Err(ViewerError::Cancelled);
            };
            if self.apply_pdf(outcome) {
                self.publish();
            }
        }
        Ok(())
    }

    fn apply_pdf(&mut self, outcome: PdfOutcome) -> bool {
        let attachment_id = match &self.pdf {
            PdfSlot::Opening {
                generation,
                attachment_id,
                ..
            } if *generation == outcome.generation => attachment_id.clone(),
            _ => {
                debug!(generation = outcome.generation, "Discarding stale PDF open");
                return false;
            }
        };

        self.pdf = match outcome.result {
            Ok(session) => {
                debug!(
                    id = %attachment_id,
                    pages = session.total_pages(),
                    "PDF opened"
                );
                PdfSlot::Ready {
                    attachment_id,
                    session,
                }
            }
            Err(e) => {
                warn!(id = %attachment_id, error = %e, "PDF open failed");
                PdfSlot::Failed {
                    attachment_id,
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Bring the PDF slot in line with the modal and the current attachment.
    fn sync_pdf(&mut self) {
        let wanted = self
            .modal
            .state()
            .is_preview_open()
            .then(|| self.nav.current())
            .flatten()
            .filter(|&i| self.attachments[i].kind() == MediaKind::Pdf);

        let Some(index) = wanted else {
            self.pdf.release();
            return;
        };
        if self.pdf.attachment_id() == Some(self.attachments[index].id.as_str()) {
            return;
        }
        self.pdf.release();
        self.start_pdf_open(index);
    }

    fn start_pdf_open(&mut self, index: usize) {
        self.generation += 1;
        let generation = self.generation;
        let cancel = self.cancel.child_token();
        let attachment_id = self.attachments[index].id.clone();
        debug!(id = %attachment_id, generation, "Opening PDF");

        let attachments = Arc::clone(&self.attachments);
        let chunk_size = self.chunk_size;
        let limits = self.limits;
        let tx = self.pdf_tx.clone();
        let token = cancel.clone();

        self.runtime.spawn(async move {
            let worker_token = token.clone();
            let open = tokio::task::spawn_blocking(move || {
                open_pdf(&attachments[index], chunk_size, limits, &worker_token)
            });
            let result = tokio::select! {
                _ = token.cancelled() => return,
                joined = open => joined.unwrap_or_else(|e| {
                    Err(ViewerError::PdfParse(format!("open task failed: {e}")))
                }),
            };
            if token.is_cancelled() {
                return;
            }
            if tx.send(PdfOutcome { generation, result }).is_err() {
                debug!(generation, "Viewer dropped before PDF open finished");
            }
        });

        self.pdf = PdfSlot::Opening {
            generation,
            attachment_id,
            cancel,
        };
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Cancel every pending fetch, delete and PDF open.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        self.pdf.release();
        self.publish();
        debug!("Viewer shut down");
    }

    fn publish(&self) {
        let index = self.nav.current();
        self.snapshot_tx.send_replace(ViewerSnapshot {
            load: self.load.clone(),
            attachments: Arc::clone(&self.attachments),
            current_index: index,
            modal: self.modal.state(),
            media: self.current().map(Attachment::kind),
            pdf: self.pdf.view(),
            settings: self.settings.clone(),
            placeholder: self.placeholder.clone(),
            stale: self.stale,
        });
    }
}

impl Drop for ViewerController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn open_pdf(
    attachment: &Attachment,
    chunk_size: usize,
    limits: ZoomLimits,
    cancel: &CancellationToken,
) -> Result<PdfSession> {
    let bytes = codec::decode(&attachment.binary_content, chunk_size)
        .map_err(|e| ViewerError::PdfParse(e.to_string()))?;
    if cancel.is_cancelled() {
        return Err(ViewerError::Cancelled);
    }
    PdfSession::open(bytes, limits)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::export::Blob;

    struct FixedStore(Vec<Attachment>);

    #[async_trait]
    impl AttachmentStore for FixedStore {
        async fn fetch(&self, _host_record_id: &str) -> Result<Vec<Attachment>> {
            Ok(self.0.clone())
        }

        async fn delete(&self, _attachment_id: &str) -> Result<()> {
            Ok(())
        }
    }

    struct NullExporter;

    impl FileExporter for NullExporter {
        fn save(&self, _blob: &Blob, _filename: &str) -> Result<()> {
            Ok(())
        }
    }

    async fn viewer(ids: &[&str]) -> ViewerController {
        let attachments = ids
            .iter()
            .map(|id| Attachment::new(*id, "application/pdf", "bm90IGEgcGRm"))
            .collect();
        let mut viewer = ViewerController::new(
            &Config::default(),
            Arc::new(FixedStore(attachments)),
            Box::new(NullExporter),
        )
        .expect("runtime");
        viewer.load("record").await.expect("load");
        viewer
    }

    fn outcome(generation: u64, reason: &str) -> PdfOutcome {
        PdfOutcome {
            generation,
            result: Err(ViewerError::PdfParse(reason.to_string())),
        }
    }

    #[tokio::test]
    async fn test_outdated_generation_is_dropped() {
        let mut viewer = viewer(&["a", "b"]).await;
        // a (1), b (2), back to a (3): the first open targets the same
        // attachment as the current one but is still outdated.
        viewer.open_preview();
        viewer.next();
        viewer.previous();
        assert_eq!(viewer.generation, 3);

        viewer.pdf_tx.send(outcome(1, "first")).expect("send");
        viewer.pdf_tx.send(outcome(2, "second")).expect("send");
        assert!(!viewer.pump());
        assert_eq!(viewer.snapshot().pdf, PdfView::Loading);

        viewer.pdf_tx.send(outcome(3, "current")).expect("send");
        assert!(viewer.pump());
        match viewer.snapshot().pdf {
            PdfView::Failed { message } => assert!(message.contains("current"), "{message}"),
            other => panic!("expected failed view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_result_after_close_is_dropped() {
        let mut viewer = viewer(&["a"]).await;
        viewer.open_preview();
        viewer.close_preview();

        viewer.pdf_tx.send(outcome(1, "late")).expect("send");
        assert!(!viewer.pump());
        assert_eq!(viewer.snapshot().pdf, PdfView::Inactive);
        assert!(viewer.pdf_session().is_none());
    }
}
