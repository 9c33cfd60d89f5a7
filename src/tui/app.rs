//! Global application state for the TUI (the "Model" in Elm architecture).
//!
//! The viewer controller holds the real state; the app keeps the latest
//! snapshot for rendering plus purely cosmetic UI flags.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::{self, Config};
use crate::export::DirectoryExporter;
use crate::i18n;
use crate::store::{DirectoryStore, FsResourceLoader};
use crate::viewer::{ViewerController, ViewerSnapshot};

/// Complete TUI state.
pub struct App {
    // ── Viewer ────────────────────────────────
    pub viewer: ViewerController,
    /// Snapshot rendered in the current frame.
    pub snapshot: ViewerSnapshot,
    snapshots: watch::Receiver<ViewerSnapshot>,
    runtime: Handle,

    // ── Context ───────────────────────────────
    /// Name of the open record (its directory name).
    pub record_name: String,
    /// Directory downloads are saved into.
    pub output_dir: PathBuf,
    /// Zoom change per `+` / `-` press.
    pub zoom_step: f32,

    // ── UI state ──────────────────────────────
    /// Help popup visible?
    pub show_help: bool,
    pub should_quit: bool,
    /// Transient status message and the instant it was set.
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Build the viewer for `record_dir` and load its attachments.
    ///
    /// Must be called inside the runtime behind `runtime`.
    pub fn new(runtime: Handle, config: &Config, record_dir: &Path) -> anyhow::Result<Self> {
        let (root, record_name) = split_record_dir(record_dir)?;
        let output_dir = config::download_dir(config);

        let store = Arc::new(DirectoryStore::new(root));
        let exporter = Box::new(DirectoryExporter::new(output_dir.clone()));
        let mut viewer = ViewerController::new(config, store, exporter)?;

        runtime.block_on(viewer.load(&record_name))?;

        if let Some(icon) = &config.resources.placeholder_icon {
            let base = config::config_file_path()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .unwrap_or_default();
            let loader = FsResourceLoader::new(base);
            runtime.block_on(viewer.load_placeholder(&loader, &icon.to_string_lossy()));
        }

        let snapshots = viewer.subscribe();
        let snapshot = viewer.snapshot();

        Ok(Self {
            viewer,
            snapshot,
            snapshots,
            runtime,
            record_name,
            output_dir,
            zoom_step: config.pdf.zoom_step,
            show_help: false,
            should_quit: false,
            status_message: None,
        })
    }

    /// Pick up the newest snapshot, if one was published.
    pub fn sync(&mut self) {
        if self.snapshots.has_changed().unwrap_or(false) {
            self.snapshot = self.snapshots.borrow_and_update().clone();
        }
    }

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }

    /// Called every tick: applies finished PDF opens and clears expired
    /// status messages.
    pub fn tick(&mut self) {
        self.viewer.pump();
        self.sync();
        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }

    // ── Actions with user feedback ────────────

    /// Jump to a slide from a digit key.
    pub fn select_slide(&mut self, index: usize) {
        if let Err(e) = self.viewer.select_thumbnail(index) {
            tracing::debug!(error = %e, "Slide jump rejected");
            self.set_status(i18n::status_no_such_slide());
        }
    }

    pub fn last_slide(&mut self) {
        let last = self.snapshot.len().saturating_sub(1);
        self.select_slide(last);
    }

    pub fn download(&mut self) {
        match self.viewer.download() {
            Ok(()) => {
                let msg = format!("{} {}", i18n::status_saved_to(), self.output_dir.display());
                self.set_status(&msg);
            }
            Err(e) => self.set_status(&format!("{}: {e}", i18n::status_download_failed())),
        }
    }

    pub fn request_delete(&mut self) {
        if self.viewer.request_delete().is_err() {
            self.set_status(i18n::status_delete_disabled());
        }
    }

    /// Run the confirmed delete, then reload so the list drops the entry.
    pub fn confirm_delete(&mut self) {
        match self.runtime.block_on(self.viewer.confirm_delete()) {
            Ok(true) => {
                self.reload();
                self.set_status(i18n::status_deleted());
            }
            Ok(false) => {}
            Err(e) => self.set_status(&format!("{}: {e}", i18n::status_delete_failed())),
        }
    }

    pub fn reload(&mut self) {
        match self.runtime.block_on(self.viewer.refresh()) {
            Ok(_) => self.set_status(i18n::status_reloaded()),
            Err(e) => self.set_status(&format!("{}: {e}", i18n::err_fetch_failed())),
        }
    }

    /// Last page of the previewed PDF.
    pub fn pdf_last_page(&mut self) {
        if let Some(page) = self.snapshot.pdf.page() {
            self.viewer.pdf_goto_page(page.total_pages);
        }
    }
}

/// Split a record directory into the store root and the record id.
pub fn split_record_dir(record_dir: &Path) -> anyhow::Result<(PathBuf, String)> {
    let dir = record_dir.canonicalize()?;
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("{}: {}", i18n::err_dir_not_found(), dir.display()))?
        .to_string();
    let root = dir.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok((root, name))
}
