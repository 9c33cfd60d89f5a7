//! Shared fixtures: in-memory PDFs and spy collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lopdf::{dictionary, Document, Object, Stream};

use attachview::error::{Result, ViewerError};
use attachview::export::codec;
use attachview::export::{Blob, FileExporter};
use attachview::model::Attachment;
use attachview::store::{AttachmentStore, ResourceLoader};

/// 1x1 transparent PNG.
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Build an A4 PDF with `pages` empty pages.
pub fn sample_pdf(pages: u32) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save sample pdf");
    buf
}

pub fn png(id: &str) -> Attachment {
    Attachment::new(id, "image/png", codec::encode(PNG_1X1))
}

pub fn pdf(id: &str, pages: u32) -> Attachment {
    Attachment::new(id, "application/pdf", codec::encode(&sample_pdf(pages)))
}

/// Attachment store that records deletes and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    attachments: Mutex<Vec<Attachment>>,
    deletes: Mutex<Vec<String>>,
    fail_fetch: AtomicBool,
    fail_delete: AtomicBool,
}

impl RecordingStore {
    pub fn new(attachments: Vec<Attachment>) -> Arc<Self> {
        Arc::new(Self {
            attachments: Mutex::new(attachments),
            ..Self::default()
        })
    }

    /// Ids passed to `delete`, in call order.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().expect("lock").clone()
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AttachmentStore for RecordingStore {
    async fn fetch(&self, _host_record_id: &str) -> Result<Vec<Attachment>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ViewerError::Fetch("backend unavailable".into()));
        }
        Ok(self.attachments.lock().expect("lock").clone())
    }

    async fn delete(&self, attachment_id: &str) -> Result<()> {
        self.deletes.lock().expect("lock").push(attachment_id.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ViewerError::Delete {
                id: attachment_id.to_string(),
                reason: "permission denied".into(),
            });
        }
        self.attachments
            .lock()
            .expect("lock")
            .retain(|a| a.id != attachment_id);
        Ok(())
    }
}

/// Store whose fetch never completes.
pub struct PendingStore;

#[async_trait]
impl AttachmentStore for PendingStore {
    async fn fetch(&self, _host_record_id: &str) -> Result<Vec<Attachment>> {
        std::future::pending().await
    }

    async fn delete(&self, _attachment_id: &str) -> Result<()> {
        std::future::pending().await
    }
}

/// Exporter that keeps every saved file in memory.
#[derive(Clone, Default)]
pub struct CaptureExporter {
    pub saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    pub fail: bool,
}

impl CaptureExporter {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().expect("lock").clone()
    }
}

impl FileExporter for CaptureExporter {
    fn save(&self, blob: &Blob, filename: &str) -> Result<()> {
        if self.fail {
            return Err(ViewerError::Export("disk full".into()));
        }
        self.saved
            .lock()
            .expect("lock")
            .push((filename.to_string(), blob.clone().into_bytes()));
        Ok(())
    }
}

/// Resource loader over a fixed map.
pub struct StaticResources(pub Vec<(&'static str, Vec<u8>)>);

#[async_trait]
impl ResourceLoader for StaticResources {
    async fn get(&self, resource_path: &str) -> Result<Vec<u8>> {
        self.0
            .iter()
            .find(|(p, _)| *p == resource_path)
            .map(|(_, b)| b.clone())
            .ok_or_else(|| ViewerError::InvalidPath(resource_path.to_string()))
    }
}
