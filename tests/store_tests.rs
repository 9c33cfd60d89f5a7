//! Integration tests for the directory store and the file exporter.

mod common;

use assert_fs::prelude::*;
use predicates::prelude::*;

use attachview::error::ViewerError;
use attachview::export::codec::{self, DEFAULT_CHUNK_SIZE};
use attachview::export::{export_attachment, Blob, DirectoryExporter, FileExporter};
use attachview::store::{AttachmentStore, DirectoryStore, FsResourceLoader, ResourceLoader};

use common::{sample_pdf, PNG_1X1};

fn record_fixture() -> assert_fs::TempDir {
    let root = assert_fs::TempDir::new().unwrap();
    let record = root.child("visit-7");
    record.child("b_report.pdf").write_binary(&sample_pdf(2)).unwrap();
    record.child("a_front.png").write_binary(PNG_1X1).unwrap();
    record.child("a_front.png.txt").write_str("  Front door \n").unwrap();
    record.child("readme.md").write_str("not an attachment").unwrap();
    record.child("scans.png").create_dir_all().unwrap();
    root
}

// ─── Fetch ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_lists_supported_files_sorted() {
    let root = record_fixture();
    let store = DirectoryStore::new(root.path());

    let attachments = store.fetch("visit-7").await.unwrap();
    let ids: Vec<&str> = attachments.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["visit-7/a_front.png", "visit-7/b_report.pdf"]);

    let png = &attachments[0];
    assert_eq!(png.mime_type, "image/png");
    assert_eq!(png.title.as_deref(), Some("a_front"));
    assert_eq!(png.note_text.as_deref(), Some("Front door"));
    assert_eq!(png.filename.as_deref(), Some("a_front.png"));
    assert_eq!(codec::decode(&png.binary_content, DEFAULT_CHUNK_SIZE).unwrap(), PNG_1X1);

    let pdf = &attachments[1];
    assert_eq!(pdf.mime_type, "application/pdf");
    assert!(pdf.note_text.is_none());
}

#[tokio::test]
async fn test_fetch_missing_record_is_io_error() {
    let root = assert_fs::TempDir::new().unwrap();
    let store = DirectoryStore::new(root.path());
    let err = store.fetch("nope").await.unwrap_err();
    assert!(matches!(err, ViewerError::Io { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_rejects_path_traversal() {
    let root = record_fixture();
    let store = DirectoryStore::new(root.child("visit-7").path());
    let err = store.fetch("../visit-7").await.unwrap_err();
    assert!(matches!(err, ViewerError::InvalidPath(_)));
}

// ─── Delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_file() {
    let root = record_fixture();
    let store = DirectoryStore::new(root.path());

    store.delete("visit-7/b_report.pdf").await.unwrap();
    root.child("visit-7/b_report.pdf").assert(predicate::path::missing());
    root.child("visit-7/a_front.png").assert(predicate::path::exists());

    let remaining = store.fetch("visit-7").await.unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn test_delete_removes_note_sidecar() {
    let root = record_fixture();
    let store = DirectoryStore::new(root.path());

    store.delete("visit-7/a_front.png").await.unwrap();
    root.child("visit-7/a_front.png").assert(predicate::path::missing());
    root.child("visit-7/a_front.png.txt").assert(predicate::path::missing());
    root.child("visit-7/b_report.pdf").assert(predicate::path::exists());
}

#[tokio::test]
async fn test_delete_missing_file_is_reported() {
    let root = record_fixture();
    let store = DirectoryStore::new(root.path());
    assert!(store.delete("visit-7/gone.png").await.is_err());
}

// ─── Resources ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_resource_loader_reads_relative_path() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("icons/missing.png").write_binary(PNG_1X1).unwrap();
    let loader = FsResourceLoader::new(root.path());

    assert_eq!(loader.get("icons/missing.png").await.unwrap(), PNG_1X1);
    assert!(loader.get("icons/other.png").await.is_err());
}

// ─── Export ─────────────────────────────────────────────────────────

#[test]
fn test_directory_exporter_never_overwrites() {
    let out = assert_fs::TempDir::new().unwrap();
    let exporter = DirectoryExporter::new(out.path());
    let blob = Blob::from_bytes("image/png", PNG_1X1, 16);

    let first = exporter.save_to_path(&blob, "scan.png").unwrap();
    let second = exporter.save_to_path(&blob, "scan.png").unwrap();
    assert_ne!(first, second);

    out.child("scan.png").assert(predicate::path::is_file());
    out.child("scan_1.png").assert(predicate::path::is_file());
    assert_eq!(std::fs::read(second).unwrap(), PNG_1X1);
}

#[test]
fn test_directory_exporter_sanitizes_names() {
    let out = assert_fs::TempDir::new().unwrap();
    let exporter = DirectoryExporter::new(out.child("nested/dir").path());
    let blob = Blob::from_bytes("application/pdf", b"%PDF-1.5", 4);

    exporter.save(&blob, "../q3 report?.pdf").unwrap();
    out.child("nested/dir/.._q3_report_.pdf")
        .assert(predicate::path::is_file());
}

#[tokio::test]
async fn test_fetch_then_export_round_trip() {
    let root = record_fixture();
    let out = assert_fs::TempDir::new().unwrap();
    let store = DirectoryStore::new(root.path());
    let exporter = DirectoryExporter::new(out.path());

    for att in store.fetch("visit-7").await.unwrap() {
        export_attachment(&att, &exporter, 64).unwrap();
    }

    out.child("a_front.png").assert(PNG_1X1);
    let pdf = std::fs::read(out.child("b_report.pdf").path()).unwrap();
    let source = std::fs::read(root.child("visit-7/b_report.pdf").path()).unwrap();
    assert_eq!(pdf, source);
}
