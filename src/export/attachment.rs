//! Save attachments through the host's file exporter.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};
use crate::media;
use crate::model::attachment::Attachment;

use super::codec::{self, Blob};

/// Host-side "save as" action.
pub trait FileExporter: Send + Sync {
    /// Hand a decoded binary object to the host under `filename`.
    fn save(&self, blob: &Blob, filename: &str) -> Result<()>;
}

/// Decode an attachment and pass it to `exporter`.
///
/// Decode and save failures are both reported as [`ViewerError::Export`].
pub fn export_attachment(
    attachment: &Attachment,
    exporter: &dyn FileExporter,
    chunk_size: usize,
) -> Result<()> {
    let blob = codec::decode_blob(&attachment.binary_content, &attachment.mime_type, chunk_size)
        .map_err(|e| ViewerError::Export(format!("cannot decode '{}': {e}", attachment.id)))?;

    if let Some(first) = blob.parts().first() {
        media::verify_declared(&attachment.mime_type, first);
    }

    let filename = attachment.suggested_filename();
    exporter.save(&blob, &filename).map_err(|e| match e {
        ViewerError::Export(_) => e,
        other => ViewerError::Export(format!("cannot save '{filename}': {other}")),
    })?;

    tracing::info!(
        id = %attachment.id,
        filename = %filename,
        size = blob.len(),
        "Exported attachment"
    );
    Ok(())
}

/// Writes exported blobs into a directory, never overwriting existing files.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    output_dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save and return the path actually written.
    pub fn save_to_path(&self, blob: &Blob, filename: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ViewerError::io(&self.output_dir, e))?;

        let filename = sanitize_filename_part(filename, 150);
        let path = unique_path(&self.output_dir.join(&filename));

        let file = File::create(&path).map_err(|e| ViewerError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        blob.write_to(&mut writer)
            .map_err(|e| ViewerError::io(&path, e))?;
        Ok(path)
    }
}

impl FileExporter for DirectoryExporter {
    fn save(&self, blob: &Blob, filename: &str) -> Result<()> {
        let path = self.save_to_path(blob, filename)?;
        tracing::debug!(path = %path.display(), "Wrote exported file");
        Ok(())
    }
}

/// Replace characters that are unsafe in file names.
pub fn sanitize_filename_part(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "unknown".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, append a counter to make it unique.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    // Fallback, very unlikely
    parent.join(format!("{stem}_dup.{ext}"))
}
