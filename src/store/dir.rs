//! Directory-backed collaborators.
//!
//! A host record is a sub-directory of the store root. Each file whose
//! extension maps to a supported media type is one attachment, identified
//! as `"<record>/<file name>"`. A sibling `<file name>.txt` supplies the note.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{AttachmentStore, ResourceLoader};
use crate::error::{Result, ViewerError};
use crate::export::codec;
use crate::media;
use crate::model::attachment::Attachment;

/// Attachment store over a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an id (record or attachment) to a path under the root.
    fn resolve(&self, id: &str) -> Result<PathBuf> {
        let relative = Path::new(id);
        let safe = !id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(ViewerError::InvalidPath(id.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AttachmentStore for DirectoryStore {
    async fn fetch(&self, host_record_id: &str) -> Result<Vec<Attachment>> {
        let dir = self.resolve(host_record_id)?;
        let mut reader = fs::read_dir(&dir)
            .await
            .map_err(|e| ViewerError::io(&dir, e))?;

        let mut files: Vec<(String, &'static str)> = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| ViewerError::io(&dir, e))?
        {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(mime) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(media::mime_for_extension)
            else {
                continue;
            };
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                files.push((name.to_string(), mime));
            }
        }
        files.sort();

        let mut attachments = Vec::with_capacity(files.len());
        for (name, mime) in files {
            let path = dir.join(&name);
            let bytes = fs::read(&path).await.map_err(|e| ViewerError::io(&path, e))?;
            let note = fs::read_to_string(dir.join(format!("{name}.txt")))
                .await
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            let title = Path::new(&name)
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from);

            attachments.push(Attachment {
                id: format!("{host_record_id}/{name}"),
                binary_content: codec::encode(&bytes),
                mime_type: mime.to_string(),
                title,
                note_text: note,
                filename: Some(name),
            });
        }

        debug!(
            record = host_record_id,
            count = attachments.len(),
            "Fetched attachments from directory"
        );
        Ok(attachments)
    }

    async fn delete(&self, attachment_id: &str) -> Result<()> {
        let path = self.resolve(attachment_id)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| ViewerError::io(&path, e))?;

        let mut note = path.clone().into_os_string();
        note.push(".txt");
        let note = PathBuf::from(note);
        match fs::remove_file(&note).await {
            Ok(()) => debug!(path = %note.display(), "Deleted attachment note"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ViewerError::io(&note, e)),
        }

        debug!(path = %path.display(), "Deleted attachment file");
        Ok(())
    }
}

/// Reads static resources relative to a base directory.
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    base_dir: PathBuf,
}

impl FsResourceLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl ResourceLoader for FsResourceLoader {
    async fn get(&self, resource_path: &str) -> Result<Vec<u8>> {
        let path = self.base_dir.join(resource_path);
        fs::read(&path).await.map_err(|e| ViewerError::io(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = DirectoryStore::new("/data");
        assert!(store.resolve("record-1").is_ok());
        assert!(store.resolve("record-1/a.png").is_ok());
        assert!(matches!(store.resolve("../etc"), Err(ViewerError::InvalidPath(_))));
        assert!(matches!(store.resolve("/etc/passwd"), Err(ViewerError::InvalidPath(_))));
        assert!(matches!(store.resolve(""), Err(ViewerError::InvalidPath(_))));
    }
}
