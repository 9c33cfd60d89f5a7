//! Host-side collaborators the viewer consumes: attachment persistence and
//! static resource loading.

pub mod dir;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::attachment::Attachment;

pub use dir::{DirectoryStore, FsResourceLoader};

/// Source of attachments for a host record, and the place deletes go.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Every attachment of `host_record_id`, already filtered to supported
    /// MIME types.
    async fn fetch(&self, host_record_id: &str) -> Result<Vec<Attachment>>;

    /// Delete one attachment. Errors must be returned, not swallowed.
    async fn delete(&self, attachment_id: &str) -> Result<()>;
}

/// Loads static resources such as the placeholder icon.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn get(&self, resource_path: &str) -> Result<Vec<u8>>;
}
