//! Export pipeline: base64 decoding and handing files to the host.

pub mod attachment;
pub mod codec;

pub use attachment::{export_attachment, DirectoryExporter, FileExporter};
pub use codec::Blob;
