//! Renderer selection by MIME type.
//!
//! The mapping is a single table: adding a format is one more entry in
//! [`MEDIA_TYPES`]. Matching is exact and case-sensitive on the declared type.
//! Content is never sniffed to pick a renderer; [`verify_declared`] only warns
//! when the bytes disagree with the declaration.

use serde::Serialize;

/// Renderer variant used for an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    /// Paginated, zoomable PDF session.
    Pdf,
    /// Raster image shown as-is.
    Image,
    /// Placeholder for anything else.
    Unsupported,
}

impl MediaKind {
    /// Short lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Unsupported => "unsupported",
        }
    }
}

/// One supported media type.
#[derive(Debug)]
pub struct MediaType {
    pub mime: &'static str,
    pub kind: MediaKind,
    /// File extensions, the first one is preferred when naming files.
    pub extensions: &'static [&'static str],
    /// Leading magic bytes of the format.
    pub magic: &'static [u8],
}

/// Every renderable media type.
pub const MEDIA_TYPES: &[MediaType] = &[
    MediaType { mime: "application/pdf", kind: MediaKind::Pdf, extensions: &["pdf"], magic: b"%PDF-" },
    MediaType { mime: "image/png", kind: MediaKind::Image, extensions: &["png"], magic: b"\x89PNG\r\n\x1a\n" },
    MediaType { mime: "image/jpeg", kind: MediaKind::Image, extensions: &["jpg", "jpeg"], magic: b"\xFF\xD8\xFF" },
    MediaType { mime: "image/gif", kind: MediaKind::Image, extensions: &["gif"], magic: b"GIF8" },
];

/// Look up the table entry for a declared MIME type.
pub fn lookup(mime: &str) -> Option<&'static MediaType> {
    MEDIA_TYPES.iter().find(|t| t.mime == mime)
}

/// Select the renderer for a declared MIME type.
pub fn select(mime: &str) -> MediaKind {
    lookup(mime).map_or(MediaKind::Unsupported, |t| t.kind)
}

/// Preferred file extension for a MIME type.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    lookup(mime).and_then(|t| t.extensions.first().copied())
}

/// MIME type registered for a file extension (case-insensitive).
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    MEDIA_TYPES
        .iter()
        .find(|t| t.extensions.contains(&ext.as_str()))
        .map(|t| t.mime)
}

/// Detect the MIME type from magic bytes, if it is one we know.
pub fn sniff(bytes: &[u8]) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|t| bytes.starts_with(t.magic))
        .map(|t| t.mime)
}

/// Compare the declared MIME type against the content.
///
/// Returns `false` (and logs a warning) when the content is recognized as a
/// different type. Unrecognized content is accepted.
pub fn verify_declared(declared: &str, bytes: &[u8]) -> bool {
    match sniff(bytes) {
        Some(actual) if actual != declared => {
            tracing::warn!(
                declared,
                actual,
                "Declared MIME type does not match attachment content"
            );
            false
        }
        _ => true,
    }
}
