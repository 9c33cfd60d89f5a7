//! Attachment records as delivered by the host.
//!
//! An attachment is immutable once fetched. The viewer only ever moves an
//! index over the list; it never edits the records themselves.

use crate::media::{self, MediaKind};

/// A binary payload (image or PDF) tied to a host record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Opaque identifier, stable for the lifetime of the session.
    pub id: String,

    /// Base64-encoded content. Decoded only on demand (PDF open, export).
    pub binary_content: String,

    /// Declared MIME type (e.g. `"image/png"`, `"application/pdf"`).
    pub mime_type: String,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,

    /// Free-form note attached to the record.
    #[serde(default)]
    pub note_text: Option<String>,

    /// File name offered when saving. Generated if missing.
    #[serde(default)]
    pub filename: Option<String>,
}

impl Attachment {
    /// Create an attachment with no display metadata.
    pub fn new(
        id: impl Into<String>,
        mime_type: impl Into<String>,
        binary_content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            binary_content: binary_content.into(),
            mime_type: mime_type.into(),
            title: None,
            note_text: None,
            filename: None,
        }
    }

    /// Renderer selected for the declared MIME type.
    pub fn kind(&self) -> MediaKind {
        media::select(&self.mime_type)
    }

    /// Best label for lists and headers: title, then filename, then id.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.filename.as_deref())
            .unwrap_or(&self.id)
    }

    /// File name to use when saving.
    ///
    /// Falls back to the title (or id) plus the extension registered for the
    /// MIME type.
    pub fn suggested_filename(&self) -> String {
        if let Some(name) = self.filename.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let stem = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.id);
        match media::extension_for(&self.mime_type) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    }

    /// Decoded size estimated from the base64 length (ignores whitespace).
    pub fn estimated_size(&self) -> u64 {
        let body = self.binary_content.trim_end();
        let padding = body.bytes().rev().take_while(|&b| b == b'=').count();
        let chars = body.bytes().filter(|b| !b.is_ascii_whitespace()).count();
        ((chars / 4) * 3 + (chars % 4).saturating_sub(1)).saturating_sub(padding) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename_prefers_explicit_name() {
        let mut att = Attachment::new("42", "image/png", "");
        att.filename = Some("scan.png".into());
        att.title = Some("Scan".into());
        assert_eq!(att.suggested_filename(), "scan.png");
    }

    #[test]
    fn test_suggested_filename_from_title_and_mime() {
        let mut att = Attachment::new("42", "application/pdf", "");
        att.title = Some("Invoice".into());
        assert_eq!(att.suggested_filename(), "Invoice.pdf");

        let bare = Attachment::new("42", "application/x-unknown", "");
        assert_eq!(bare.suggested_filename(), "42");
    }

    #[test]
    fn test_estimated_size() {
        // "hello" -> "aGVsbG8="
        let att = Attachment::new("a", "image/png", "aGVsbG8=");
        assert_eq!(att.estimated_size(), 5);
        let unpadded = Attachment::new("a", "image/png", "aGVsbG8");
        assert_eq!(unpadded.estimated_size(), 5);
        let empty = Attachment::new("a", "image/png", "");
        assert_eq!(empty.estimated_size(), 0);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut att = Attachment::new("id-1", "image/gif", "");
        assert_eq!(att.display_name(), "id-1");
        att.filename = Some("a.gif".into());
        assert_eq!(att.display_name(), "a.gif");
        att.title = Some("Animation".into());
        assert_eq!(att.display_name(), "Animation");
    }
}
