//! One opened PDF document: current page, zoom, and render triggering.
//!
//! Parsing goes through `lopdf`. The session keeps the raw bytes plus the
//! page geometry it needs; rasterizing is left to the presentation layer,
//! which re-renders whenever [`RenderRequest::seq`] changes.

use std::sync::Arc;

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::Serialize;

use crate::config::PdfConfig;
use crate::error::{Result, ViewerError};

/// Floor used when the configured minimum zoom is outside `(0, 1]`.
pub const DEFAULT_MIN_ZOOM: f32 = 0.1;

/// A4 in points, used when a page declares no usable `MediaBox`.
const FALLBACK_PAGE_SIZE: PageSize = PageSize {
    width: 595.0,
    height: 842.0,
};

/// Limit on page-tree ancestors visited when resolving an inherited `MediaBox`.
const MAX_TREE_DEPTH: usize = 32;

/// Page size in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport for a page at `zoom` (1 point = 1 pixel at zoom 1.0).
    pub fn for_page(size: PageSize, zoom: f32) -> Self {
        let scale = f64::from(zoom);
        Self {
            width: (size.width * scale).round().max(1.0) as u32,
            height: (size.height * scale).round().max(1.0) as u32,
        }
    }
}

/// What the presentation layer should rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderRequest {
    /// 1-based page number.
    pub page: u32,
    pub zoom: f32,
    pub viewport: Viewport,
    /// Increases on every render trigger.
    pub seq: u64,
}

/// Bounds for the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f32,
    max: Option<f32>,
}

impl ZoomLimits {
    /// The range always contains 1.0, the zoom a session opens at. A minimum
    /// outside `(0, 1]` falls back to [`DEFAULT_MIN_ZOOM`]; a maximum below
    /// 1.0 or not finite is ignored.
    pub fn new(min: f32, max: Option<f32>) -> Self {
        let min = if min.is_finite() && min > 0.0 && min <= 1.0 {
            min
        } else {
            DEFAULT_MIN_ZOOM
        };
        let max = max.filter(|m| m.is_finite() && *m >= 1.0);
        Self { min, max }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    /// Clamp into range. Overflow saturates at `f32::MAX`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.max(self.min).min(self.max.unwrap_or(f32::MAX))
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, None)
    }
}

impl From<&PdfConfig> for ZoomLimits {
    fn from(config: &PdfConfig) -> Self {
        Self::new(config.min_zoom, config.max_zoom)
    }
}

/// Parsed document handle. Dropping it releases the document.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    bytes: Arc<[u8]>,
    version: String,
    pages: Vec<PageSize>,
}

impl PdfDocument {
    /// Parse a PDF from memory.
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        let document =
            Document::load_mem(&bytes).map_err(|e| ViewerError::PdfParse(e.to_string()))?;

        let pages: Vec<PageSize> = document
            .get_pages()
            .into_values()
            .map(|id| page_size(&document, id))
            .collect();
        if pages.is_empty() {
            return Err(ViewerError::PdfParse("document has no pages".into()));
        }

        Ok(Self {
            bytes: bytes.into(),
            version: document.version.clone(),
            pages,
        })
    }

    /// Raw document bytes, for rasterizers.
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// Version from the file header (e.g. `"1.7"`).
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Size of the 1-based `page`.
    pub fn page_size(&self, page: u32) -> Option<PageSize> {
        let index = page.checked_sub(1)? as usize;
        self.pages.get(index).copied()
    }
}

/// Page and zoom state of one open document.
#[derive(Debug, Clone)]
pub struct PdfSession {
    document: PdfDocument,
    current_page: u32,
    zoom: f32,
    limits: ZoomLimits,
    render: RenderRequest,
}

impl PdfSession {
    /// Parse `bytes` and start at page 1, zoom 1.0.
    pub fn open(bytes: Vec<u8>, limits: ZoomLimits) -> Result<Self> {
        let document = PdfDocument::parse(bytes)?;
        Ok(Self::with_document(document, limits))
    }

    /// Start a session over an already parsed document.
    pub fn with_document(document: PdfDocument, limits: ZoomLimits) -> Self {
        let zoom = 1.0;
        let viewport = Viewport::for_page(
            document.page_size(1).unwrap_or(FALLBACK_PAGE_SIZE),
            zoom,
        );
        Self {
            document,
            current_page: 1,
            zoom,
            limits,
            render: RenderRequest {
                page: 1,
                zoom,
                viewport,
                seq: 1,
            },
        }
    }

    pub fn document(&self) -> &PdfDocument {
        &self.document
    }

    pub fn total_pages(&self) -> u32 {
        self.document.page_count()
    }

    /// 1-based current page.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// The most recent render trigger.
    pub fn render_request(&self) -> RenderRequest {
        self.render
    }

    /// Viewport of the current page at the current zoom.
    pub fn viewport(&self) -> Viewport {
        self.render.viewport
    }

    /// Go to `page`. Out-of-range requests are ignored.
    pub fn goto_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() {
            tracing::debug!(page, total = self.total_pages(), "Ignoring out-of-range page");
            return false;
        }
        if page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.rerender();
        true
    }

    /// Move `delta` pages. Moves that would leave the document are ignored.
    pub fn shift_page(&mut self, delta: i64) -> bool {
        let target = i64::from(self.current_page) + delta;
        match u32::try_from(target) {
            Ok(page) => self.goto_page(page),
            Err(_) => false,
        }
    }

    /// Add `delta` to the zoom factor, clamped to the configured limits.
    pub fn zoom(&mut self, delta: f32) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let next = self.limits.clamp(self.zoom + delta);
        if next == self.zoom {
            return false;
        }
        self.zoom = next;
        self.rerender();
        true
    }

    fn rerender(&mut self) {
        let size = self
            .document
            .page_size(self.current_page)
            .unwrap_or(FALLBACK_PAGE_SIZE);
        self.render = RenderRequest {
            page: self.current_page,
            zoom: self.zoom,
            viewport: Viewport::for_page(size, self.zoom),
            seq: self.render.seq + 1,
        };
        tracing::trace!(
            page = self.render.page,
            zoom = self.render.zoom,
            seq = self.render.seq,
            "PDF render triggered"
        );
    }
}

/// Resolve the page's `MediaBox`, walking up the page tree for inherited values.
fn page_size(doc: &Document, page_id: ObjectId) -> PageSize {
    let mut current = Some(page_id);
    for _ in 0..MAX_TREE_DEPTH {
        let Some(id) = current else { break };
        let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) else {
            break;
        };
        if let Some(size) = media_box(doc, dict) {
            return size;
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    FALLBACK_PAGE_SIZE
}

fn media_box(doc: &Document, dict: &Dictionary) -> Option<PageSize> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let llx = number(&arr[0])?;
    let lly = number(&arr[1])?;
    let urx = number(&arr[2])?;
    let ury = number(&arr[3])?;
    let size = PageSize {
        width: (urx - llx).abs(),
        height: (ury - lly).abs(),
    };
    (size.width > 0.0 && size.height > 0.0).then_some(size)
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some((*f).into()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    /// Build a PDF with `pages` pages. Page 1 is 200x100, the rest inherit
    /// 612x792 from the page tree.
    fn sample_pdf(pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = (0..pages)
            .map(|i| {
                let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
                let mut page = dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                };
                if i == 0 {
                    page.set("MediaBox", vec![0.into(), 0.into(), 200.into(), 100.into()]);
                }
                doc.add_object(page).into()
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => i64::from(pages),
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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

    fn session(pages: u32) -> PdfSession {
        PdfSession::open(sample_pdf(pages), ZoomLimits::default()).expect("open")
    }

    #[test]
    fn test_open_resets_page_and_zoom() {
        let s = session(5);
        assert_eq!(s.total_pages(), 5);
        assert_eq!(s.current_page(), 1);
        assert_eq!(s.zoom_factor(), 1.0);
        assert_eq!(s.render_request().seq, 1);
        assert_eq!(s.viewport(), Viewport { width: 200, height: 100 });
    }

    #[test]
    fn test_open_rejects_garbage() {
        let err = PdfSession::open(b"not a pdf".to_vec(), ZoomLimits::default()).unwrap_err();
        assert!(matches!(err, ViewerError::PdfParse(_)));
    }

    #[test]
    fn test_inherited_media_box() {
        let s = session(3);
        let size = s.document().page_size(2).expect("page 2");
        assert_eq!((size.width, size.height), (612.0, 792.0));
        assert!(s.document().page_size(0).is_none());
        assert!(s.document().page_size(4).is_none());
    }

    #[test]
    fn test_goto_page_bounds() {
        let mut s = session(3);
        assert!(s.goto_page(3));
        assert!(!s.goto_page(4));
        assert!(!s.goto_page(0));
        assert_eq!(s.current_page(), 3);
    }

    #[test]
    fn test_shift_page_stops_at_edges() {
        let mut s = session(5);
        s.goto_page(2);
        assert!(s.shift_page(-1));
        assert_eq!(s.current_page(), 1);
        assert!(!s.shift_page(-1));
        assert_eq!(s.current_page(), 1);
        assert!(!s.shift_page(10));
        assert!(s.shift_page(4));
        assert_eq!(s.current_page(), 5);
        assert!(!s.shift_page(i64::MIN));
    }

    #[test]
    fn test_page_change_triggers_render() {
        let mut s = session(2);
        let before = s.render_request().seq;
        s.shift_page(1);
        let req = s.render_request();
        assert_eq!(req.seq, before + 1);
        assert_eq!(req.page, 2);
        assert_eq!(req.viewport, Viewport { width: 612, height: 792 });

        // Rejected moves do not re-render.
        s.shift_page(1);
        assert_eq!(s.render_request().seq, before + 1);
    }

    #[test]
    fn test_zoom_scales_viewport() {
        let mut s = session(1);
        assert!(s.zoom(0.5));
        assert_eq!(s.zoom_factor(), 1.5);
        assert_eq!(s.viewport(), Viewport { width: 300, height: 150 });
    }

    #[test]
    fn test_zoom_converges_to_floor() {
        let mut s = session(1);
        for _ in 0..50 {
            s.zoom(-0.3);
            assert!(s.zoom_factor() > 0.0);
        }
        assert_eq!(s.zoom_factor(), DEFAULT_MIN_ZOOM);
        assert!(!s.zoom(-0.3));
        assert!(!s.zoom(f32::NAN));
    }

    #[test]
    fn test_zoom_ceiling_when_configured() {
        let mut s = PdfSession::open(sample_pdf(1), ZoomLimits::new(0.5, Some(2.0))).expect("open");
        s.zoom(5.0);
        assert_eq!(s.zoom_factor(), 2.0);
        s.zoom(-5.0);
        assert_eq!(s.zoom_factor(), 0.5);
    }

    #[test]
    fn test_zoom_limits_sanitized() {
        let limits = ZoomLimits::new(-1.0, Some(0.01));
        assert_eq!(limits.min(), DEFAULT_MIN_ZOOM);
        assert_eq!(limits.max(), None);

        let above_one = ZoomLimits::new(2.0, Some(0.5));
        assert_eq!(above_one.min(), DEFAULT_MIN_ZOOM);
        assert_eq!(above_one.max(), None);
        assert_eq!(ZoomLimits::new(1.0, Some(1.0)).max(), Some(1.0));
    }

    #[test]
    fn test_open_at_unit_zoom_with_custom_floor() {
        let s = PdfSession::open(sample_pdf(1), ZoomLimits::new(2.0, None)).expect("open");
        assert_eq!(s.zoom_factor(), 1.0);
        assert_eq!(s.limits().min(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn test_zoom_saturates_instead_of_overflowing() {
        let mut s = session(1);
        assert!(s.zoom(f32::MAX));
        assert!(!s.zoom(f32::MAX));
        assert!(s.zoom_factor().is_finite());
        assert_eq!(s.zoom_factor(), f32::MAX);

        // Still able to come back down.
        assert!(s.zoom(-f32::MAX));
        assert!(s.zoom_factor().is_finite());
        assert!(s.zoom_factor() > 0.0);
        assert_eq!(s.zoom_factor(), DEFAULT_MIN_ZOOM);
    }
}
