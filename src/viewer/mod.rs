//! Viewer core: navigation, dialogs, PDF session and the controller that
//! composes them.

pub mod controller;
pub mod modal;
pub mod navigation;
pub mod pdf;
pub mod snapshot;

pub use controller::ViewerController;
pub use modal::{ModalLifecycle, ModalState};
pub use navigation::Navigator;
pub use pdf::{PdfDocument, PdfSession, RenderRequest, Viewport, ZoomLimits};
pub use snapshot::{LoadState, PdfPageView, PdfView, ViewerSnapshot};
