//! `attachview`: an embeddable viewer for the image and PDF attachments of a
//! host record.
//!
//! The core is [`viewer::ViewerController`], a state machine over slide
//! navigation, the preview and delete-confirmation dialogs, and the PDF
//! session of the previewed attachment. It publishes read-only snapshots for
//! any presentation layer. Persistence, file saving and resource loading are
//! host collaborators ([`store`], [`export`]); directory-backed versions ship
//! with the crate and drive the terminal front-end in [`tui`].

pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod media;
pub mod model;
pub mod store;
pub mod tui;
pub mod viewer;
