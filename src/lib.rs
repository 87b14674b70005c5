//! A lean presentation viewer.
//!
//! Presentations are declarative pages of components positioned by attachment
//! constraints. The viewer resolves the constraints into boxes, renders the page
//! into a vector document, rasterizes it, and maps pointer input on the bitmap
//! back to the drawn components so interaction rules can navigate between
//! presentations.
//!
//! The pipeline, in order:
//!
//! - [`layout`] — attachment constraints to absolute boxes
//! - [`render`] — boxes to an SVG document plus drawn items, and rasterization
//! - [`hit_test`] — page coordinate to drawn item
//! - [`interaction`] — drawn item plus gesture to navigation request
//! - [`viewer`] — the controller tying it together
//!
//! Presentations come from a [`storage::PresentationStore`].

pub mod context;
pub mod errors;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod presentation;
pub mod render;
pub mod storage;
pub mod viewer;

pub use errors::ViewerError;
pub use viewer::{ViewerConfig, ViewerController};
