//! The viewer: a controller that shows one presentation at a time.
//!
//! A [`ViewerController`] ties the pipeline together. On navigation it loads a
//! presentation from its store, lays out and renders the first page, and
//! rasterizes the result at the current surface size. Pointer input is hit
//! tested against the drawn items and routed through the interaction rules,
//! which may navigate somewhere else.
//!
//! # Example
//!
//! ```
//! use lean_viewer::presentation::{Component, Page, Presentation};
//! use lean_viewer::render::backends::null::NullBackend;
//! use lean_viewer::storage::InMemoryPresentationStore;
//! use lean_viewer::viewer::{PixelSurface, ViewerConfig, ViewerController, ViewerStatus};
//!
//! let store = InMemoryPresentationStore::with_presentations([
//!     Presentation::new("Home").with_page(Page::new(794.0, 1123.0).with_component(Component::label("Title", "Hello"))),
//! ]);
//!
//! let mut viewer = ViewerController::with_backend(store, Box::new(NullBackend::new()), ViewerConfig::default());
//! viewer.load("Home").unwrap();
//! assert_eq!(viewer.status(), ViewerStatus::Loaded);
//!
//! let mut surface = PixelSurface::new(794, 1123);
//! viewer.paint(&mut surface);
//! ```

mod config;
mod controller;
mod events;
mod state;
mod surface;

pub use config::{ViewerConfig, ViewerConfigBuilder, ViewerConfigError};
pub use controller::ViewerController;
pub use events::{CursorStyle, HoverState, PointerEvent, ViewerResponse};
pub use state::{ViewerState, ViewerStatus};
pub use surface::{DisplaySurface, PixelSurface};
