//! Presentation storage.
//!
//! The viewer never owns presentation definitions; it asks a
//! [`PresentationStore`] for a copy whenever it navigates. Three backends are
//! provided:
//!
//! - [`InMemoryPresentationStore`] — keeps everything in a map. Used by tests and
//!   hosts that build presentations in code.
//! - [`JsonPresentationStore`] — all presentations in a single JSON file, keyed
//!   by name.
//! - [`SqlitePresentationStore`] — one row per presentation holding its JSON
//!   (feature `sqlite_store`).
//!
//! All stores are internally synchronized and `Send + Sync`, so a single store
//! can be shared between viewers behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use lean_viewer::presentation::{Page, Presentation};
//! use lean_viewer::storage::{InMemoryPresentationStore, PresentationStore};
//!
//! let store = InMemoryPresentationStore::new();
//! store.save(&Presentation::new("Home").with_page(Page::new(800.0, 600.0))).unwrap();
//!
//! assert!(store.load("Home").unwrap().is_some());
//! assert!(store.load("Missing").unwrap().is_none());
//! ```

use crate::presentation::Presentation;
use anyhow::Result;
use std::sync::Arc;

mod in_memory;
mod json;
#[cfg(feature = "sqlite_store")]
mod sqlite;

pub use in_memory::InMemoryPresentationStore;
pub use json::JsonPresentationStore;
#[cfg(feature = "sqlite_store")]
pub use sqlite::SqlitePresentationStore;

/// Source of presentation definitions, keyed by presentation name.
pub trait PresentationStore: Send + Sync {
    /// Returns a copy of the named presentation, `None` when it does not exist.
    fn load(&self, name: &str) -> Result<Option<Presentation>>;

    /// Inserts or replaces a presentation under its name.
    fn save(&self, presentation: &Presentation) -> Result<()>;

    /// Removes a presentation. Removing a missing one is not an error.
    fn remove(&self, name: &str) -> Result<()>;

    /// Names of all stored presentations, sorted.
    fn names(&self) -> Result<Vec<String>>;
}

/// Shared handle to a store.
pub type PresentationStoreHandle = Arc<dyn PresentationStore>;

impl<T: PresentationStore + ?Sized> PresentationStore for Arc<T> {
    fn load(&self, name: &str) -> Result<Option<Presentation>> {
        (**self).load(name)
    }

    fn save(&self, presentation: &Presentation) -> Result<()> {
        (**self).save(presentation)
    }

    fn remove(&self, name: &str) -> Result<()> {
        (**self).remove(name)
    }

    fn names(&self) -> Result<Vec<String>> {
        (**self).names()
    }
}
