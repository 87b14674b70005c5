//! JSON-backed presentation store.
//!
//! `JsonPresentationStore` keeps **all** presentations in one JSON file,
//! keyed by name. The file is read once when the store is opened and kept in
//! memory; every mutation rewrites the whole file.
//!
//! ### Caveats
//! - Writes rewrite the entire file and are not atomic. For many or large
//!   presentations use the SQLite store.
//! - Changes made to the file by another process after opening are not seen.

use crate::presentation::Presentation;
use crate::storage::PresentationStore;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// On-disk representation of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PresentationFile {
    presentations: BTreeMap<String, Presentation>,
}

pub struct JsonPresentationStore {
    /// Path to the JSON file
    path: PathBuf,
    presentations: RwLock<BTreeMap<String, Presentation>>,
}

impl JsonPresentationStore {
    /// Opens the store at `path`, creating an empty file when it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let file = if path.exists() {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("reading presentation store {}", path.display()))?;
            serde_json::from_str::<PresentationFile>(&contents)
                .with_context(|| format!("parsing presentation store {}", path.display()))?
        } else {
            let empty = PresentationFile::default();
            write_file(&path, &empty)?;
            empty
        };

        log::debug!(
            "json store: opened {} with {} presentations",
            path.display(),
            file.presentations.len()
        );

        Ok(Self {
            path,
            presentations: RwLock::new(file.presentations),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the presentations and writes it out. The
    /// cached map is only replaced once the write succeeded.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, Presentation>) -> bool) -> Result<()> {
        let mut guard = self.presentations.write().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        let mut next = guard.clone();
        if !change(&mut next) {
            return Ok(());
        }

        let file = PresentationFile { presentations: next };
        write_file(&self.path, &file)?;
        *guard = file.presentations;
        Ok(())
    }
}

fn write_file(path: &Path, file: &PresentationFile) -> Result<()> {
    let contents = serde_json::to_string_pretty(file)?;
    fs::write(path, contents).with_context(|| format!("writing presentation store {}", path.display()))
}

impl PresentationStore for JsonPresentationStore {
    fn load(&self, name: &str) -> Result<Option<Presentation>> {
        let guard = self.presentations.read().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        Ok(guard.get(name).cloned())
    }

    fn save(&self, presentation: &Presentation) -> Result<()> {
        self.update(|map| {
            map.insert(presentation.name.clone(), presentation.clone());
            true
        })
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.update(|map| map.remove(name).is_some())
    }

    fn names(&self) -> Result<Vec<String>> {
        let guard = self.presentations.read().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        Ok(guard.keys().cloned().collect())
    }
}
