use crate::presentation::Presentation;
use crate::storage::PresentationStore;
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory presentation store (no persistence).
#[derive(Default)]
pub struct InMemoryPresentationStore {
    presentations: RwLock<BTreeMap<String, Presentation>>,
}

impl InMemoryPresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `presentations`.
    pub fn with_presentations(presentations: impl IntoIterator<Item = Presentation>) -> Self {
        let map = presentations.into_iter().map(|p| (p.name.clone(), p)).collect();
        Self {
            presentations: RwLock::new(map),
        }
    }
}

impl PresentationStore for InMemoryPresentationStore {
    fn load(&self, name: &str) -> Result<Option<Presentation>> {
        let guard = self.presentations.read().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        Ok(guard.get(name).cloned())
    }

    fn save(&self, presentation: &Presentation) -> Result<()> {
        let mut guard = self.presentations.write().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        guard.insert(presentation.name.clone(), presentation.clone());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let mut guard = self.presentations.write().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        guard.remove(name);
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        let guard = self.presentations.read().map_err(|_| anyhow!("presentation store lock poisoned"))?;
        Ok(guard.keys().cloned().collect())
    }
}
