//! Keyed storage for the presentations an action can address.

use indexmap::IndexMap;

use crate::models::presentation::Presentation;

/// Holds presentations by id for the lifetime of the service.
///
/// Callers serialize actions against one id; implementations need not lock.
pub trait PresentationStore {
    fn get(&self, id: &str) -> Option<&Presentation>;
    fn get_mut(&mut self, id: &str) -> Option<&mut Presentation>;
    /// Inserts or replaces the presentation stored under `id`.
    fn put(&mut self, id: String, presentation: Presentation);
    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered in-memory store. Entries are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    presentations: IndexMap<String, Presentation>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids in the order they were first stored.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presentations.keys().map(String::as_str)
    }
}

impl PresentationStore for InMemoryStore {
    fn get(&self, id: &str) -> Option<&Presentation> {
        self.presentations.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Presentation> {
        self.presentations.get_mut(id)
    }

    fn put(&mut self, id: String, presentation: Presentation) {
        self.presentations.insert(id, presentation);
    }

    fn len(&self) -> usize {
        self.presentations.len()
    }
}
