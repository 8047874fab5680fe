use super::{HeaderPatch, NoteHost};
use crate::error::{NoteIdError, Result};
use crate::model::{Document, Header};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
struct Entry {
    document: Document,
    header: Option<Header>,
}

/// In-memory notes for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    entries: BTreeMap<String, Entry>,
    active: Option<String>,
    unreadable: HashSet<String>,
    failing: HashSet<String>,
    writes: usize,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a document.
    pub fn insert(&mut self, document: Document, header: Option<Header>) {
        self.entries
            .insert(document.path.clone(), Entry { document, header });
    }

    /// Add a document at `path` created at `created_at`.
    pub fn add(&mut self, path: &str, created_at: i64, header: Option<Header>) -> Document {
        let document = Document::new(path, created_at);
        self.insert(document.clone(), header);
        document
    }

    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    pub fn set_active(&mut self, path: Option<&str>) {
        self.active = path.map(str::to_string);
    }

    /// The cached header of `path` reads as absent; the live one is intact.
    pub fn make_unreadable(&mut self, path: &str) {
        self.unreadable.insert(path.to_string());
    }

    /// Header transactions on `path` fail.
    pub fn fail_writes(&mut self, path: &str) {
        self.failing.insert(path.to_string());
    }

    /// The live header, bypassing the cache.
    pub fn stored_header(&self, path: &str) -> Option<Header> {
        self.entries.get(path).and_then(|e| e.header.clone())
    }

    /// Number of persisted header transactions.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl NoteHost for InMemoryHost {
    fn list_note_documents(&self) -> Result<Vec<Document>> {
        Ok(self
            .entries
            .values()
            .filter(|e| e.document.is_note())
            .map(|e| e.document.clone())
            .collect())
    }

    fn header(&self, document: &Document) -> Option<Header> {
        if self.unreadable.contains(&document.path) {
            return None;
        }
        self.stored_header(&document.path)
    }

    fn mutate_header(&mut self, document: &Document, patch: &mut HeaderPatch<'_>) -> Result<bool> {
        if self.failing.contains(&document.path) {
            return Err(NoteIdError::Host(format!(
                "write rejected for {}",
                document.path
            )));
        }
        let entry = self
            .entries
            .get_mut(&document.path)
            .ok_or_else(|| NoteIdError::DocumentNotFound(document.path.clone()))?;

        let mut header = entry.header.clone().unwrap_or_default();
        if !patch(&mut header) {
            return Ok(false);
        }
        entry.header = Some(header);
        self.writes += 1;
        Ok(true)
    }

    fn active_document(&self) -> Option<Document> {
        let path = self.active.as_ref()?;
        self.entries.get(path).map(|e| e.document.clone())
    }
}
