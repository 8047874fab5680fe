//! # Host Layer
//!
//! Everything noteid needs from the application that owns the notes:
//!
//! - enumerate notes,
//! - read a (possibly stale) cached header,
//! - run a header transaction against the live note,
//! - say which note is focused.
//!
//! ## Implementations
//!
//! - [`fs::VaultHost`]: a directory of markdown files with YAML frontmatter.
//!   The "cache" is a fresh parse; transactions are read-patch-write with an
//!   atomic rename.
//! - [`memory::InMemoryHost`]: in-memory notes for tests, with hooks to make
//!   headers unreadable or writes fail.

use crate::error::Result;
use crate::model::{Document, Header};

pub mod fs;
pub mod memory;

/// Header transaction body. Returns whether it changed the header; the host
/// only persists when it did.
pub type HeaderPatch<'a> = dyn FnMut(&mut Header) -> bool + 'a;

pub trait NoteHost {
    /// All notes in the collection, in no particular order.
    fn list_note_documents(&self) -> Result<Vec<Document>>;

    /// Cached header snapshot. `None` when absent or unreadable.
    fn header(&self, document: &Document) -> Option<Header>;

    /// Apply `patch` to the live header and persist it atomically.
    ///
    /// Returns `Ok(true)` when something was written. Fails when the document
    /// no longer exists or storage fails.
    fn mutate_header(&mut self, document: &Document, patch: &mut HeaderPatch<'_>) -> Result<bool>;

    /// The focused document, if any.
    fn active_document(&self) -> Option<Document>;
}
