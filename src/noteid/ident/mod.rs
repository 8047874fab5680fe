//! Identifier generation.
//!
//! Random identifiers are not checked for collisions; with the default
//! 62-symbol alphabet and length 10 they are unique enough for a personal
//! vault. Timestamp identifiers collide for notes created within the same
//! rendered time unit, which is accepted.

pub mod timefmt;

use crate::config::{IdStyle, NoteIdConfig};
use crate::error::Result;
use crate::model::Document;

pub use timefmt::{format_datetime, format_millis};

/// Symbols used for random identifiers.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn random_id(len: usize) -> String {
    random_id_with(&mut fastrand::Rng::new(), len)
}

pub fn random_id_with(rng: &mut fastrand::Rng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.usize(..ALPHABET.len())]))
        .collect()
}

/// The document's creation time rendered with `pattern`.
pub fn timestamp_id(document: &Document, pattern: &str) -> Result<String> {
    format_millis(document.created_at, pattern)
}

/// Compute a fresh identifier for `document` under `config`.
pub fn generate(document: &Document, config: &NoteIdConfig) -> Result<String> {
    match config.id_style {
        IdStyle::Random => Ok(random_id(config.random_length())),
        IdStyle::Timestamp => timestamp_id(document, &config.timestamp_format),
    }
}
