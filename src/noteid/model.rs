use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Extension that marks a document as a note.
pub const NOTE_EXTENSION: &str = "md";

/// A document's metadata header. Keys keep their insertion order.
pub type Header = Mapping;

/// A document as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Vault-relative path, `/`-separated. Unique within the collection.
    pub path: String,
    /// Extension without the dot.
    pub extension: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Document {
    pub fn new(path: impl Into<String>, created_at: i64) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            extension,
            created_at,
        }
    }

    pub fn is_note(&self) -> bool {
        self.extension.eq_ignore_ascii_case(NOTE_EXTENSION)
    }
}

fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[dot + 1..].to_string(),
        _ => String::new(),
    }
}

/// True when `key` holds something other than null or an empty string,
/// sequence or mapping. `false` and `0` are values.
pub fn has_value(header: &Header, key: &str) -> bool {
    match header.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Sequence(seq)) => !seq.is_empty(),
        Some(Value::Mapping(map)) => !map.is_empty(),
        Some(_) => true,
    }
}

/// Presence only: a key set to null or `false` still counts.
pub fn has_key(header: &Header, key: &str) -> bool {
    header.contains_key(key)
}
