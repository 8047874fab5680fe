//! # Configuration
//!
//! One [`NoteIdConfig`] value per process. It is built from compiled defaults,
//! merged with whatever the [`SettingsStore`] has persisted, and then handed
//! explicitly to every command. There is no global copy.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `key` | `uuid` | Frontmatter field that holds the identifier |
//! | `id-style` | `random` | `random` or `timestamp` |
//! | `random-length` | `10` | Length of random identifiers |
//! | `timestamp-format` | `YYYYMMDD_hhmmss` | Pattern for timestamp identifiers |
//! | `path-blacklist` | `[]` | Path substrings excluded from "all notes" |
//! | `path-whitelist` | `[]` | Path substrings selected by "whitelist notes" |
//! | `property-whitelist` | `[]` | Keys a whitelisted note must already carry |
//!
//! Settings files written by the original editor plugin (`uuidKey`,
//! `uuidLength`, `blacklist`, `whitelist`, `uuidStyle`, `dateFormat`) load too.

use crate::error::{NoteIdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_KEY: &str = "uuid";
pub const DEFAULT_RANDOM_LENGTH: usize = 10;
/// Longest random identifier the generator will produce.
pub const MAX_RANDOM_LENGTH: usize = 256;
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "YYYYMMDD_hhmmss";

/// How new identifiers are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "IdStyleRepr")]
pub enum IdStyle {
    /// Short pseudo-random alphanumeric string.
    #[default]
    Random,
    /// The note's creation time rendered with `timestamp_format`.
    Timestamp,
}

impl IdStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStyle::Random => "random",
            IdStyle::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for IdStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStyle {
    type Err = NoteIdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "1" => Ok(IdStyle::Random),
            "timestamp" | "2" => Ok(IdStyle::Timestamp),
            other => Err(NoteIdError::invalid_setting(
                "id-style",
                format!("expected 'random' or 'timestamp', got '{}'", other),
            )),
        }
    }
}

/// The old plugin stored the style as `1` / `2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdStyleRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<IdStyleRepr> for IdStyle {
    type Error = NoteIdError;

    fn try_from(repr: IdStyleRepr) -> Result<Self> {
        match repr {
            IdStyleRepr::Code(code) => code.to_string().parse(),
            IdStyleRepr::Name(name) => name.parse(),
        }
    }
}

/// Configuration for noteid, stored in `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteIdConfig {
    pub key: String,
    pub id_style: IdStyle,
    pub random_length: usize,
    pub timestamp_format: String,
    pub path_blacklist: Vec<String>,
    pub path_whitelist: Vec<String>,
    pub property_whitelist: Vec<String>,
}

impl Default for NoteIdConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            id_style: IdStyle::default(),
            random_length: DEFAULT_RANDOM_LENGTH,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            path_blacklist: Vec::new(),
            path_whitelist: Vec::new(),
            property_whitelist: Vec::new(),
        }
    }
}

/// Persisted overrides. Anything absent keeps its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(alias = "uuidKey")]
    pub key: Option<String>,
    #[serde(alias = "uuidStyle")]
    pub id_style: Option<IdStyle>,
    #[serde(alias = "uuidLength")]
    pub random_length: Option<usize>,
    #[serde(alias = "dateFormat")]
    pub timestamp_format: Option<String>,
    #[serde(alias = "blacklist")]
    pub path_blacklist: Option<Vec<String>>,
    #[serde(alias = "whitelist")]
    pub path_whitelist: Option<Vec<String>>,
    #[serde(alias = "propertyWhitelist")]
    pub property_whitelist: Option<Vec<String>>,
}

impl NoteIdConfig {
    /// Defaults with `overrides` laid on top.
    pub fn merged(overrides: ConfigOverrides) -> Self {
        let defaults = Self::default();
        Self {
            key: overrides.key.unwrap_or(defaults.key),
            id_style: overrides.id_style.unwrap_or(defaults.id_style),
            random_length: overrides.random_length.unwrap_or(defaults.random_length),
            timestamp_format: overrides
                .timestamp_format
                .unwrap_or(defaults.timestamp_format),
            path_blacklist: clean_list(overrides.path_blacklist),
            path_whitelist: clean_list(overrides.path_whitelist),
            property_whitelist: clean_list(overrides.property_whitelist),
        }
    }

    /// Random identifier length; never zero, never above [`MAX_RANDOM_LENGTH`].
    pub fn random_length(&self) -> usize {
        match self.random_length {
            0 => DEFAULT_RANDOM_LENGTH,
            n => n.min(MAX_RANDOM_LENGTH),
        }
    }
}

/// Trimmed entries with blanks dropped. A cleared textarea in the old plugin
/// saved `[""]`, and an empty pattern would match every path.
fn clean_list(entries: Option<Vec<String>>) -> Vec<String> {
    entries
        .unwrap_or_default()
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where configuration is persisted.
pub trait SettingsStore {
    /// Load persisted overrides. No saved settings is not an error.
    fn load_config(&self) -> Result<ConfigOverrides>;

    /// Persist the whole configuration.
    fn save_config(&self, config: &NoteIdConfig) -> Result<()>;
}

/// `config.json` inside a settings directory.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    dir: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILENAME)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load_config(&self) -> Result<ConfigOverrides> {
        let path = self.path();
        if !path.exists() {
            return Ok(ConfigOverrides::default());
        }
        let content = fs::read_to_string(&path)?;
        let overrides = serde_json::from_str(&content)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(overrides)
    }

    fn save_config(&self, config: &NoteIdConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(config)?;
        let tmp = self.dir.join(format!(".config-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, self.path())?;
        log::debug!("Saved settings to {}", self.path().display());
        Ok(())
    }
}

/// Settings store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    saved: std::cell::RefCell<Option<NoteIdConfig>>,
    saves: std::cell::Cell<usize>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(config: NoteIdConfig) -> Self {
        let store = Self::default();
        store.saved.replace(Some(config));
        store
    }

    pub fn saved(&self) -> Option<NoteIdConfig> {
        self.saved.borrow().clone()
    }

    /// Number of `save_config` calls.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_config(&self) -> Result<ConfigOverrides> {
        Ok(match self.saved.borrow().as_ref() {
            Some(c) => ConfigOverrides {
                key: Some(c.key.clone()),
                id_style: Some(c.id_style),
                random_length: Some(c.random_length),
                timestamp_format: Some(c.timestamp_format.clone()),
                path_blacklist: Some(c.path_blacklist.clone()),
                path_whitelist: Some(c.path_whitelist.clone()),
                property_whitelist: Some(c.property_whitelist.clone()),
            },
            None => ConfigOverrides::default(),
        })
    }

    fn save_config(&self, config: &NoteIdConfig) -> Result<()> {
        self.saved.replace(Some(config.clone()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NoteIdConfig::default();
        assert_eq!(config.key, "uuid");
        assert_eq!(config.id_style, IdStyle::Random);
        assert_eq!(config.random_length, 10);
        assert_eq!(config.timestamp_format, "YYYYMMDD_hhmmss");
        assert!(config.path_blacklist.is_empty());
        assert!(config.path_whitelist.is_empty());
        assert!(config.property_whitelist.is_empty());
    }

    #[test]
    fn test_merged_keeps_defaults_for_missing_fields() {
        let config = NoteIdConfig::merged(ConfigOverrides {
            key: Some("id".into()),
            path_blacklist: Some(vec!["Templates/".into()]),
            ..Default::default()
        });
        assert_eq!(config.key, "id");
        assert_eq!(config.path_blacklist, vec!["Templates/"]);
        assert_eq!(config.random_length, DEFAULT_RANDOM_LENGTH);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_random_length_never_zero() {
        let config = NoteIdConfig {
            random_length: 0,
            ..Default::default()
        };
        assert_eq!(config.random_length(), DEFAULT_RANDOM_LENGTH);
    }

    #[test]
    fn test_random_length_is_capped() {
        let config = NoteIdConfig {
            random_length: usize::MAX,
            ..Default::default()
        };
        assert_eq!(config.random_length(), MAX_RANDOM_LENGTH);
    }

    #[test]
    fn test_huge_length_from_file_is_capped() {
        let json = r#"{"uuidLength": 18446744073709551615}"#;
        let config = NoteIdConfig::merged(serde_json::from_str(json).unwrap());
        assert_eq!(config.random_length(), MAX_RANDOM_LENGTH);
    }

    #[test]
    fn test_blank_list_entries_from_file_are_dropped() {
        let json = r#"{
            "blacklist": [""],
            "whitelist": ["", "  Projects/ ", "   "],
            "propertyWhitelist": [" "]
        }"#;
        let config = NoteIdConfig::merged(serde_json::from_str(json).unwrap());
        assert!(config.path_blacklist.is_empty());
        assert_eq!(config.path_whitelist, vec!["Projects/"]);
        assert!(config.property_whitelist.is_empty());
    }

    #[test]
    fn test_id_style_parsing() {
        assert_eq!("random".parse::<IdStyle>().unwrap(), IdStyle::Random);
        assert_eq!("Timestamp".parse::<IdStyle>().unwrap(), IdStyle::Timestamp);
        assert_eq!("1".parse::<IdStyle>().unwrap(), IdStyle::Random);
        assert_eq!("2".parse::<IdStyle>().unwrap(), IdStyle::Timestamp);
        assert!("ulid".parse::<IdStyle>().is_err());
    }

    #[test]
    fn test_overrides_accept_legacy_plugin_fields() {
        let json = r#"{
            "uuidKey": "nid",
            "uuidLength": 8,
            "blacklist": ["Archive/"],
            "whitelist": ["Projects/"],
            "uuidStyle": 2,
            "dateFormat": "YYYY-MM-DD"
        }"#;
        let config = NoteIdConfig::merged(serde_json::from_str(json).unwrap());
        assert_eq!(config.key, "nid");
        assert_eq!(config.random_length, 8);
        assert_eq!(config.path_blacklist, vec!["Archive/"]);
        assert_eq!(config.path_whitelist, vec!["Projects/"]);
        assert_eq!(config.id_style, IdStyle::Timestamp);
        assert_eq!(config.timestamp_format, "YYYY-MM-DD");
    }

    #[test]
    fn test_overrides_reject_unknown_style() {
        let parsed: std::result::Result<ConfigOverrides, _> =
            serde_json::from_str(r#"{"id_style": "nanoid"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_json_store_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("nested"));
        assert_eq!(store.load_config().unwrap(), ConfigOverrides::default());
    }

    #[test]
    fn test_json_store_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("settings"));

        let config = NoteIdConfig {
            key: "id".into(),
            id_style: IdStyle::Timestamp,
            property_whitelist: vec!["status".into()],
            ..Default::default()
        };
        store.save_config(&config).unwrap();
        assert!(store.path().exists());

        let loaded = NoteIdConfig::merged(store.load_config().unwrap());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_store_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(dir.path());
        store.save_config(&NoteIdConfig::default()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec![CONFIG_FILENAME.to_string()]);
    }

    #[test]
    fn test_json_store_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{not json").unwrap();
        let store = JsonSettingsStore::new(dir.path());
        assert!(matches!(
            store.load_config(),
            Err(NoteIdError::Serialization(_))
        ));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load_config().unwrap(), ConfigOverrides::default());

        let config = NoteIdConfig {
            random_length: 4,
            ..Default::default()
        };
        store.save_config(&config).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(NoteIdConfig::merged(store.load_config().unwrap()), config);
    }
}
