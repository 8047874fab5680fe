//! Editing configuration field by field.
//!
//! [`SettingsView`] is what a host renders as its settings panel. Every
//! accepted change is normalised, applied to the in-memory configuration and
//! persisted straight away.

use crate::config::{
    IdStyle, NoteIdConfig, SettingsStore, DEFAULT_KEY, DEFAULT_RANDOM_LENGTH,
    DEFAULT_TIMESTAMP_FORMAT, MAX_RANDOM_LENGTH,
};
use crate::error::{NoteIdError, Result};
use crate::ident::{format_datetime, timefmt};
use chrono::Local;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Key,
    IdStyle,
    RandomLength,
    TimestampFormat,
    PathBlacklist,
    PathWhitelist,
    PropertyWhitelist,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::Key,
        SettingField::IdStyle,
        SettingField::RandomLength,
        SettingField::TimestampFormat,
        SettingField::PathBlacklist,
        SettingField::PathWhitelist,
        SettingField::PropertyWhitelist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SettingField::Key => "key",
            SettingField::IdStyle => "id-style",
            SettingField::RandomLength => "random-length",
            SettingField::TimestampFormat => "timestamp-format",
            SettingField::PathBlacklist => "path-blacklist",
            SettingField::PathWhitelist => "path-whitelist",
            SettingField::PropertyWhitelist => "property-whitelist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingField::Key => "Frontmatter field that holds the identifier",
            SettingField::IdStyle => "How identifiers are generated: random or timestamp",
            SettingField::RandomLength => "Length of random identifiers",
            SettingField::TimestampFormat => "Pattern for timestamp identifiers",
            SettingField::PathBlacklist => {
                "Notes whose path contains one of these lines are skipped by \"all notes\""
            }
            SettingField::PathWhitelist => {
                "Notes whose path contains one of these lines are picked by \"whitelist notes\""
            }
            SettingField::PropertyWhitelist => {
                "Whitelisted notes must also carry one of these frontmatter keys"
            }
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            SettingField::PathBlacklist
                | SettingField::PathWhitelist
                | SettingField::PropertyWhitelist
        )
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingField {
    type Err = NoteIdError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| NoteIdError::invalid_setting(s, "unknown setting"))
    }
}

/// One line of the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub field: SettingField,
    pub name: &'static str,
    pub description: String,
    pub value: String,
    pub placeholder: &'static str,
}

pub trait SettingsView {
    fn render(&self) -> Vec<SettingRow>;

    /// Apply a raw value typed by the user and persist the result.
    /// Returns the value as stored.
    fn on_field_change(&mut self, field: SettingField, value: &str) -> Result<String>;
}

pub struct SettingsPanel<'a, S: SettingsStore + ?Sized> {
    config: &'a mut NoteIdConfig,
    store: &'a S,
}

impl<'a, S: SettingsStore + ?Sized> SettingsPanel<'a, S> {
    pub fn new(config: &'a mut NoteIdConfig, store: &'a S) -> Self {
        Self { config, store }
    }

    /// The current value of `field` as shown to the user.
    pub fn value(&self, field: SettingField) -> String {
        value_of(&*self.config, field)
    }
}

fn value_of(config: &NoteIdConfig, field: SettingField) -> String {
    match field {
        SettingField::Key => config.key.clone(),
        SettingField::IdStyle => config.id_style.to_string(),
        SettingField::RandomLength => config.random_length.to_string(),
        SettingField::TimestampFormat => config.timestamp_format.clone(),
        SettingField::PathBlacklist => config.path_blacklist.join("\n"),
        SettingField::PathWhitelist => config.path_whitelist.join("\n"),
        SettingField::PropertyWhitelist => config.property_whitelist.join("\n"),
    }
}

fn placeholder(field: SettingField) -> &'static str {
    match field {
        SettingField::Key => DEFAULT_KEY,
        SettingField::IdStyle => "random",
        SettingField::RandomLength => "10",
        SettingField::TimestampFormat => DEFAULT_TIMESTAMP_FORMAT,
        SettingField::PathBlacklist => "Templates/",
        SettingField::PathWhitelist => "Projects/",
        SettingField::PropertyWhitelist => "status",
    }
}

fn describe(config: &NoteIdConfig, field: SettingField) -> String {
    if field != SettingField::TimestampFormat {
        return field.description().to_string();
    }
    match format_datetime(&Local::now(), &config.timestamp_format) {
        Ok(sample) => format!("{} (now: {})", field.description(), sample),
        Err(_) => format!("{} (current pattern is invalid)", field.description()),
    }
}

fn too_long(field: SettingField) -> NoteIdError {
    NoteIdError::invalid_setting(
        field.name(),
        format!("must be at most {}", MAX_RANDOM_LENGTH),
    )
}

/// One entry per line, trimmed, blanks dropped.
fn parse_list(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl<S: SettingsStore + ?Sized> SettingsView for SettingsPanel<'_, S> {
    fn render(&self) -> Vec<SettingRow> {
        SettingField::ALL
            .into_iter()
            .map(|field| SettingRow {
                field,
                name: field.name(),
                description: describe(&*self.config, field),
                value: value_of(&*self.config, field),
                placeholder: placeholder(field),
            })
            .collect()
    }

    fn on_field_change(&mut self, field: SettingField, value: &str) -> Result<String> {
        let trimmed = value.trim();
        match field {
            SettingField::Key => {
                self.config.key = if trimmed.is_empty() {
                    DEFAULT_KEY.to_string()
                } else {
                    trimmed.to_string()
                };
            }
            SettingField::IdStyle => {
                self.config.id_style = trimmed.parse::<IdStyle>()?;
            }
            SettingField::RandomLength => {
                self.config.random_length = match trimmed.parse::<usize>() {
                    Ok(n) if n > MAX_RANDOM_LENGTH => return Err(too_long(field)),
                    Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                        return Err(too_long(field))
                    }
                    Ok(n) if n > 0 => n,
                    _ => DEFAULT_RANDOM_LENGTH,
                };
            }
            SettingField::TimestampFormat => {
                if trimmed.is_empty() {
                    self.config.timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
                } else {
                    timefmt::validate(trimmed).map_err(|e| {
                        NoteIdError::invalid_setting(field.name(), e.to_string())
                    })?;
                    self.config.timestamp_format = trimmed.to_string();
                }
            }
            SettingField::PathBlacklist => self.config.path_blacklist = parse_list(value),
            SettingField::PathWhitelist => self.config.path_whitelist = parse_list(value),
            SettingField::PropertyWhitelist => {
                self.config.property_whitelist = parse_list(value)
            }
        }

        self.store.save_config(&*self.config)?;
        log::debug!("Setting {} changed", field);
        Ok(value_of(&*self.config, field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemorySettingsStore;

    fn change(
        config: &mut NoteIdConfig,
        store: &MemorySettingsStore,
        field: SettingField,
        value: &str,
    ) -> Result<String> {
        SettingsPanel::new(config, store).on_field_change(field, value)
    }

    #[test]
    fn test_field_names_parse() {
        for field in SettingField::ALL {
            assert_eq!(field.name().parse::<SettingField>().unwrap(), field);
        }
        assert_eq!(
            "random_length".parse::<SettingField>().unwrap(),
            SettingField::RandomLength
        );
        assert!("colour".parse::<SettingField>().is_err());
    }

    #[test]
    fn test_render_lists_every_field() {
        let mut config = NoteIdConfig {
            path_blacklist: vec!["a/".into(), "b/".into()],
            ..Default::default()
        };
        let store = MemorySettingsStore::new();
        let rows = SettingsPanel::new(&mut config, &store).render();

        assert_eq!(rows.len(), SettingField::ALL.len());
        assert_eq!(rows[0].value, "uuid");
        let blacklist = rows
            .iter()
            .find(|r| r.field == SettingField::PathBlacklist)
            .unwrap();
        assert_eq!(blacklist.value, "a/\nb/");
        let format = rows
            .iter()
            .find(|r| r.field == SettingField::TimestampFormat)
            .unwrap();
        assert!(format.description.contains("(now: "));
    }

    #[test]
    fn test_every_change_is_saved() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();

        change(&mut config, &store, SettingField::Key, "  nid ").unwrap();
        change(&mut config, &store, SettingField::IdStyle, "timestamp").unwrap();

        assert_eq!(store.save_count(), 2);
        let saved = store.saved().unwrap();
        assert_eq!(saved.key, "nid");
        assert_eq!(saved.id_style, IdStyle::Timestamp);
        assert_eq!(saved, config);
    }

    #[test]
    fn test_blank_key_resets_to_default() {
        let mut config = NoteIdConfig {
            key: "nid".into(),
            ..Default::default()
        };
        let store = MemorySettingsStore::new();
        assert_eq!(change(&mut config, &store, SettingField::Key, "  ").unwrap(), "uuid");
        assert_eq!(config.key, "uuid");
    }

    #[test]
    fn test_bad_length_resets_to_default() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();

        assert_eq!(change(&mut config, &store, SettingField::RandomLength, "16").unwrap(), "16");
        assert_eq!(config.random_length, 16);

        change(&mut config, &store, SettingField::RandomLength, "abc").unwrap();
        assert_eq!(config.random_length, DEFAULT_RANDOM_LENGTH);

        change(&mut config, &store, SettingField::RandomLength, "16").unwrap();
        change(&mut config, &store, SettingField::RandomLength, "0").unwrap();
        assert_eq!(config.random_length, DEFAULT_RANDOM_LENGTH);
        assert_eq!(store.save_count(), 4);
    }

    #[test]
    fn test_oversized_length_is_rejected_without_saving() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();

        for value in ["18446744073709551615", "99999999999999999999999", "257"] {
            let err = change(&mut config, &store, SettingField::RandomLength, value).unwrap_err();
            assert!(matches!(err, NoteIdError::InvalidSetting { .. }));
        }
        assert_eq!(config.random_length, DEFAULT_RANDOM_LENGTH);
        assert_eq!(store.save_count(), 0);

        change(&mut config, &store, SettingField::RandomLength, "256").unwrap();
        assert_eq!(config.random_length, MAX_RANDOM_LENGTH);
    }

    #[test]
    fn test_lists_split_on_lines() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();

        change(
            &mut config,
            &store,
            SettingField::PathBlacklist,
            "Templates/\n\n  Archive/  \r\n",
        )
        .unwrap();
        assert_eq!(config.path_blacklist, vec!["Templates/", "Archive/"]);

        change(&mut config, &store, SettingField::PropertyWhitelist, "").unwrap();
        assert!(config.property_whitelist.is_empty());
    }

    #[test]
    fn test_invalid_style_is_rejected_without_saving() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();
        assert!(change(&mut config, &store, SettingField::IdStyle, "nanoid").is_err());
        assert_eq!(config.id_style, IdStyle::Random);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_timestamp_format_rules() {
        let mut config = NoteIdConfig::default();
        let store = MemorySettingsStore::new();

        change(&mut config, &store, SettingField::TimestampFormat, "YYYY-MM-DD").unwrap();
        assert_eq!(config.timestamp_format, "YYYY-MM-DD");

        let err = change(&mut config, &store, SettingField::TimestampFormat, "%Q").unwrap_err();
        assert!(matches!(err, NoteIdError::InvalidSetting { .. }));
        assert_eq!(config.timestamp_format, "YYYY-MM-DD");
        assert_eq!(store.save_count(), 1);

        change(&mut config, &store, SettingField::TimestampFormat, " ").unwrap();
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }
}
