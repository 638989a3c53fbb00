//! Last-used command settings, keyed by store key.
//!
//! The store lives in memory; hosts that want persistence round-trip it
//! through TOML:
//!
//! ```toml
//! [sort.sort]
//! case-insensitive = true
//! sort-by = "selections"
//! ```

use std::collections::BTreeMap;

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::sort::SortSettings;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to parse settings: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("failed to serialize settings: {0}")]
  Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsStore {
  sort: BTreeMap<String, SortSettings>,
}

impl SettingsStore {
  /// Settings last stored under `key`, or the defaults.
  pub fn read(&self, key: &str) -> SortSettings {
    self.sort.get(key).copied().unwrap_or_default()
  }

  pub fn store(&mut self, key: &str, settings: SortSettings) {
    tracing::debug!(key, ?settings, "storing sort settings");
    self.sort.insert(key.to_owned(), settings);
  }

  pub fn from_toml_str(text: &str) -> Result<Self> {
    Ok(toml::from_str(text)?)
  }

  pub fn to_toml_string(&self) -> Result<String> {
    Ok(toml::to_string(self)?)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::sort::SortBy;

  #[test]
  fn test_read_missing_key_gives_defaults() {
    let store = SettingsStore::default();
    assert_eq!(store.read("sort"), SortSettings::default());
  }

  #[test]
  fn test_store_and_read() {
    let mut store = SettingsStore::default();
    let settings = SortSettings {
      reverse: true,
      ..SortSettings::default()
    };
    store.store("sort", settings);
    assert_eq!(store.read("sort"), settings);
    assert_eq!(store.read("other"), SortSettings::default());
  }

  #[test]
  fn test_parse_partial_tables() {
    let store = SettingsStore::from_toml_str(
      r#"
        [sort.sort]
        case-insensitive = true
        sort-by = "selections"

        [sort.reverse-lines]
        reverse = true
      "#,
    )
    .unwrap();

    assert_eq!(store.read("sort"), SortSettings {
      case_insensitive: true,
      sort_by: SortBy::Selections,
      ..SortSettings::default()
    });
    assert!(store.read("reverse-lines").reverse);
  }

  #[test]
  fn test_toml_round_trip() {
    let mut store = SettingsStore::default();
    store.store("sort", SortSettings {
      natural_order: true,
      remove_duplicates: true,
      ..SortSettings::default()
    });
    let text = store.to_toml_string().unwrap();
    assert!(text.contains("natural-order = true"));
    assert_eq!(SettingsStore::from_toml_str(&text).unwrap(), store);
  }

  #[test]
  fn test_parse_errors() {
    assert!(matches!(
      SettingsStore::from_toml_str("[sort.sort]\nsort-by = \"columns\""),
      Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
      SettingsStore::from_toml_str("unknown = 1"),
      Err(ConfigError::Parse(_))
    ));
  }
}
