//! Settings store
//!
//! [`Settings`] wraps a string-keyed map of [`SettingValue`]s together with
//! an optional backing file. Values are read and written with explicit
//! [`Settings::get`] / [`Settings::set`]; `settings["key"]` is available as
//! sugar and, like `HashMap` indexing, panics when the key is absent. There
//! are no reserved key names.
//!
//! Nested maps are always held as nested stores (`SettingValue::Nested`).
//! Loading upconverts maps found in the file; saving flattens them back.
//!
//! ```rust
//! use settingsbox_settings::{Settings, SettingValue};
//!
//! let mut settings = Settings::with_defaults([("gain", SettingValue::Float(1.5))]);
//! settings.set("label", "camera");
//! assert_eq!(settings.get_float("gain").unwrap(), 1.5);
//! assert!(settings.get("missing").is_err());
//! ```

use crate::error::{SettingsError, SettingsResult};
use crate::persistence;
use crate::value::{SettingValue, SettingsMap, StoredMap, StoredValue};
use settingsbox_core::types::Shared;
use std::collections::{BTreeSet, HashMap};
use std::ops::Index;
use std::path::{Path, PathBuf};

/// Key/value settings with optional file backing
#[derive(Debug, Clone, Default)]
pub struct Settings {
    entries: HashMap<String, SettingValue>,
    settings_path: Option<PathBuf>,
}

impl Settings {
    /// Create an empty store with no backing file
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `defaults`
    pub fn with_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let mut settings = Self::new();
        settings.update(defaults);
        settings
    }

    /// Create a store backed by `path`, seeded with `defaults`, and load the
    /// file over the defaults if it can be read
    ///
    /// A missing or corrupt file is not an error: the store keeps its
    /// defaults. Use [`Settings::open`] to see the failure.
    pub fn open_or_default<P, I, K, V>(path: P, defaults: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let mut settings = Self::with_defaults(defaults);
        let path = path.into();
        match settings.load(&path) {
            Ok(()) => {}
            Err(SettingsError::Deserialize { reason, .. }) if !path.exists() => {
                tracing::debug!(
                    path = %path.display(),
                    %reason,
                    "no settings file, using defaults"
                );
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable settings file"
                );
            }
        }
        settings.settings_path = Some(path);
        settings
    }

    /// Like [`Settings::open_or_default`], but a file that cannot be read or
    /// decoded is an error
    pub fn open<P, I, K, V>(path: P, defaults: I) -> SettingsResult<Self>
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let mut settings = Self::with_defaults(defaults);
        let path = path.into();
        settings.load(&path)?;
        settings.settings_path = Some(path);
        Ok(settings)
    }

    /// Build a store from its on-disk form, upconverting nested maps
    pub fn from_stored(entries: StoredMap) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key, SettingValue::from(value)))
                .collect(),
            settings_path: None,
        }
    }

    /// Flatten the store into its on-disk form
    pub fn to_stored(&self) -> StoredMap {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_stored()))
            .collect()
    }

    /// Default save/load target
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    pub fn set_settings_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.settings_path = Some(path.into());
    }

    pub fn clear_settings_path(&mut self) {
        self.settings_path = None;
    }

    /// Current value of `key`
    pub fn get(&self, key: &str) -> SettingsResult<&SettingValue> {
        self.entries
            .get(key)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> SettingsResult<&mut SettingValue> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    fn get_as<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl FnOnce(&SettingValue) -> Option<T>,
    ) -> SettingsResult<T> {
        let value = self.get(key)?;
        convert(value).ok_or_else(|| SettingsError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: value.kind_name(),
        })
    }

    pub fn get_int(&self, key: &str) -> SettingsResult<i64> {
        self.get_as(key, "int", SettingValue::as_int)
    }

    /// Float value of `key`; integers are promoted
    pub fn get_float(&self, key: &str) -> SettingsResult<f64> {
        self.get_as(key, "float", SettingValue::as_float)
    }

    pub fn get_text(&self, key: &str) -> SettingsResult<String> {
        self.get_as(key, "text", |v| v.as_text().map(str::to_string))
    }

    pub fn get_bool(&self, key: &str) -> SettingsResult<bool> {
        self.get_as(key, "bool", SettingValue::as_bool)
    }

    pub fn get_vector(&self, key: &str) -> SettingsResult<[f64; 3]> {
        self.get_as(key, "vector", SettingValue::as_vector)
    }

    /// Handle to the nested store at `key`
    pub fn get_nested(&self, key: &str) -> SettingsResult<Shared<Settings>> {
        self.get_as(key, "nested", |v| v.as_nested().cloned())
    }

    /// Resolve a dotted path (`"outer.inner.key"`) through nested stores
    ///
    /// A key stored with dots in its name matches before any traversal.
    pub fn lookup(&self, path: &str) -> SettingsResult<SettingValue> {
        if let Some(value) = self.entries.get(path) {
            return Ok(value.clone());
        }
        let not_found = || SettingsError::KeyNotFound(path.to_string());
        let (head, rest) = path.split_once('.').ok_or_else(not_found)?;
        let nested = self
            .entries
            .get(head)
            .and_then(SettingValue::as_nested)
            .ok_or_else(not_found)?;
        nested.borrow().lookup(rest).map_err(|_| not_found())
    }

    /// Insert or overwrite `key`; the value is not checked against what was
    /// there before
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<SettingValue>,
    {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currently defined keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `mapping` into the store, overwriting existing keys
    pub fn update<I, K, V>(&mut self, mapping: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        self.entries
            .extend(mapping.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Insert every key of `defaults` that is not already present
    ///
    /// Existing keys keep their values. Returns all candidate keys, inserted
    /// or not.
    pub fn establish_defaults<I, K, V>(&mut self, defaults: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SettingValue>,
    {
        let mut candidates = BTreeSet::new();
        for (key, value) in defaults {
            let key = key.into();
            if !self.entries.contains_key(&key) {
                self.entries.insert(key.clone(), value.into());
            }
            candidates.insert(key);
        }
        candidates
    }

    /// Copy of just the requested keys
    pub fn get_subset<I, K>(&self, keys: I) -> SettingsResult<SettingsMap>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                Ok((key.to_string(), self.get(key)?.clone()))
            })
            .collect()
    }

    /// Read `path` and merge its entries into the store
    ///
    /// Nested maps in the file become new nested stores, replacing whatever
    /// was at those keys. Use [`Settings::reload`] to keep existing nested
    /// stores alive.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> SettingsResult<()> {
        let path = path.as_ref();
        let stored = persistence::read_entries(path)?;
        self.merge_stored(stored);
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(())
    }

    /// `update` with on-disk entries, upconverting nested maps
    pub(crate) fn merge_stored(&mut self, stored: StoredMap) {
        self.update(Settings::from_stored(stored).entries);
    }

    /// Read `path` and merge its entries in place
    ///
    /// Where the store already holds a nested store and the file holds a map
    /// for the same key, the map is merged into the existing nested store (by
    /// the same rule, recursively), so handles to it stay valid. Every other
    /// key is inserted or overwritten.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> SettingsResult<()> {
        let path = path.as_ref();
        let stored = persistence::read_entries(path)?;
        self.merge_in_place(stored);
        tracing::debug!(path = %path.display(), "reloaded settings in place");
        Ok(())
    }

    fn merge_in_place(&mut self, stored: StoredMap) {
        for (key, value) in stored {
            match (self.entries.get(&key), value) {
                (Some(SettingValue::Nested(existing)), StoredValue::Map(map)) => {
                    existing.borrow_mut().merge_in_place(map);
                }
                (_, value) => {
                    self.entries.insert(key, SettingValue::from(value));
                }
            }
        }
    }

    /// Write the whole store to its backing path
    pub fn save(&self) -> SettingsResult<()> {
        let path = self
            .settings_path
            .as_deref()
            .ok_or(SettingsError::NoDestinationPath)?;
        self.save_to(path)
    }

    /// Write the whole store to `path`
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> SettingsResult<()> {
        persistence::write_entries(path.as_ref(), &self.to_stored())
    }
}

impl PartialEq for Settings {
    /// Stores are equal when their entries are; the backing path is ignored
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Index<&str> for Settings {
    type Output = SettingValue;

    fn index(&self, key: &str) -> &SettingValue {
        match self.entries.get(key) {
            Some(value) => value,
            None => panic!("no setting named '{}'", key),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Settings
where
    K: Into<String>,
    V: Into<SettingValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_defaults(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let settings = Settings::new();
        assert!(matches!(
            settings.get("x"),
            Err(SettingsError::KeyNotFound(ref k)) if k == "x"
        ));
    }

    #[test]
    fn test_set_then_get() {
        let mut settings = Settings::new();
        settings.set("x", 5);
        assert_eq!(settings.get("x").unwrap(), &SettingValue::Int(5));
        settings.set("x", "now text");
        assert_eq!(settings.get_text("x").unwrap(), "now text");
    }

    #[test]
    fn test_typed_getter_mismatch() {
        let settings = Settings::with_defaults([("x", 1)]);
        let err = settings.get_bool("x").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::TypeMismatch {
                expected: "bool",
                found: "int",
                ..
            }
        ));
        assert_eq!(settings.get_float("x").unwrap(), 1.0);
    }

    #[test]
    fn test_lookup_dotted_path() {
        let mut inner = Settings::new();
        inner.set("line_width", 2.5);
        let mut settings = Settings::new();
        settings.set("plot", inner);

        assert_eq!(settings.lookup("plot.line_width").unwrap(), SettingValue::Float(2.5));
        assert!(matches!(
            settings.lookup("plot.width"),
            Err(SettingsError::KeyNotFound(ref k)) if k == "plot.width"
        ));
        assert!(settings.lookup("line_width.plot").is_err());
    }

    #[test]
    fn test_lookup_prefers_literal_dotted_key() {
        let mut settings = Settings::new();
        settings.set("plot.color", "red");
        assert_eq!(settings.lookup("plot.color").unwrap(), SettingValue::from("red"));

        let mut inner = Settings::new();
        inner.set("color", "blue");
        settings.set("plot", inner);
        assert_eq!(settings.lookup("plot.color").unwrap(), SettingValue::from("red"));

        settings.remove("plot.color");
        assert_eq!(settings.lookup("plot.color").unwrap(), SettingValue::from("blue"));
    }

    #[test]
    #[should_panic(expected = "no setting named 'ghost'")]
    fn test_index_panics_on_missing_key() {
        let settings = Settings::new();
        let _ = &settings["ghost"];
    }

    #[test]
    fn test_index_reads_value() {
        let settings: Settings = [("name", "camera")].into_iter().collect();
        assert_eq!(settings["name"], SettingValue::from("camera"));
    }

    #[test]
    fn test_merge_in_place_inserts_new_nested_keys() {
        let mut settings = Settings::new();
        let mut map = StoredMap::new();
        map.insert("fresh".to_string(), StoredValue::Map(StoredMap::new()));
        settings.merge_in_place(map);
        assert!(settings.get_nested("fresh").is_ok());
    }
}
