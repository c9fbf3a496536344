//! Human-readable export and import
//!
//! Next to the binary file a store can be written to, and merged from, JSON
//! or TOML. The format follows the file extension.

use crate::error::{SettingsError, SettingsResult};
use crate::store::Settings;
use crate::value::{StoredMap, StoredValue};
use std::path::Path;

/// Text format for export/import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Json,
    Toml,
}

impl TextFormat {
    /// Pick the format from the extension of `path`
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(format!(
                "{} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}

impl std::str::FromStr for TextFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> SettingsResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Render stored entries as text
pub fn render(entries: &StoredMap, format: TextFormat) -> SettingsResult<String> {
    let value = StoredValue::Map(entries.clone()).to_json("")?;
    let text = match format {
        TextFormat::Json => serde_json::to_string_pretty(&value)?,
        TextFormat::Toml => toml::to_string_pretty(&value)?,
    };
    Ok(text)
}

/// Parse text produced by [`render`] (or written by hand)
pub fn parse(text: &str, format: TextFormat) -> SettingsResult<StoredMap> {
    let value: serde_json::Value = match format {
        TextFormat::Json => serde_json::from_str(text)?,
        TextFormat::Toml => toml::from_str(text)?,
    };
    match StoredValue::from_json("", value)? {
        StoredValue::Map(map) => Ok(map),
        other => Err(SettingsError::InvalidValue {
            key: String::new(),
            reason: format!("top level must be a table, found {:?}", other),
        }),
    }
}

impl Settings {
    /// Render the store as JSON or TOML
    pub fn render(&self, format: TextFormat) -> SettingsResult<String> {
        render(&self.to_stored(), format)
    }

    /// Write the store to `path` as JSON or TOML, chosen by extension
    pub fn export<P: AsRef<Path>>(&self, path: P) -> SettingsResult<()> {
        let path = path.as_ref();
        let text = self.render(TextFormat::from_path(path)?)?;
        std::fs::write(path, text)?;
        tracing::debug!(path = %path.display(), "exported settings");
        Ok(())
    }

    /// Merge a JSON or TOML file into the store, like [`Settings::load`]
    pub fn import<P: AsRef<Path>>(&mut self, path: P) -> SettingsResult<()> {
        let path = path.as_ref();
        let format = TextFormat::from_path(path)?;
        let text = std::fs::read_to_string(path)?;
        let entries = parse(&text, format)?;
        self.merge_stored(entries);
        tracing::debug!(path = %path.display(), "imported settings");
        Ok(())
    }
}
