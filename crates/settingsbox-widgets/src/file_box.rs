//! File path selector bound to one text setting

use crate::error::{WidgetError, WidgetResult};
use crate::line_edit::{FieldStyle, LineEdit};
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{SettingValue, Settings};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which action buttons a file box shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileBoxMode {
    Save,
    Load,
    Both,
    /// Selection only
    #[default]
    None,
}

impl FileBoxMode {
    pub fn has_save(&self) -> bool {
        matches!(self, Self::Save | Self::Both)
    }

    pub fn has_load(&self) -> bool {
        matches!(self, Self::Load | Self::Both)
    }

    /// Only a load-only box picks existing files
    pub fn uses_save_dialog(&self) -> bool {
        !matches!(self, Self::Load)
    }
}

impl FromStr for FileBoxMode {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "save" => Ok(Self::Save),
            "load" => Ok(Self::Load),
            "both" => Ok(Self::Both),
            "none" => Ok(Self::None),
            other => Err(WidgetError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for FileBoxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Save => "save",
            Self::Load => "load",
            Self::Both => "both",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// One named group of file patterns, e.g. `Images (*.png *.jpg)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the `*.` prefix; `*` matches everything
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Parse a Qt-style filter string; groups are separated by `;;`
    ///
    /// A bare pattern list such as `*` or `*.txt *.md` becomes one group
    /// named after the patterns.
    pub fn parse_list(filter: &str) -> Vec<FileFilter> {
        filter
            .split(";;")
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(|group| match (group.find('('), group.rfind(')')) {
                (Some(open), Some(close)) if open < close => FileFilter {
                    name: group[..open].trim().to_string(),
                    extensions: patterns(&group[open + 1..close]),
                },
                _ => FileFilter {
                    name: group.to_string(),
                    extensions: patterns(group),
                },
            })
            .collect()
    }

    pub fn matches_all(&self) -> bool {
        self.extensions.iter().any(|e| e == "*")
    }
}

fn patterns(list: &str) -> Vec<String> {
    list.split_whitespace()
        .map(|p| p.strip_prefix("*.").unwrap_or(p).to_string())
        .collect()
}

/// Source of file paths, normally a native dialog
pub trait FileChooser {
    /// Ask for a destination path; `None` when cancelled
    fn choose_save(&self, directory: &Path, filters: &[FileFilter]) -> Option<PathBuf>;

    /// Ask for an existing file; `None` when cancelled
    fn choose_open(&self, directory: &Path, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Read-only path field with a select button and optional save/load buttons
pub struct SettingsFileBox {
    settings: Shared<Settings>,
    key: String,
    system_path: PathBuf,
    filters: Vec<FileFilter>,
    mode: FileBoxMode,
    edit: LineEdit,
    save_callbacks: Callbacks,
    load_callbacks: Callbacks,
}

impl SettingsFileBox {
    /// Bind to `key`; dialogs start in `system_path`
    pub fn new(
        settings: Shared<Settings>,
        key: impl Into<String>,
        system_path: impl Into<PathBuf>,
        filter: &str,
        mode: FileBoxMode,
    ) -> WidgetResult<Self> {
        let key = key.into();
        let text = settings.borrow().get(&key)?.to_string();
        Ok(Self {
            settings,
            key,
            system_path: system_path.into(),
            filters: FileFilter::parse_list(filter),
            mode,
            edit: LineEdit::new(text).read_only(),
            save_callbacks: Callbacks::new(),
            load_callbacks: Callbacks::new(),
        })
    }

    /// Run `callback` when the save button is pressed
    pub fn with_save_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.save_callbacks.push(move |_: &()| callback());
        self
    }

    /// Run `callback` when the load button is pressed
    pub fn with_load_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.load_callbacks.push(move |_: &()| callback());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> FileBoxMode {
        self.mode
    }

    pub fn system_path(&self) -> &Path {
        &self.system_path
    }

    pub fn filters(&self) -> &[FileFilter] {
        &self.filters
    }

    pub fn text(&self) -> &str {
        self.edit.text()
    }

    pub fn style(&self) -> FieldStyle {
        self.edit.style()
    }

    pub fn has_save_button(&self) -> bool {
        self.mode.has_save()
    }

    pub fn has_load_button(&self) -> bool {
        self.mode.has_load()
    }

    /// Save button pressed; returns false when the mode has no save button
    pub fn save(&self) -> bool {
        if !self.mode.has_save() {
            return false;
        }
        self.save_callbacks.fire();
        true
    }

    /// Load button pressed; returns false when the mode has no load button
    pub fn load(&self) -> bool {
        if !self.mode.has_load() {
            return false;
        }
        self.load_callbacks.fire();
        true
    }

    /// Select button pressed; returns whether a path was committed
    ///
    /// The field is reset to normal whether or not the dialog was cancelled.
    pub fn select(&mut self, chooser: &dyn FileChooser) -> bool {
        let selected = if self.mode.uses_save_dialog() {
            chooser.choose_save(&self.system_path, &self.filters)
        } else {
            chooser.choose_open(&self.system_path, &self.filters)
        };
        let committed = match selected {
            Some(path) => {
                let text = path.to_string_lossy().into_owned();
                tracing::debug!(key = %self.key, path = %text, "file selected");
                self.settings
                    .borrow_mut()
                    .set(self.key.clone(), SettingValue::Text(text.clone()));
                self.edit.set_text(text);
                true
            }
            None => false,
        };
        self.edit.set_style(FieldStyle::Normal);
        committed
    }

    /// The owner found the selected file unusable
    pub fn notify_bad_selection(&mut self) {
        self.edit.set_style(FieldStyle::Invalid);
    }
}

#[cfg(feature = "native-dialogs")]
pub use native::NativeFileChooser;

#[cfg(feature = "native-dialogs")]
mod native {
    use super::{FileChooser, FileFilter};
    use std::path::{Path, PathBuf};

    /// Platform file dialogs through `rfd`
    #[derive(Debug, Clone, Default)]
    pub struct NativeFileChooser {
        title: Option<String>,
    }

    impl NativeFileChooser {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_title(mut self, title: impl Into<String>) -> Self {
            self.title = Some(title.into());
            self
        }

        fn dialog(&self, directory: &Path, filters: &[FileFilter]) -> rfd::FileDialog {
            let mut dialog = rfd::FileDialog::new().set_directory(directory);
            if let Some(title) = &self.title {
                dialog = dialog.set_title(title.as_str());
            }
            for filter in filters.iter().filter(|f| !f.matches_all()) {
                dialog = dialog.add_filter(filter.name.as_str(), filter.extensions.as_slice());
            }
            dialog
        }
    }

    impl FileChooser for NativeFileChooser {
        fn choose_save(&self, directory: &Path, filters: &[FileFilter]) -> Option<PathBuf> {
            self.dialog(directory, filters).save_file()
        }

        fn choose_open(&self, directory: &Path, filters: &[FileFilter]) -> Option<PathBuf> {
            self.dialog(directory, filters).pick_file()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("save".parse::<FileBoxMode>().unwrap(), FileBoxMode::Save);
        assert_eq!("none".parse::<FileBoxMode>().unwrap(), FileBoxMode::None);
        assert!(matches!(
            "Save".parse::<FileBoxMode>(),
            Err(WidgetError::InvalidMode(m)) if m == "Save"
        ));
        assert_eq!(FileBoxMode::Both.to_string(), "both");
    }

    #[test]
    fn test_mode_buttons_and_dialog() {
        assert!(FileBoxMode::Both.has_save() && FileBoxMode::Both.has_load());
        assert!(!FileBoxMode::None.has_save() && !FileBoxMode::None.has_load());
        assert!(FileBoxMode::None.uses_save_dialog());
        assert!(FileBoxMode::Save.uses_save_dialog());
        assert!(!FileBoxMode::Load.uses_save_dialog());
    }

    #[test]
    fn test_filter_parsing() {
        let filters = FileFilter::parse_list("Images (*.png *.jpg);;All files (*)");
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].name, "Images");
        assert_eq!(filters[0].extensions, vec!["png", "jpg"]);
        assert!(filters[1].matches_all());

        let star = FileFilter::parse_list("*");
        assert_eq!(star.len(), 1);
        assert!(star[0].matches_all());

        assert!(FileFilter::parse_list("").is_empty());
    }
}
