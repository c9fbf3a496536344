//! Error types for the widget models.
//!
//! These cover construction problems (missing keys, bad options). Rejected
//! user input is never an error: it only changes the field's style.

use settingsbox_settings::{SettingsError, ValueKind};
use thiserror::Error;

/// Errors raised while building or driving a widget model.
#[derive(Error, Debug)]
pub enum WidgetError {
    /// The bound settings key is missing or has the wrong type.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A color could not be parsed.
    #[error(transparent)]
    Color(#[from] settingsbox_core::Error),

    /// The file box mode string is not one of save/load/both/none.
    #[error("File box mode must be one of save, load, both, none (got '{0}')")]
    InvalidMode(String),

    /// The current setting value is not among the combo box options.
    #[error("Value '{value}' of '{key}' is not one of the options")]
    OptionNotFound { key: String, value: String },

    /// An option index past the end of the list.
    #[error("Option index {index} out of range ({len} options)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The widget cannot edit values of this kind.
    #[error("Unsupported value kind for this widget: {0}")]
    UnsupportedKind(ValueKind),

    /// Plot data is empty, ragged or has no finite values.
    #[error("Invalid plot data: {0}")]
    InvalidData(String),

    /// A vector component index outside 0..3.
    #[error("Vector component {0} out of range")]
    ComponentOutOfRange(usize),
}

/// Result type alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;
