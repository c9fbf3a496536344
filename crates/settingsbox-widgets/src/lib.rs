//! settingsbox Widgets Crate
//!
//! Toolkit-independent models of widgets bound to a shared [`Settings`]
//! store. Each model reads its key(s) when built and writes edits back,
//! running its callbacks after the store has been updated. A GUI layer
//! forwards events (text edited, button clicked, wheel, focus) and renders
//! the model's text and [`FieldStyle`].
//!
//! Native file dialogs are available with the `native-dialogs` feature.
//!
//! [`Settings`]: settingsbox_settings::Settings

pub mod check_box;
pub mod color_button;
pub mod combo_box;
pub mod entry_box;
pub mod error;
pub mod file_box;
pub mod focus;
pub mod indicator;
pub mod line_edit;
pub mod plot;
pub mod range_box;
pub mod slider;
pub mod validator;
pub mod vector_box;

pub use check_box::SettingsCheckBox;
pub use color_button::{ColorChooser, ColorEntryButton};
pub use combo_box::SettingsComboBox;
pub use entry_box::SettingsEntryBox;
pub use error::{WidgetError, WidgetResult};
#[cfg(feature = "native-dialogs")]
pub use file_box::NativeFileChooser;
pub use file_box::{FileBoxMode, FileChooser, FileFilter, SettingsFileBox};
pub use focus::{FocusGuard, FocusPolicy};
pub use indicator::Indicator;
pub use line_edit::{FieldStyle, LineEdit};
pub use plot::{AxesRect, Extent, ImagePlot, Origin, PlotCanvas};
pub use range_box::SettingsRangeBox;
pub use slider::{DelayedSlider, HumbleSlider, DEFAULT_TIME_DELAY};
pub use validator::{DoubleValidator, IntValidator, Ip4Validator, ValidationState, Validator};
pub use vector_box::SettingsVectorBox;
