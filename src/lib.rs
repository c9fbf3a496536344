//! # settingsbox
//!
//! Persistent application settings for desktop tools:
//! - A string-keyed store of ints, floats, text, bools, 3-vectors and nested stores
//! - Binary persistence with best-effort loading and in-place reload
//! - Defaults that fill gaps without overwriting saved values
//! - JSON/TOML export and import
//! - Toolkit-independent widget models bound to store keys
//!
//! ## Architecture
//!
//! settingsbox is organized as a workspace with multiple crates:
//!
//! 1. **settingsbox-core** - Shared-state aliases, callback lists, colors
//! 2. **settingsbox-settings** - The settings store, persistence, export
//! 3. **settingsbox-widgets** - Entry, range, file, combo, vector, check box,
//!    color, slider, indicator and plot models
//! 4. **settingsbox** - This crate and the `settingsbox` command line tool

pub use settingsbox_core::{shared, Callbacks, Color, Shared};
pub use settingsbox_settings::{
    default_settings_path, SettingValue, Settings, SettingsError, SettingsResult, StoredValue,
    TextFormat, ValueKind,
};
pub use settingsbox_widgets as widgets;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Application name used for the configuration directory
pub const APP_NAME: &str = "settingsbox";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout for command output
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
