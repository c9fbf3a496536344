//! Two-state check box bound to a bool setting

use crate::error::WidgetResult;
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{SettingValue, Settings};

pub struct SettingsCheckBox {
    settings: Shared<Settings>,
    key: String,
    label: String,
    checked: bool,
    callbacks: Callbacks<bool>,
}

impl SettingsCheckBox {
    pub fn new(
        settings: Shared<Settings>,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> WidgetResult<Self> {
        let key = key.into();
        let checked = settings.borrow().get_bool(&key)?;
        Ok(Self {
            settings,
            key,
            label: label.into(),
            checked,
            callbacks: Callbacks::new(),
        })
    }

    /// Run `callback` with the new state after each change
    pub fn with_callback<F: Fn(&bool) + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns whether the state changed
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if checked == self.checked {
            return false;
        }
        self.checked = checked;
        tracing::debug!(key = %self.key, checked, "check box committed");
        self.settings
            .borrow_mut()
            .set(self.key.clone(), SettingValue::Bool(checked));
        self.callbacks.invoke(&checked);
        true
    }

    pub fn toggle(&mut self) {
        self.set_checked(!self.checked);
    }
}
