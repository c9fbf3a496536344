//! Drop-down choice bound to one setting

use crate::error::{WidgetError, WidgetResult};
use crate::focus::FocusGuard;
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{SettingValue, Settings};

/// Labelled list of text options; the selection is stored as the option text
///
/// Callbacks receive the new index after the option has been committed.
pub struct SettingsComboBox {
    settings: Shared<Settings>,
    key: String,
    label: String,
    options: Vec<String>,
    index: usize,
    focus: FocusGuard,
    callbacks: Callbacks<usize>,
}

impl SettingsComboBox {
    /// Bind to `key`, whose current value must be one of `options`
    pub fn new<I, S>(
        settings: Shared<Settings>,
        label: impl Into<String>,
        key: impl Into<String>,
        options: I,
    ) -> WidgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let current = settings.borrow().get(&key)?.to_string();
        let index = options
            .iter()
            .position(|o| *o == current)
            .ok_or_else(|| WidgetError::OptionNotFound {
                key: key.clone(),
                value: current,
            })?;
        Ok(Self {
            settings,
            key,
            label: label.into(),
            options,
            index,
            focus: FocusGuard::new(),
            callbacks: Callbacks::new(),
        })
    }

    pub fn with_callback<F: Fn(&usize) + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(callback);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_text(&self) -> &str {
        &self.options[self.index]
    }

    pub fn focus_mut(&mut self) -> &mut FocusGuard {
        &mut self.focus
    }

    /// Pick option `index`
    pub fn select(&mut self, index: usize) -> WidgetResult<()> {
        let option = self.options.get(index).ok_or(WidgetError::IndexOutOfRange {
            index,
            len: self.options.len(),
        })?;
        if index == self.index {
            return Ok(());
        }
        tracing::debug!(key = %self.key, %option, "option selected");
        self.settings
            .borrow_mut()
            .set(self.key.clone(), SettingValue::Text(option.clone()));
        self.index = index;
        self.callbacks.invoke(&index);
        Ok(())
    }

    /// Wheel over the box; steps the selection only while focused
    pub fn wheel(&mut self, steps: i32) -> WidgetResult<bool> {
        if !self.focus.wheel() || steps == 0 {
            return Ok(false);
        }
        let last = self.options.len().saturating_sub(1) as i64;
        let target = (self.index as i64 + i64::from(steps)).clamp(0, last) as usize;
        if target == self.index {
            return Ok(false);
        }
        self.select(target)?;
        Ok(true)
    }
}
