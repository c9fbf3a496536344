//! Low/high pair of numeric entries bound to two settings

use crate::error::{WidgetError, WidgetResult};
use crate::line_edit::{FieldStyle, LineEdit};
use crate::validator::Validator;
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{SettingValue, Settings, ValueKind};
use std::rc::Rc;

/// Two entries editing a `low < high` pair
///
/// Neither value is committed unless both fields parse and the pair stays
/// ordered. A rejected edit flags the field that was being edited.
pub struct SettingsRangeBox {
    settings: Shared<Settings>,
    label: Option<String>,
    low_key: String,
    high_key: String,
    kind: ValueKind,
    low: LineEdit,
    high: LineEdit,
    callbacks: Callbacks,
}

#[derive(Clone, Copy)]
enum Side {
    Low,
    High,
}

impl SettingsRangeBox {
    /// Bind to `low_key` and `high_key`; an empty label shows none
    pub fn new(
        settings: Shared<Settings>,
        label: impl Into<String>,
        low_key: impl Into<String>,
        high_key: impl Into<String>,
        kind: ValueKind,
    ) -> WidgetResult<Self> {
        if !kind.is_numeric() {
            return Err(WidgetError::UnsupportedKind(kind));
        }
        let low_key = low_key.into();
        let high_key = high_key.into();
        let (low_text, high_text) = {
            let store = settings.borrow();
            (store.get(&low_key)?.to_string(), store.get(&high_key)?.to_string())
        };
        let label = label.into();
        Ok(Self {
            settings,
            label: (!label.is_empty()).then_some(label),
            low_key,
            high_key,
            kind,
            low: LineEdit::new(low_text),
            high: LineEdit::new(high_text),
            callbacks: Callbacks::new(),
        })
    }

    /// Apply one validator to both fields
    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        let shared: Rc<dyn Validator> = Rc::new(validator);
        self.low = LineEdit::new(self.low.text()).with_shared_validator(Some(Rc::clone(&shared)));
        self.high = LineEdit::new(self.high.text()).with_shared_validator(Some(shared));
        self
    }

    /// Run `callback` after each committed pair
    pub fn with_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(move |_: &()| callback());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn low(&self) -> &LineEdit {
        &self.low
    }

    pub fn high(&self) -> &LineEdit {
        &self.high
    }

    pub fn set_low_text(&mut self, text: impl Into<String>) {
        self.low.set_text(text);
    }

    pub fn set_high_text(&mut self, text: impl Into<String>) {
        self.high.set_text(text);
    }

    /// Editing of the low field finished; returns whether the pair was committed
    pub fn low_edited(&mut self) -> bool {
        self.edited(Side::Low)
    }

    /// Editing of the high field finished; returns whether the pair was committed
    pub fn high_edited(&mut self) -> bool {
        self.edited(Side::High)
    }

    /// Set both fields programmatically, low first
    ///
    /// Each field is checked as if the user had edited it, so moving the
    /// whole range above the old high bound flags the low field before the
    /// high edit commits both.
    pub fn set_range(
        &mut self,
        low: impl Into<SettingValue>,
        high: impl Into<SettingValue>,
    ) -> bool {
        self.low.set_text(low.into().to_string());
        self.low_edited();
        self.high.set_text(high.into().to_string());
        self.high_edited()
    }

    fn parse(kind: ValueKind, edit: &LineEdit) -> Option<(SettingValue, f64)> {
        if !edit.is_acceptable() {
            return None;
        }
        let value = kind.parse(edit.text())?;
        let number = value.as_float()?;
        Some((value, number))
    }

    fn edited(&mut self, side: Side) -> bool {
        let low = Self::parse(self.kind, &self.low);
        let high = Self::parse(self.kind, &self.high);
        let (Some((low_value, low_number)), Some((high_value, high_number))) = (low, high) else {
            self.flag(side);
            return false;
        };
        if low_number >= high_number {
            self.flag(side);
            return false;
        }

        {
            let mut store = self.settings.borrow_mut();
            store.set(self.low_key.clone(), low_value);
            store.set(self.high_key.clone(), high_value);
        }
        tracing::debug!(low = %self.low_key, high = %self.high_key, "range committed");
        self.low.set_style(FieldStyle::Normal);
        self.high.set_style(FieldStyle::Normal);
        self.callbacks.fire();
        true
    }

    fn flag(&mut self, side: Side) {
        tracing::trace!(low = %self.low.text(), high = %self.high.text(), "rejected range");
        match side {
            Side::Low => self.low.set_style(FieldStyle::Invalid),
            Side::High => self.high.set_style(FieldStyle::Invalid),
        }
    }

    /// Re-read both bound values
    pub fn refresh(&mut self) -> WidgetResult<()> {
        let store = self.settings.borrow();
        self.low.set_text(store.get(&self.low_key)?.to_string());
        self.high.set_text(store.get(&self.high_key)?.to_string());
        self.low.set_style(FieldStyle::Normal);
        self.high.set_style(FieldStyle::Normal);
        Ok(())
    }
}
