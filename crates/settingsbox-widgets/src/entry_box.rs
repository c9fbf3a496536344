//! Labelled text entry bound to one setting

use crate::error::WidgetResult;
use crate::line_edit::{FieldStyle, LineEdit};
use crate::validator::Validator;
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{Settings, ValueKind};

/// Text entry that parses its text with a [`ValueKind`] and writes the
/// result to `key` when editing finishes
///
/// ```rust
/// use settingsbox_core::shared;
/// use settingsbox_settings::{Settings, ValueKind};
/// use settingsbox_widgets::SettingsEntryBox;
///
/// let settings = shared(Settings::with_defaults([("sample_rate", 100)]));
/// let mut entry = SettingsEntryBox::new(settings.clone(), "sample_rate", ValueKind::Int).unwrap();
/// assert_eq!(entry.label(), "sample rate");
///
/// entry.set_text("250");
/// assert!(entry.editing_finished());
/// assert_eq!(settings.borrow().get_int("sample_rate").unwrap(), 250);
/// ```
pub struct SettingsEntryBox {
    settings: Shared<Settings>,
    key: String,
    kind: ValueKind,
    label: String,
    left_margin: u32,
    edit: LineEdit,
    callbacks: Callbacks,
}

impl SettingsEntryBox {
    /// Bind to `key`, which must already exist
    pub fn new(
        settings: Shared<Settings>,
        key: impl Into<String>,
        kind: ValueKind,
    ) -> WidgetResult<Self> {
        let key = key.into();
        let text = settings.borrow().get(&key)?.to_string();
        Ok(Self {
            label: key.replace('_', " "),
            settings,
            key,
            kind,
            left_margin: 0,
            edit: LineEdit::new(text),
            callbacks: Callbacks::new(),
        })
    }

    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.edit = self.edit.with_validator(validator);
        self
    }

    /// Replace the label derived from the key
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_left_margin(mut self, margin: u32) -> Self {
        self.left_margin = margin;
        self
    }

    /// Run `callback` after each committed edit
    pub fn with_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(move |_: &()| callback());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn left_margin(&self) -> u32 {
        self.left_margin
    }

    pub fn text(&self) -> &str {
        self.edit.text()
    }

    pub fn style(&self) -> FieldStyle {
        self.edit.style()
    }

    pub fn line_edit(&self) -> &LineEdit {
        &self.edit
    }

    /// The user typed into the field
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.edit.set_text(text);
    }

    /// The user finished editing; returns whether the value was committed
    ///
    /// Text the validator does not accept, or that does not parse as the
    /// entry's kind, flags the field and leaves the setting untouched.
    pub fn editing_finished(&mut self) -> bool {
        let parsed = if self.edit.is_acceptable() {
            self.kind.parse(self.edit.text())
        } else {
            None
        };
        let Some(value) = parsed else {
            tracing::trace!(key = %self.key, text = %self.edit.text(), "rejected entry");
            self.edit.set_style(FieldStyle::Invalid);
            return false;
        };

        tracing::debug!(key = %self.key, %value, "entry committed");
        self.settings.borrow_mut().set(self.key.clone(), value);
        self.edit.set_style(FieldStyle::Normal);
        self.callbacks.fire();
        true
    }

    /// Re-read the bound value, e.g. after the store was reloaded
    pub fn refresh(&mut self) -> WidgetResult<()> {
        let text = self.settings.borrow().get(&self.key)?.to_string();
        self.edit.set_text(text);
        self.edit.set_style(FieldStyle::Normal);
        Ok(())
    }
}
