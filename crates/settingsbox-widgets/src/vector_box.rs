//! Three-component vector editor

use crate::error::{WidgetError, WidgetResult};
use crate::line_edit::{FieldStyle, LineEdit};
use crate::validator::{DoubleValidator, Validator};
use settingsbox_core::{Callbacks, Shared};
use settingsbox_settings::{SettingValue, Settings};
use std::rc::Rc;

const COMPONENT_LIMIT: f64 = 1e6;
const COMPONENT_DECIMALS: usize = 7;

/// Three float fields editing one `[x, y, z]` setting
pub struct SettingsVectorBox {
    settings: Shared<Settings>,
    key: String,
    label: String,
    entries: [LineEdit; 3],
    callbacks: Callbacks,
}

impl SettingsVectorBox {
    pub fn new(
        settings: Shared<Settings>,
        label: impl Into<String>,
        key: impl Into<String>,
    ) -> WidgetResult<Self> {
        let key = key.into();
        let vector = settings.borrow().get_vector(&key)?;
        let validator: Rc<dyn Validator> = Rc::new(DoubleValidator::new(
            -COMPONENT_LIMIT,
            COMPONENT_LIMIT,
            COMPONENT_DECIMALS,
        ));
        let entries = vector.map(|component| {
            LineEdit::new(SettingValue::Float(component).to_string())
                .with_shared_validator(Some(Rc::clone(&validator)))
        });
        Ok(Self {
            settings,
            key,
            label: label.into(),
            entries,
            callbacks: Callbacks::new(),
        })
    }

    /// Run `callback` after any component is committed
    pub fn with_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(move |_: &()| callback());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entry(&self, component: usize) -> WidgetResult<&LineEdit> {
        self.entries
            .get(component)
            .ok_or(WidgetError::ComponentOutOfRange(component))
    }

    pub fn set_text(&mut self, component: usize, text: impl Into<String>) -> WidgetResult<()> {
        self.entries
            .get_mut(component)
            .ok_or(WidgetError::ComponentOutOfRange(component))?
            .set_text(text);
        Ok(())
    }

    /// Editing of one component finished; returns whether it was committed
    pub fn component_edited(&mut self, component: usize) -> WidgetResult<bool> {
        let entry = self
            .entries
            .get_mut(component)
            .ok_or(WidgetError::ComponentOutOfRange(component))?;
        let parsed = if entry.is_acceptable() {
            entry.text().trim().parse::<f64>().ok()
        } else {
            None
        };
        let Some(value) = parsed else {
            tracing::trace!(key = %self.key, component, text = %entry.text(), "rejected component");
            entry.set_style(FieldStyle::Invalid);
            return Ok(false);
        };
        entry.set_style(FieldStyle::Normal);

        {
            let mut store = self.settings.borrow_mut();
            let mut vector = store.get_vector(&self.key)?;
            vector[component] = value;
            store.set(self.key.clone(), SettingValue::Vector(vector));
        }
        tracing::debug!(key = %self.key, component, value, "component committed");
        self.callbacks.fire();
        Ok(true)
    }
}
