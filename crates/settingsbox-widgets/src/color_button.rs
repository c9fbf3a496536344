//! Button that picks a color and stores its `#rrggbb` name

use crate::error::WidgetResult;
use settingsbox_core::{Callbacks, Color, Shared};
use settingsbox_settings::{SettingValue, Settings};

/// Source of colors, normally a color dialog
pub trait ColorChooser {
    /// Ask for a color starting from `initial`; `None` when cancelled
    fn choose_color(&self, initial: Option<Color>) -> Option<Color>;
}

impl<F> ColorChooser for F
where
    F: Fn(Option<Color>) -> Option<Color>,
{
    fn choose_color(&self, initial: Option<Color>) -> Option<Color> {
        self(initial)
    }
}

pub struct ColorEntryButton {
    settings: Shared<Settings>,
    key: String,
    text: String,
    background: Option<Color>,
    callbacks: Callbacks,
}

impl ColorEntryButton {
    /// Bind to `key`; a stored value that names a color becomes the initial background
    pub fn new(settings: Shared<Settings>, key: impl Into<String>) -> WidgetResult<Self> {
        let key = key.into();
        let current = settings.borrow().get(&key)?.to_string();
        Ok(Self {
            settings,
            key,
            text: "Color".to_string(),
            background: Color::parse(&current).ok(),
            callbacks: Callbacks::new(),
        })
    }

    pub fn with_callback<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.callbacks.push(move |_: &()| callback());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn style_sheet(&self) -> Option<String> {
        self.background
            .map(|color| format!("QPushButton {{ background-color: {} }}", color))
    }

    /// Button clicked; returns the committed color, or `None` if cancelled
    pub fn click(&mut self, chooser: &dyn ColorChooser) -> Option<Color> {
        let color = chooser.choose_color(self.background)?;
        tracing::debug!(key = %self.key, %color, "color committed");
        self.settings
            .borrow_mut()
            .set(self.key.clone(), SettingValue::Text(color.name()));
        self.background = Some(color);
        self.callbacks.fire();
        Some(color)
    }
}
