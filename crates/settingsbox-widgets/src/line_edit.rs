//! Single-line text fields and their highlight state

use crate::validator::{ValidationState, Validator};
use settingsbox_core::Color;
use std::fmt;
use std::rc::Rc;

/// Background state of an editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FieldStyle {
    #[default]
    Normal,
    /// The last edit was rejected and nothing was committed
    Invalid,
}

impl FieldStyle {
    pub fn background(&self) -> Color {
        match self {
            Self::Normal => Color::WHITE,
            Self::Invalid => Color::PINK,
        }
    }

    /// Style sheet for a widget class, e.g. `"QLineEdit { background-color: #ffc0cb }"`
    pub fn style_sheet(&self, selector: &str) -> String {
        format!("{} {{ background-color: {} }}", selector, self.background())
    }
}

/// Text, highlight and optional validator of one entry field
pub struct LineEdit {
    text: String,
    style: FieldStyle,
    read_only: bool,
    validator: Option<Rc<dyn Validator>>,
}

impl LineEdit {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: FieldStyle::Normal,
            read_only: false,
            validator: None,
        }
    }

    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    /// Use a validator shared with other fields
    pub fn with_shared_validator(mut self, validator: Option<Rc<dyn Validator>>) -> Self {
        self.validator = validator;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn style(&self) -> FieldStyle {
        self.style
    }

    pub fn set_style(&mut self, style: FieldStyle) {
        self.style = style;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Validator verdict on the current text; `Acceptable` without a validator
    pub fn validation_state(&self) -> ValidationState {
        self.validator
            .as_ref()
            .map_or(ValidationState::Acceptable, |v| v.validate(&self.text))
    }

    pub fn is_acceptable(&self) -> bool {
        self.validation_state() == ValidationState::Acceptable
    }
}

impl fmt::Debug for LineEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEdit")
            .field("text", &self.text)
            .field("style", &self.style)
            .field("read_only", &self.read_only)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}
