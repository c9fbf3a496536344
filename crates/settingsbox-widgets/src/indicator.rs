//! Fixed-size colored status square

use settingsbox_core::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    color: Color,
    size: u32,
}

impl Indicator {
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(color: Color) -> Self {
        Self {
            color,
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Override the side length; zero keeps the default
    pub fn with_size(mut self, size: u32) -> Self {
        if size > 0 {
            self.size = size;
        }
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn style_sheet(&self) -> String {
        format!("background-color: {};", self.color)
    }
}
