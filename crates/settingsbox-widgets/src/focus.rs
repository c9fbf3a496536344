//! Focus policy for widgets that should not steal scroll wheel events

/// Which interactions may give a widget keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusPolicy {
    /// Tab or click
    StrongFocus,
    /// Tab, click or wheel
    WheelFocus,
}

/// Tracks focus so that wheel events over an unfocused widget pass through
/// to the surrounding scroll area instead of changing the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusGuard {
    focused: bool,
    policy: FocusPolicy,
}

impl Default for FocusGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusGuard {
    pub fn new() -> Self {
        Self {
            focused: false,
            policy: FocusPolicy::StrongFocus,
        }
    }

    pub fn focus_in(&mut self) {
        self.focused = true;
        self.policy = FocusPolicy::WheelFocus;
    }

    pub fn focus_out(&mut self) {
        self.focused = false;
        self.policy = FocusPolicy::StrongFocus;
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn policy(&self) -> FocusPolicy {
        self.policy
    }

    /// Whether a wheel event should be handled by the widget
    pub fn wheel(&self) -> bool {
        self.focused
    }
}
