//! Integer sliders that ignore the wheel unless focused

use crate::focus::FocusGuard;
use settingsbox_core::Callbacks;
use std::time::{Duration, Instant};

/// Default coalescing delay of [`DelayedSlider`]
pub const DEFAULT_TIME_DELAY: Duration = Duration::from_millis(50);

/// Integer slider over `[minimum, maximum]`
pub struct HumbleSlider {
    value: i32,
    minimum: i32,
    maximum: i32,
    single_step: i32,
    focus: FocusGuard,
    value_changed: Callbacks<i32>,
}

impl Default for HumbleSlider {
    fn default() -> Self {
        Self::new(0, 99)
    }
}

impl HumbleSlider {
    /// A slider starting at `minimum`; the bounds are swapped if given reversed
    pub fn new(minimum: i32, maximum: i32) -> Self {
        let (minimum, maximum) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        Self {
            value: minimum,
            minimum,
            maximum,
            single_step: 1,
            focus: FocusGuard::new(),
            value_changed: Callbacks::new(),
        }
    }

    pub fn with_single_step(mut self, step: i32) -> Self {
        self.single_step = step;
        self
    }

    pub fn on_value_changed<F: Fn(&i32) + 'static>(&mut self, listener: F) {
        self.value_changed.push(listener);
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn focus(&self) -> &FocusGuard {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusGuard {
        &mut self.focus
    }

    /// Clamp and store `value`; returns whether it changed
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.minimum, self.maximum);
        if value == self.value {
            return false;
        }
        self.value = value;
        self.value_changed.invoke(&value);
        true
    }

    /// One wheel notch; positive `steps` move up. Ignored without focus.
    pub fn wheel(&mut self, steps: i32) -> bool {
        if !self.focus.wheel() {
            return false;
        }
        let delta = steps.saturating_mul(self.single_step);
        self.set_value(self.value.saturating_add(delta))
    }
}

/// Slider whose value notifications are coalesced over a short delay
///
/// The first change after an emission schedules one `value_changed`
/// notification `time_delay` later, carrying whatever the value is at that
/// point. The owner drives time by calling [`DelayedSlider::poll`].
pub struct DelayedSlider {
    slider: HumbleSlider,
    time_delay: Duration,
    deferred_until: Option<Instant>,
    value_changed: Callbacks<i32>,
}

impl DelayedSlider {
    pub fn new(minimum: i32, maximum: i32) -> Self {
        Self::with_time_delay(minimum, maximum, DEFAULT_TIME_DELAY)
    }

    pub fn with_time_delay(minimum: i32, maximum: i32, time_delay: Duration) -> Self {
        Self {
            slider: HumbleSlider::new(minimum, maximum),
            time_delay,
            deferred_until: None,
            value_changed: Callbacks::new(),
        }
    }

    pub fn on_value_changed<F: Fn(&i32) + 'static>(&mut self, listener: F) {
        self.value_changed.push(listener);
    }

    pub fn value(&self) -> i32 {
        self.slider.value()
    }

    pub fn time_delay(&self) -> Duration {
        self.time_delay
    }

    pub fn slider(&self) -> &HumbleSlider {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut HumbleSlider {
        &mut self.slider
    }

    /// Whether a notification is scheduled
    pub fn is_pending(&self) -> bool {
        self.deferred_until.is_some()
    }

    /// Set the value at time `now`
    pub fn set_value(&mut self, value: i32, now: Instant) -> bool {
        let changed = self.slider.set_value(value);
        if changed {
            self.schedule(now);
        }
        changed
    }

    pub fn wheel(&mut self, steps: i32, now: Instant) -> bool {
        let changed = self.slider.wheel(steps);
        if changed {
            self.schedule(now);
        }
        changed
    }

    fn schedule(&mut self, now: Instant) {
        if self.deferred_until.is_none() {
            // A delay past the clock's range is due at once.
            self.deferred_until = Some(now.checked_add(self.time_delay).unwrap_or(now));
        }
    }

    /// Emit the pending notification if it is due; returns the emitted value
    pub fn poll(&mut self, now: Instant) -> Option<i32> {
        match self.deferred_until {
            Some(due) if now >= due => {
                self.deferred_until = None;
                let value = self.slider.value();
                tracing::trace!(value, "delayed slider emit");
                self.value_changed.invoke(&value);
                Some(value)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_value_clamps() {
        let mut slider = HumbleSlider::new(0, 10);
        assert!(slider.set_value(25));
        assert_eq!(slider.value(), 10);
        assert!(!slider.set_value(11));
        assert!(slider.set_value(-3));
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn test_wheel_ignored_without_focus() {
        let mut slider = HumbleSlider::new(0, 10).with_single_step(2);
        assert!(!slider.wheel(1));
        assert_eq!(slider.value(), 0);

        slider.focus_mut().focus_in();
        assert!(slider.wheel(1));
        assert_eq!(slider.value(), 2);
    }

    #[test]
    fn test_delayed_slider_coalesces() {
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let mut slider = DelayedSlider::new(0, 100);
        let sink = Rc::clone(&emitted);
        slider.on_value_changed(move |v| sink.borrow_mut().push(*v));

        let start = Instant::now();
        slider.set_value(10, start);
        slider.set_value(20, start + Duration::from_millis(10));
        slider.set_value(30, start + Duration::from_millis(40));

        assert_eq!(slider.poll(start + Duration::from_millis(49)), None);
        assert_eq!(slider.poll(start + Duration::from_millis(50)), Some(30));
        assert_eq!(slider.poll(start + Duration::from_millis(100)), None);
        assert_eq!(*emitted.borrow(), vec![30]);

        slider.set_value(40, start + Duration::from_millis(200));
        assert!(slider.is_pending());
        assert_eq!(slider.poll(start + Duration::from_millis(250)), Some(40));
        assert_eq!(*emitted.borrow(), vec![30, 40]);
    }

    #[test]
    fn test_unbounded_delay_emits_immediately() {
        let mut slider = DelayedSlider::with_time_delay(0, 100, Duration::MAX);
        let now = Instant::now();
        assert!(slider.set_value(60, now));
        assert_eq!(slider.poll(now), Some(60));
        assert!(!slider.is_pending());
    }
}
