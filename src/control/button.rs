//! # Button Control Module
//!
//! Switch/touch-style controls expose a single debounced binary state; no
//! On/Off gating, no mapping. Momentary tactile switches and capacitive
//! touch modules behave identically here and differ only in their default
//! debounce interval, so the kind is configuration rather than a subtype.

use crate::control::debounce::{DebounceGate, SampleDecision};
use crate::hal::{HardwareIo, Pin, PinLevel, PinMode};

/// Physical button flavor; selects the default debounce interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Tactile momentary switch.
    Momentary,
    /// Capacitive touch sensor module.
    Touch,
}

impl ButtonKind {
    /// Default debounce interval for this kind, in milliseconds.
    ///
    /// Touch modules latch their output noticeably longer than a tactile
    /// switch bounces, hence the wider default.
    #[must_use]
    pub fn default_interval_ms(self) -> u64 {
        match self {
            ButtonKind::Momentary => 250,
            ButtonKind::Touch => 400,
        }
    }
}

/// Debounced binary control on a single input pin.
///
/// # Examples
///
/// ```
/// use panel_bridge::control::button::{ButtonControl, ButtonKind};
/// use panel_bridge::hal::{HardwareIo, PinLevel};
/// use panel_bridge::hal::sim::SimulatedHardware;
///
/// let mut hw = SimulatedHardware::new();
/// let mut button = ButtonControl::new(4, ButtonKind::Momentary, hw.now_ms());
/// button.begin(&mut hw);
///
/// hw.set_digital(4, PinLevel::Active);
/// hw.advance(250);
/// assert!(button.state(&mut hw));
///
/// // Within the interval the last accepted state is returned
/// hw.set_digital(4, PinLevel::Inactive);
/// hw.advance(100);
/// assert!(button.state(&mut hw));
/// ```
#[derive(Debug)]
pub struct ButtonControl {
    pin: Pin,
    kind: ButtonKind,
    gate: DebounceGate,
    /// Level of the last accepted sample; returned while the gate skips.
    last_state: PinLevel,
}

impl ButtonControl {
    /// Creates a button with the kind's default debounce interval.
    #[must_use]
    pub fn new(pin: Pin, kind: ButtonKind, now_ms: u64) -> Self {
        Self::with_interval(pin, kind, kind.default_interval_ms(), now_ms)
    }

    /// Creates a button with an explicit debounce interval.
    #[must_use]
    pub fn with_interval(pin: Pin, kind: ButtonKind, interval_ms: u64, now_ms: u64) -> Self {
        Self {
            pin,
            kind,
            gate: DebounceGate::new(interval_ms, now_ms),
            last_state: PinLevel::Inactive,
        }
    }

    /// Assigns the pin as an input. Call once at startup.
    pub fn begin(&self, hw: &mut dyn HardwareIo) {
        hw.set_direction(self.pin, PinMode::Input);
    }

    /// The button flavor this control was configured as.
    #[must_use]
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    /// Debounced state: `true` while the last accepted sample was active.
    ///
    /// Polls the pin through the debounce gate. On an accepted sample the
    /// sampled level becomes the new known state; on a skipped one the last
    /// known state is returned unchanged, so the caller always gets a
    /// defined answer.
    pub fn state(&mut self, hw: &mut dyn HardwareIo) -> bool {
        let level = hw.read_digital(self.pin);
        if let SampleDecision::Accept(level) = self.gate.poll(hw.now_ms(), level) {
            self.last_state = level;
        }
        self.last_state.is_active()
    }

    /// As [`state`](Self::state), but forced inactive unless `condition`
    /// holds.
    ///
    /// The pin is not polled while the condition is false, so the debounce
    /// stamp is untouched and the button reacts immediately once enabled.
    /// Used to keep a button inert while another control shares its sensor.
    pub fn state_if(&mut self, hw: &mut dyn HardwareIo, condition: bool) -> bool {
        if condition {
            self.state(hw)
        } else {
            false
        }
    }

    /// Formats the debounced state as one text line: `1` pressed, `0`
    /// otherwise. Emitted unconditionally; button controls have no On/Off
    /// gating.
    pub fn encode(&mut self, hw: &mut dyn HardwareIo) -> String {
        u8::from(self.state(hw)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::sim::SimulatedHardware;

    fn button_and_hw(kind: ButtonKind) -> (ButtonControl, SimulatedHardware) {
        let hw = SimulatedHardware::new();
        let button = ButtonControl::new(7, kind, hw.now_ms());
        (button, hw)
    }

    // ==================== Default Interval Tests ====================

    #[test]
    fn test_kind_default_intervals() {
        assert_eq!(ButtonKind::Momentary.default_interval_ms(), 250);
        assert_eq!(ButtonKind::Touch.default_interval_ms(), 400);
    }

    #[test]
    fn test_touch_uses_wider_interval() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Touch);
        hw.set_digital(7, PinLevel::Active);

        // Accepted for a momentary, still skipped for a touch module
        hw.advance(250);
        assert!(!button.state(&mut hw));

        hw.advance(150);
        assert!(button.state(&mut hw));
    }

    // ==================== State Tests ====================

    #[test]
    fn test_begin_assigns_input() {
        let (button, mut hw) = button_and_hw(ButtonKind::Momentary);
        button.begin(&mut hw);
        assert_eq!(hw.direction(7), Some(PinMode::Input));
    }

    #[test]
    fn test_initial_state_inactive() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Momentary);
        assert!(!button.state(&mut hw));
    }

    #[test]
    fn test_accepted_sample_updates_state() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Momentary);
        hw.set_digital(7, PinLevel::Active);
        hw.advance(250);
        assert!(button.state(&mut hw));

        hw.set_digital(7, PinLevel::Inactive);
        hw.advance(250);
        assert!(!button.state(&mut hw));
    }

    #[test]
    fn test_skip_returns_last_accepted_state() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Momentary);
        hw.set_digital(7, PinLevel::Active);
        hw.advance(250);
        assert!(button.state(&mut hw));

        // Release within the interval: gate skips, state holds
        hw.set_digital(7, PinLevel::Inactive);
        hw.advance(100);
        assert!(button.state(&mut hw));

        hw.advance(150);
        assert!(!button.state(&mut hw));
    }

    #[test]
    fn test_custom_interval_override() {
        let mut hw = SimulatedHardware::new();
        let mut button = ButtonControl::with_interval(7, ButtonKind::Touch, 50, hw.now_ms());
        hw.set_digital(7, PinLevel::Active);
        hw.advance(50);
        assert!(button.state(&mut hw));
    }

    // ==================== Condition Gate Tests ====================

    #[test]
    fn test_state_if_false_is_inert() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Momentary);
        hw.set_digital(7, PinLevel::Active);
        hw.advance(250);

        assert!(!button.state_if(&mut hw, false));

        // The blocked call did not consume the debounce window
        assert!(button.state_if(&mut hw, true));
    }

    // ==================== Encoding Tests ====================

    #[test]
    fn test_encode_emits_binary_state() {
        let (mut button, mut hw) = button_and_hw(ButtonKind::Momentary);
        assert_eq!(button.encode(&mut hw), "0");

        hw.set_digital(7, PinLevel::Active);
        hw.advance(250);
        assert_eq!(button.encode(&mut hw), "1");
    }
}
