//! # Power Toggle Module
//!
//! Software On/Off state for a control.
//!
//! The toggle flips exactly once per accepted debounce sample whose level is
//! active, so Off→On and On→Off both ride on the same press gesture. It is
//! pure bookkeeping: driving the physical power line is a separate concern
//! (see [`crate::control::sensor`]), which lets several logical toggles share
//! one power line through a supplemental pin.

use crate::hal::PinLevel;

/// Boolean On/Off state flipped by accepted active samples.
///
/// # Examples
///
/// ```
/// use panel_bridge::control::toggle::PowerToggle;
/// use panel_bridge::hal::PinLevel;
///
/// let mut toggle = PowerToggle::new();
/// assert!(!toggle.is_on());
///
/// toggle.on_accept(PinLevel::Active);
/// assert!(toggle.is_on());
///
/// toggle.on_accept(PinLevel::Inactive); // no change
/// assert!(toggle.is_on());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerToggle {
    is_on: bool,
}

impl PowerToggle {
    /// Creates a toggle in the Off state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an accepted debounce sample: an active level flips the state,
    /// an inactive one leaves it alone.
    pub fn on_accept(&mut self, level: PinLevel) {
        if level.is_active() {
            self.toggle();
        }
    }

    /// Unconditional programmatic flip.
    pub fn toggle(&mut self) {
        self.is_on = !self.is_on;
    }

    /// Current On/Off state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }
}
