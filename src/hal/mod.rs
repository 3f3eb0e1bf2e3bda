//! # Hardware Abstraction Module
//!
//! Pin-level hardware access behind a trait so the control logic never
//! touches a register or a device file directly.
//!
//! This module handles:
//! - Digital reads and writes in terms of [`PinLevel`]
//! - Bounded analog reads (`0..=`[`ANALOG_MAX`])
//! - Pin direction assignment at initialization
//! - A monotonic millisecond clock for debounce timing
//!
//! The real GPIO backend is supplied by the embedding application; the crate
//! ships [`sim::SimulatedHardware`] for demos and tests.

pub mod sim;

/// Highest raw reading the analog converter produces.
pub const ANALOG_MAX: u16 = 1023;

/// Pin identifier as printed on the board silkscreen.
pub type Pin = u8;

/// Logic level on a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    /// Driven or read high.
    Active,
    /// Driven or read low.
    Inactive,
}

impl PinLevel {
    /// Returns `true` for [`PinLevel::Active`].
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, PinLevel::Active)
    }

    /// Converts a boolean (`true` = active) to a level.
    #[must_use]
    pub fn from_bool(active: bool) -> Self {
        if active {
            PinLevel::Active
        } else {
            PinLevel::Inactive
        }
    }
}

/// Direction assigned to a pin during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Trait for hardware pin and clock operations.
///
/// All calls are synchronous and complete before returning; the contract
/// guarantees digital levels are binary and analog readings stay within
/// `0..=`[`ANALOG_MAX`], so the control layer performs no input validation.
#[cfg_attr(test, mockall::automock)]
pub trait HardwareIo {
    /// Assign a direction to a pin. Called once per pin at startup.
    fn set_direction(&mut self, pin: Pin, mode: PinMode);

    /// Read the current logic level of an input pin.
    fn read_digital(&mut self, pin: Pin) -> PinLevel;

    /// Read the analog converter on a pin, bounded to `0..=`[`ANALOG_MAX`].
    fn read_analog(&mut self, pin: Pin) -> u16;

    /// Drive an output pin to the given level.
    fn write_digital(&mut self, pin: Pin, level: PinLevel);

    /// Monotonic milliseconds since an arbitrary epoch. Wraps at `u64::MAX`.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_is_active() {
        assert!(PinLevel::Active.is_active());
        assert!(!PinLevel::Inactive.is_active());
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(PinLevel::from_bool(true), PinLevel::Active);
        assert_eq!(PinLevel::from_bool(false), PinLevel::Inactive);
    }

    #[test]
    fn test_analog_max() {
        // 10-bit converter, inclusive upper bound
        assert_eq!(ANALOG_MAX, 1023);
    }
}
