//! # Sensor Control Module
//!
//! A sensor control is the full potentiometer-style composition: a debounced
//! power button, a software On/Off toggle, a power line for the indicator
//! LED/transistor, and a range mapper over the analog sensor reading.
//!
//! The power line and the toggle are deliberately decoupled: `activate` and
//! `deactivate` drive the pin directly regardless of toggle state, so wiring
//! schemes that share one physical power line across several logical toggles
//! (via a supplemental pin) keep working. `poll_power` is the built-in caller
//! that keeps the line tracking the toggle for the common single-control
//! wiring.

use crate::control::debounce::{DebounceGate, SampleDecision, DEFAULT_DEBOUNCE_MS};
use crate::control::mapper::{MappedValue, MappingMode, RangeMapper};
use crate::control::toggle::PowerToggle;
use crate::hal::{HardwareIo, Pin, PinLevel, PinMode};

/// Pin roles of a sensor control, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct SensorPins {
    /// Debounced On/Off button.
    pub power_button: Pin,
    /// Indicator LED / transistor supply line.
    pub power_line: Pin,
    /// Analog input fed back from the sensor.
    pub sensor: Pin,
}

/// Potentiometer-style control with On/Off gating and value mapping.
///
/// # Examples
///
/// ```
/// use panel_bridge::control::sensor::{SensorControl, SensorPins};
/// use panel_bridge::hal::{HardwareIo, PinLevel};
/// use panel_bridge::hal::sim::SimulatedHardware;
///
/// let pins = SensorPins { power_button: 2, power_line: 3, sensor: 0 };
/// let mut hw = SimulatedHardware::new();
/// let mut control = SensorControl::new(pins, hw.now_ms());
/// control.begin(&mut hw);
///
/// // Off controls always encode 0
/// hw.set_analog(0, 900);
/// assert_eq!(control.encode(&mut hw), "0");
///
/// // Accepted press turns the control on; raw mode passes the reading through
/// hw.set_digital(2, PinLevel::Active);
/// hw.advance(250);
/// control.poll_power(&mut hw);
/// assert_eq!(control.encode(&mut hw), "900");
/// ```
#[derive(Debug)]
pub struct SensorControl {
    pins: SensorPins,
    gate: DebounceGate,
    toggle: PowerToggle,
    mapper: RangeMapper,
}

impl SensorControl {
    /// Creates a sensor control with the default 250 ms debounce interval.
    #[must_use]
    pub fn new(pins: SensorPins, now_ms: u64) -> Self {
        Self::with_interval(pins, DEFAULT_DEBOUNCE_MS, now_ms)
    }

    /// Creates a sensor control with an explicit debounce interval.
    #[must_use]
    pub fn with_interval(pins: SensorPins, interval_ms: u64, now_ms: u64) -> Self {
        Self {
            pins,
            gate: DebounceGate::new(interval_ms, now_ms),
            toggle: PowerToggle::new(),
            mapper: RangeMapper::new(),
        }
    }

    /// Assigns pin directions: button and sensor as inputs, power line as
    /// output. Call once at startup.
    pub fn begin(&self, hw: &mut dyn HardwareIo) {
        hw.set_direction(self.pins.power_button, PinMode::Input);
        hw.set_direction(self.pins.power_line, PinMode::Output);
        hw.set_direction(self.pins.sensor, PinMode::Input);
    }

    /// Debounce-polls the power button.
    ///
    /// An accepted active sample flips the toggle and drives the power line
    /// to the new state; a skipped or inactive sample changes nothing.
    pub fn poll_power(&mut self, hw: &mut dyn HardwareIo) -> SampleDecision {
        let level = hw.read_digital(self.pins.power_button);
        let decision = self.gate.poll(hw.now_ms(), level);
        if let SampleDecision::Accept(level) = decision {
            let was_on = self.toggle.is_on();
            self.toggle.on_accept(level);
            if self.toggle.is_on() != was_on {
                hw.write_digital(self.pins.power_line, PinLevel::from_bool(self.toggle.is_on()));
            }
        }
        decision
    }

    /// Drives the power line high, independent of toggle state.
    pub fn activate(&self, hw: &mut dyn HardwareIo) {
        hw.write_digital(self.pins.power_line, PinLevel::Active);
    }

    /// Drives the power line low, independent of toggle state.
    pub fn deactivate(&self, hw: &mut dyn HardwareIo) {
        hw.write_digital(self.pins.power_line, PinLevel::Inactive);
    }

    /// Flips the software toggle without touching any pin.
    pub fn toggle(&mut self) {
        self.toggle.toggle();
    }

    /// Current logical On/Off state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.toggle.is_on()
    }

    /// Fresh analog reading from the sensor pin. Never cached.
    pub fn raw_reading(&self, hw: &mut dyn HardwareIo) -> u16 {
        hw.read_analog(self.pins.sensor)
    }

    /// Re-samples the sensor and maps the reading onto `[min, max]` as an
    /// integer, recording the bounds for later emission.
    pub fn map_to_int(&mut self, hw: &mut dyn HardwareIo, min: i32, max: i32) -> i32 {
        let raw = self.raw_reading(hw);
        self.mapper.map_to_int(raw, min, max)
    }

    /// Re-samples the sensor and maps the reading onto `[min, max]` as a
    /// fixed-point float, recording the bounds for later emission.
    pub fn map_to_float(&mut self, hw: &mut dyn HardwareIo, min: f32, max: f32) -> f32 {
        let raw = self.raw_reading(hw);
        self.mapper.map_to_float(raw, min, max)
    }

    /// Presets the mapping mode, e.g. from configuration.
    pub fn set_mapping(&mut self, mode: MappingMode) {
        self.mapper.set_mode(mode);
    }

    /// Formats the control's current value as one text line (without the
    /// trailing newline; the sink appends it).
    ///
    /// The remembered mapping mode selects the representation. When the
    /// toggle is off the value is `0` (raw/int) or `0.0000` (float)
    /// regardless of the reading.
    pub fn encode(&mut self, hw: &mut dyn HardwareIo) -> String {
        if !self.toggle.is_on() {
            return match self.mapper.mode() {
                MappingMode::Float { .. } => MappedValue::Float(0.0).to_string(),
                _ => MappedValue::Raw(0).to_string(),
            };
        }
        let raw = self.raw_reading(hw);
        self.mapper.remap(raw).to_string()
    }
}
