//! Simulated hardware backend for demos and tests.
//!
//! Digital and analog readings are scripted per pin: queued values are
//! consumed one read at a time and the last value latches. The clock only
//! moves when the caller advances it, which makes debounce timing exact in
//! tests.

use std::collections::{HashMap, VecDeque};

use super::{HardwareIo, Pin, PinLevel, PinMode, ANALOG_MAX};

/// Scripted [`HardwareIo`] implementation.
///
/// # Examples
///
/// ```
/// use panel_bridge::hal::{HardwareIo, PinLevel};
/// use panel_bridge::hal::sim::SimulatedHardware;
///
/// let mut hw = SimulatedHardware::new();
/// hw.set_analog(3, 512);
/// hw.advance(250);
///
/// assert_eq!(hw.read_analog(3), 512);
/// assert_eq!(hw.now_ms(), 250);
/// ```
#[derive(Debug, Default)]
pub struct SimulatedHardware {
    now_ms: u64,
    digital: HashMap<Pin, PinLevel>,
    digital_queue: HashMap<Pin, VecDeque<PinLevel>>,
    analog: HashMap<Pin, u16>,
    analog_queue: HashMap<Pin, VecDeque<u16>>,
    directions: HashMap<Pin, PinMode>,
    outputs: HashMap<Pin, PinLevel>,
}

impl SimulatedHardware {
    /// Creates a simulator with all pins inactive, all analog readings 0 and
    /// the clock at 0 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `ms` milliseconds (wrapping).
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Latches a digital level on a pin; subsequent reads return it until
    /// changed.
    pub fn set_digital(&mut self, pin: Pin, level: PinLevel) {
        self.digital.insert(pin, level);
        self.digital_queue.remove(&pin);
    }

    /// Queues a sequence of digital levels; each read consumes one, the last
    /// latches.
    pub fn queue_digital(&mut self, pin: Pin, levels: &[PinLevel]) {
        self.digital_queue
            .entry(pin)
            .or_default()
            .extend(levels.iter().copied());
    }

    /// Latches an analog reading on a pin.
    ///
    /// Readings are clamped to the converter range, mirroring the bound the
    /// [`HardwareIo`] contract promises.
    pub fn set_analog(&mut self, pin: Pin, value: u16) {
        self.analog.insert(pin, value.min(ANALOG_MAX));
        self.analog_queue.remove(&pin);
    }

    /// Queues a sequence of analog readings; each read consumes one, the last
    /// latches.
    pub fn queue_analog(&mut self, pin: Pin, values: &[u16]) {
        self.analog_queue
            .entry(pin)
            .or_default()
            .extend(values.iter().map(|&v| v.min(ANALOG_MAX)));
    }

    /// Last level written to an output pin, if any.
    #[must_use]
    pub fn output_level(&self, pin: Pin) -> Option<PinLevel> {
        self.outputs.get(&pin).copied()
    }

    /// Direction assigned to a pin, if `set_direction` was called for it.
    #[must_use]
    pub fn direction(&self, pin: Pin) -> Option<PinMode> {
        self.directions.get(&pin).copied()
    }
}

impl HardwareIo for SimulatedHardware {
    fn set_direction(&mut self, pin: Pin, mode: PinMode) {
        self.directions.insert(pin, mode);
    }

    fn read_digital(&mut self, pin: Pin) -> PinLevel {
        if let Some(queue) = self.digital_queue.get_mut(&pin) {
            if let Some(level) = queue.pop_front() {
                self.digital.insert(pin, level);
                if queue.is_empty() {
                    self.digital_queue.remove(&pin);
                }
                return level;
            }
        }
        self.digital.get(&pin).copied().unwrap_or(PinLevel::Inactive)
    }

    fn read_analog(&mut self, pin: Pin) -> u16 {
        if let Some(queue) = self.analog_queue.get_mut(&pin) {
            if let Some(value) = queue.pop_front() {
                self.analog.insert(pin, value);
                if queue.is_empty() {
                    self.analog_queue.remove(&pin);
                }
                return value;
            }
        }
        self.analog.get(&pin).copied().unwrap_or(0)
    }

    fn write_digital(&mut self, pin: Pin, level: PinLevel) {
        self.outputs.insert(pin, level);
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let mut hw = SimulatedHardware::new();
        assert_eq!(hw.read_digital(0), PinLevel::Inactive);
        assert_eq!(hw.read_analog(0), 0);
        assert_eq!(hw.now_ms(), 0);
        assert_eq!(hw.output_level(0), None);
    }

    #[test]
    fn test_latched_values() {
        let mut hw = SimulatedHardware::new();
        hw.set_digital(2, PinLevel::Active);
        hw.set_analog(3, 700);

        assert_eq!(hw.read_digital(2), PinLevel::Active);
        assert_eq!(hw.read_digital(2), PinLevel::Active);
        assert_eq!(hw.read_analog(3), 700);
    }

    #[test]
    fn test_queued_digital_consumed_then_latches() {
        let mut hw = SimulatedHardware::new();
        hw.queue_digital(5, &[PinLevel::Active, PinLevel::Inactive]);

        assert_eq!(hw.read_digital(5), PinLevel::Active);
        assert_eq!(hw.read_digital(5), PinLevel::Inactive);
        // Queue drained, last value latches
        assert_eq!(hw.read_digital(5), PinLevel::Inactive);
    }

    #[test]
    fn test_queued_analog_consumed_then_latches() {
        let mut hw = SimulatedHardware::new();
        hw.queue_analog(4, &[0, 512, 1023]);

        assert_eq!(hw.read_analog(4), 0);
        assert_eq!(hw.read_analog(4), 512);
        assert_eq!(hw.read_analog(4), 1023);
        assert_eq!(hw.read_analog(4), 1023);
    }

    #[test]
    fn test_analog_clamped_to_converter_range() {
        let mut hw = SimulatedHardware::new();
        hw.set_analog(1, 5000);
        assert_eq!(hw.read_analog(1), ANALOG_MAX);
    }

    #[test]
    fn test_clock_advance_wraps() {
        let mut hw = SimulatedHardware::new();
        hw.set_time(u64::MAX - 10);
        hw.advance(20);
        assert_eq!(hw.now_ms(), 9);
    }

    #[test]
    fn test_outputs_and_directions_recorded() {
        let mut hw = SimulatedHardware::new();
        hw.set_direction(7, PinMode::Output);
        hw.write_digital(7, PinLevel::Active);

        assert_eq!(hw.direction(7), Some(PinMode::Output));
        assert_eq!(hw.output_level(7), Some(PinLevel::Active));
    }
}
