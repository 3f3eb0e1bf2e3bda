//! # Control Module
//!
//! Debounced control logic built on top of [`crate::hal`].
//!
//! This module handles:
//! - Timed debounce gating of button samples
//! - On/Off toggle state driven by accepted button presses
//! - Linear remapping of raw analog readings to integer or float ranges
//! - Composing the pieces into sensor (potentiometer) and button controls
//! - Encoding each control's current value as one text line

pub mod button;
pub mod debounce;
pub mod mapper;
pub mod sensor;
pub mod toggle;

pub use button::{ButtonControl, ButtonKind};
pub use debounce::{DebounceGate, SampleDecision, DEFAULT_DEBOUNCE_MS};
pub use mapper::{MappedValue, MappingMode, RangeMapper};
pub use sensor::{SensorControl, SensorPins};
pub use toggle::PowerToggle;
