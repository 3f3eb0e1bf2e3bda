//! # Range Mapper Module
//!
//! Linear remapping of raw analog readings onto caller-chosen ranges.
//!
//! ## Value Ranges
//!
//! - Raw analog input: `0..=1023` (10-bit converter)
//! - Integer output: `[min, max]` with truncating interpolation
//! - Float output: `[min, max]` at four decimal digits of precision
//!
//! ## Fixed-Point Float Mapping
//!
//! The float map never interpolates in floating point. Bounds are scaled by
//! 10 000, the interpolation runs on integers, and only the finished result
//! is divided by 10 000.0. That keeps repeated mappings of the same reading
//! bit-for-bit identical and pins the precision contract at four decimal
//! digits.
//!
//! ## Remembered Mode
//!
//! Each mapping call records its mode and bounds. [`RangeMapper::remap`]
//! re-applies the remembered mode to a fresh reading, which is how the
//! encoder reproduces the most recent mapping on every emit without the
//! caller restating the bounds.
//!
//! ## Usage
//!
//! ```
//! use panel_bridge::control::mapper::{MappedValue, RangeMapper};
//!
//! let mut mapper = RangeMapper::new();
//!
//! // Identity bounds reproduce the raw reading exactly
//! assert_eq!(mapper.map_to_int(700, 0, 1023), 700);
//!
//! // The mode is remembered for later re-emission
//! assert_eq!(mapper.remap(1023), MappedValue::Int(1023));
//! ```

use crate::hal::ANALOG_MAX;

/// Scale factor for fixed-point float interpolation (four decimal digits).
const FIXED_POINT_SCALE: f64 = 10_000.0;

/// Which output representation the most recent mapping call selected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MappingMode {
    /// No mapping call yet; readings pass through untouched.
    #[default]
    Raw,
    /// Truncating integer map onto `[min, max]`.
    Int { min: i32, max: i32 },
    /// Fixed-point float map onto `[min, max]`.
    Float { min: f32, max: f32 },
}

/// A mapped reading, tagged with the representation that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MappedValue {
    Raw(u16),
    Int(i32),
    Float(f32),
}

impl std::fmt::Display for MappedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappedValue::Raw(raw) => write!(f, "{raw}"),
            MappedValue::Int(value) => write!(f, "{value}"),
            MappedValue::Float(value) => write!(f, "{value:.4}"),
        }
    }
}

/// Remaps raw `0..=1023` readings and remembers the active mode and bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeMapper {
    mode: MappingMode,
}

impl RangeMapper {
    /// Creates a mapper in [`MappingMode::Raw`] with no bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mode and bounds recorded by the most recent mapping call.
    #[must_use]
    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    /// Presets the remembered mode and bounds, e.g. from configuration.
    ///
    /// Subsequent mapping calls overwrite the preset as usual.
    pub fn set_mode(&mut self, mode: MappingMode) {
        self.mode = mode;
    }

    /// Maps a raw reading onto `[min, max]` with truncating integer
    /// interpolation and records `Int` mode with these bounds.
    ///
    /// `map_to_int(r, 0, 1023)` returns `r` exactly.
    pub fn map_to_int(&mut self, raw: u16, min: i32, max: i32) -> i32 {
        self.mode = MappingMode::Int { min, max };
        Self::scale_int(raw, min, max)
    }

    /// Maps a raw reading onto `[min, max]` through the fixed-point
    /// interpolation and records `Float` mode with these bounds.
    ///
    /// Raw 0 yields `min` and raw 1023 yields `max`, each within one
    /// 1/10 000 step.
    pub fn map_to_float(&mut self, raw: u16, min: f32, max: f32) -> f32 {
        self.mode = MappingMode::Float { min, max };
        Self::scale_float(raw, min, max)
    }

    /// Re-applies the remembered mode and bounds to a fresh reading.
    ///
    /// Does not change the remembered mode.
    #[must_use]
    pub fn remap(&self, raw: u16) -> MappedValue {
        match self.mode {
            MappingMode::Raw => MappedValue::Raw(raw),
            MappingMode::Int { min, max } => MappedValue::Int(Self::scale_int(raw, min, max)),
            MappingMode::Float { min, max } => {
                MappedValue::Float(Self::scale_float(raw, min, max))
            }
        }
    }

    /// Truncating linear interpolation of `0..=1023` onto `[min, max]`.
    fn scale_int(raw: u16, min: i32, max: i32) -> i32 {
        let span = i64::from(max) - i64::from(min);
        let scaled = i64::from(raw) * span / i64::from(ANALOG_MAX) + i64::from(min);
        scaled as i32
    }

    /// Fixed-point interpolation: bounds scaled by 10 000, mapped as
    /// integers, result divided back down.
    fn scale_float(raw: u16, min: f32, max: f32) -> f32 {
        let fixed_min = (f64::from(min) * FIXED_POINT_SCALE).round() as i64;
        let fixed_max = (f64::from(max) * FIXED_POINT_SCALE).round() as i64;
        let span = fixed_max - fixed_min;
        let scaled = i64::from(raw) * span / i64::from(ANALOG_MAX) + fixed_min;
        (scaled as f64 / FIXED_POINT_SCALE) as f32
    }
}
