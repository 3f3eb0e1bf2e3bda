//! # Panel Module
//!
//! Ties the individual controls into one pollable panel.
//!
//! This module handles:
//! - Building controls from a validated [`Config`]
//! - Initializing every control's pin directions at startup
//! - Polling every debounced power button once per driving-loop pass
//! - Encoding every control's current value, in declaration order
//!
//! Controls share no state, so the poll order between them is free; the
//! panel simply walks them in declaration order.

use crate::config::{Config, ControlKind, MapConfig};
use crate::control::{ButtonControl, ButtonKind, MappingMode, SensorControl, SensorPins};
use crate::error::{PanelError, Result};
use crate::hal::HardwareIo;

impl From<MapConfig> for MappingMode {
    fn from(map: MapConfig) -> Self {
        match map {
            MapConfig::Raw => MappingMode::Raw,
            MapConfig::Int { min, max } => MappingMode::Int { min, max },
            MapConfig::Float { min, max } => MappingMode::Float { min, max },
        }
    }
}

/// One control on the panel.
#[derive(Debug)]
pub enum Control {
    Sensor(SensorControl),
    Button(ButtonControl),
}

/// All configured controls, polled and encoded as a unit.
///
/// # Examples
///
/// ```
/// use panel_bridge::config::Config;
/// use panel_bridge::hal::HardwareIo;
/// use panel_bridge::hal::sim::SimulatedHardware;
/// use panel_bridge::panel::Panel;
///
/// let config: Config = toml::from_str(r#"
///     [[controls]]
///     kind = "momentary"
///     pin = 4
/// "#).unwrap();
///
/// let mut hw = SimulatedHardware::new();
/// let mut panel = Panel::from_config(&config, hw.now_ms()).unwrap();
/// panel.begin(&mut hw);
///
/// assert_eq!(panel.encode_all(&mut hw), vec!["0"]);
/// ```
#[derive(Debug)]
pub struct Panel {
    controls: Vec<Control>,
}

impl Panel {
    /// Builds the panel described by the configuration, stamping every
    /// debounce gate at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a control entry is missing the pin
    /// roles its kind requires (normally caught by [`Config::load`]
    /// validation already).
    pub fn from_config(config: &Config, now_ms: u64) -> Result<Self> {
        let mut controls = Vec::with_capacity(config.controls.len());

        for (index, entry) in config.controls.iter().enumerate() {
            let interval_ms = config.effective_debounce_ms(entry);

            let control = match entry.kind {
                ControlKind::Pot => {
                    let (Some(power_button), Some(power_line), Some(sensor)) =
                        (entry.power_button_pin, entry.power_line_pin, entry.sensor_pin)
                    else {
                        return Err(missing_pins(index));
                    };

                    let pins = SensorPins {
                        power_button,
                        power_line,
                        sensor,
                    };
                    let mut sensor = SensorControl::with_interval(pins, interval_ms, now_ms);
                    if let Some(map) = entry.map {
                        sensor.set_mapping(map.into());
                    }
                    Control::Sensor(sensor)
                }
                ControlKind::Momentary | ControlKind::Touch => {
                    let Some(pin) = entry.pin else {
                        return Err(missing_pins(index));
                    };

                    let kind = match entry.kind {
                        ControlKind::Touch => ButtonKind::Touch,
                        _ => ButtonKind::Momentary,
                    };
                    Control::Button(ButtonControl::with_interval(pin, kind, interval_ms, now_ms))
                }
            };

            controls.push(control);
        }

        Ok(Self { controls })
    }

    /// Assigns every control's pin directions. Call once at startup.
    pub fn begin(&self, hw: &mut dyn HardwareIo) {
        for control in &self.controls {
            match control {
                Control::Sensor(sensor) => sensor.begin(hw),
                Control::Button(button) => button.begin(hw),
            }
        }
    }

    /// Polls every sensor control's power button once.
    ///
    /// Button controls debounce inside [`Panel::encode_all`], mirroring how
    /// their state read and emission are one gesture.
    pub fn poll(&mut self, hw: &mut dyn HardwareIo) {
        for control in &mut self.controls {
            if let Control::Sensor(sensor) = control {
                sensor.poll_power(hw);
            }
        }
    }

    /// Encodes every control's current value, one line per control, in
    /// declaration order.
    pub fn encode_all(&mut self, hw: &mut dyn HardwareIo) -> Vec<String> {
        self.controls
            .iter_mut()
            .map(|control| match control {
                Control::Sensor(sensor) => sensor.encode(hw),
                Control::Button(button) => button.encode(hw),
            })
            .collect()
    }

    /// The controls in declaration order.
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Number of configured controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the panel has no controls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

fn missing_pins(index: usize) -> PanelError {
    use serde::de::Error;
    PanelError::Config(toml::de::Error::custom(format!(
        "controls[{}]: missing pin roles for its kind",
        index
    )))
}
