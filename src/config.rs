//! # Configuration Module
//!
//! Handles loading and validating the panel layout from TOML files.
//!
//! A configuration names the serial transport settings, the panel-wide
//! debounce defaults, and one `[[controls]]` table per physical control:
//!
//! ```toml
//! [serial]
//! baud_rate = 115200
//! poll_interval_ms = 10
//!
//! [[controls]]
//! kind = "pot"
//! power_button_pin = 2
//! power_line_pin = 3
//! sensor_pin = 0
//! map = { mode = "float", min = -5.12, max = 5.12 }
//!
//! [[controls]]
//! kind = "momentary"
//! pin = 4
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::hal::Pin;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub defaults: DebounceDefaults,

    pub controls: Vec<ControlConfig>,
}

/// Serial transport configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_device_paths")]
    pub device_paths: Vec<String>,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device_paths: default_device_paths(),
            baud_rate: default_baud_rate(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Panel-wide debounce interval defaults, overridable per control
#[derive(Debug, Deserialize, Clone)]
pub struct DebounceDefaults {
    /// Default interval for power buttons and momentary switches.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Default interval for capacitive touch modules.
    #[serde(default = "default_touch_debounce_ms")]
    pub touch_debounce_ms: u64,
}

impl Default for DebounceDefaults {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            touch_debounce_ms: default_touch_debounce_ms(),
        }
    }
}

/// What kind of physical control a `[[controls]]` entry describes
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Potentiometer sensor control with power button and indicator line.
    Pot,
    /// Tactile momentary switch.
    Momentary,
    /// Capacitive touch sensor module.
    Touch,
}

/// Mapping applied to a pot's analog reading before emission
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MapConfig {
    /// Emit the raw 0-1023 reading.
    Raw,
    /// Truncating integer map onto `[min, max]`.
    Int { min: i32, max: i32 },
    /// Fixed-point float map onto `[min, max]`.
    Float { min: f32, max: f32 },
}

/// One physical control on the panel
#[derive(Debug, Deserialize, Clone)]
pub struct ControlConfig {
    pub kind: ControlKind,

    /// Input pin for momentary/touch controls.
    pub pin: Option<Pin>,

    /// Power button pin for pot controls.
    pub power_button_pin: Option<Pin>,

    /// Indicator LED / transistor line for pot controls.
    pub power_line_pin: Option<Pin>,

    /// Analog sensor pin for pot controls.
    pub sensor_pin: Option<Pin>,

    /// Debounce interval override in milliseconds.
    pub debounce_ms: Option<u64>,

    /// Mapping applied to pot readings; defaults to raw pass-through.
    pub map: Option<MapConfig>,
}

// Default value functions
fn default_device_paths() -> Vec<String> {
    vec!["/dev/ttyACM0".to_string(), "/dev/ttyUSB0".to_string()]
}
fn default_baud_rate() -> u32 { 115_200 }
fn default_poll_interval_ms() -> u64 { 10 }

fn default_debounce_ms() -> u64 { 250 }
fn default_touch_debounce_ms() -> u64 { 400 }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use panel_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The debounce interval a control ends up with: its own override, or
    /// the panel-wide default for its kind.
    #[must_use]
    pub fn effective_debounce_ms(&self, control: &ControlConfig) -> u64 {
        control.debounce_ms.unwrap_or(match control.kind {
            ControlKind::Touch => self.defaults.touch_debounce_ms,
            ControlKind::Pot | ControlKind::Momentary => self.defaults.debounce_ms,
        })
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.serial.device_paths.is_empty() {
            return Err(crate::error::PanelError::Config(
                toml::de::Error::custom("serial device_paths cannot be empty")
            ));
        }

        if self.serial.baud_rate == 0 {
            return Err(crate::error::PanelError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0")
            ));
        }

        if self.serial.poll_interval_ms == 0 || self.serial.poll_interval_ms > 1000 {
            return Err(crate::error::PanelError::Config(
                toml::de::Error::custom("poll_interval_ms must be between 1 and 1000")
            ));
        }

        for (name, value) in [
            ("debounce_ms", self.defaults.debounce_ms),
            ("touch_debounce_ms", self.defaults.touch_debounce_ms),
        ] {
            if value == 0 || value > 60_000 {
                return Err(crate::error::PanelError::Config(
                    toml::de::Error::custom(format!("{} must be between 1 and 60000", name))
                ));
            }
        }

        if self.controls.is_empty() {
            return Err(crate::error::PanelError::Config(
                toml::de::Error::custom("at least one [[controls]] entry is required")
            ));
        }

        for (index, control) in self.controls.iter().enumerate() {
            self.validate_control(index, control)?;
        }

        Ok(())
    }

    fn validate_control(&self, index: usize, control: &ControlConfig) -> Result<()> {
        match control.kind {
            ControlKind::Pot => {
                let (Some(button), Some(line), Some(sensor)) = (
                    control.power_button_pin,
                    control.power_line_pin,
                    control.sensor_pin,
                ) else {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!(
                            "controls[{}]: pot requires power_button_pin, power_line_pin and sensor_pin",
                            index
                        ),
                    )));
                };

                if button == line || button == sensor || line == sensor {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!("controls[{}]: pot pin roles must use distinct pins", index),
                    )));
                }

                if control.pin.is_some() {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!("controls[{}]: 'pin' is only valid for momentary/touch", index),
                    )));
                }
            }
            ControlKind::Momentary | ControlKind::Touch => {
                if control.pin.is_none() {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!("controls[{}]: momentary/touch requires 'pin'", index),
                    )));
                }

                if control.power_button_pin.is_some()
                    || control.power_line_pin.is_some()
                    || control.sensor_pin.is_some()
                {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!("controls[{}]: pot pin roles are only valid for kind = \"pot\"", index),
                    )));
                }

                if control.map.is_some() {
                    return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                        format!("controls[{}]: 'map' is only valid for kind = \"pot\"", index),
                    )));
                }
            }
        }

        if let Some(debounce_ms) = control.debounce_ms {
            if debounce_ms == 0 || debounce_ms > 60_000 {
                return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                    format!("controls[{}]: debounce_ms must be between 1 and 60000", index),
                )));
            }
        }

        match control.map {
            Some(MapConfig::Int { min, max }) if min >= max => {
                return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                    format!("controls[{}]: map min must be less than max", index),
                )));
            }
            Some(MapConfig::Float { min, max }) if min >= max => {
                return Err(crate::error::PanelError::Config(toml::de::Error::custom(
                    format!("controls[{}]: map min must be less than max", index),
                )));
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pot_control() -> ControlConfig {
        ControlConfig {
            kind: ControlKind::Pot,
            pin: None,
            power_button_pin: Some(2),
            power_line_pin: Some(3),
            sensor_pin: Some(0),
            debounce_ms: None,
            map: None,
        }
    }

    fn button_control(kind: ControlKind) -> ControlConfig {
        ControlConfig {
            kind,
            pin: Some(4),
            power_button_pin: None,
            power_line_pin: None,
            sensor_pin: None,
            debounce_ms: None,
            map: None,
        }
    }

    fn create_valid_config() -> Config {
        Config {
            serial: SerialConfig::default(),
            defaults: DebounceDefaults::default(),
            controls: vec![pot_control(), button_control(ControlKind::Momentary)],
        }
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_default_config_is_valid() {
        assert!(create_valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_device_paths() {
        let mut config = create_valid_config();
        config.serial.device_paths = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_baud_rate() {
        let mut config = create_valid_config();
        config.serial.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_poll_interval_bounds() {
        let mut config = create_valid_config();
        config.serial.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        config.serial.poll_interval_ms = 1001;
        assert!(config.validate().is_err());

        config.serial.poll_interval_ms = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debounce_default_bounds() {
        let mut config = create_valid_config();
        config.defaults.debounce_ms = 0;
        assert!(config.validate().is_err());

        config.defaults.debounce_ms = 60_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_controls() {
        let mut config = create_valid_config();
        config.controls = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pot_missing_pin_role() {
        let mut config = create_valid_config();
        config.controls[0].sensor_pin = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pot_duplicate_pins() {
        let mut config = create_valid_config();
        config.controls[0].power_line_pin = config.controls[0].power_button_pin;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pot_rejects_single_pin_field() {
        let mut config = create_valid_config();
        config.controls[0].pin = Some(9);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_button_missing_pin() {
        let mut config = create_valid_config();
        config.controls[1].pin = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_button_rejects_pot_fields() {
        let mut config = create_valid_config();
        config.controls[1].sensor_pin = Some(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_button_rejects_map() {
        let mut config = create_valid_config();
        config.controls[1].map = Some(MapConfig::Raw);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_control_debounce_override_bounds() {
        let mut config = create_valid_config();
        config.controls[1].debounce_ms = Some(0);
        assert!(config.validate().is_err());

        config.controls[1].debounce_ms = Some(60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_map_bounds_must_be_ordered() {
        let mut config = create_valid_config();
        config.controls[0].map = Some(MapConfig::Int { min: 100, max: 100 });
        assert!(config.validate().is_err());

        config.controls[0].map = Some(MapConfig::Float { min: 5.12, max: -5.12 });
        assert!(config.validate().is_err());

        config.controls[0].map = Some(MapConfig::Float { min: -5.12, max: 5.12 });
        assert!(config.validate().is_ok());
    }

    // ==================== Effective Interval Tests ====================

    #[test]
    fn test_effective_debounce_defaults_by_kind() {
        let config = Config {
            serial: SerialConfig::default(),
            defaults: DebounceDefaults::default(),
            controls: vec![
                pot_control(),
                button_control(ControlKind::Momentary),
                button_control(ControlKind::Touch),
            ],
        };

        assert_eq!(config.effective_debounce_ms(&config.controls[0]), 250);
        assert_eq!(config.effective_debounce_ms(&config.controls[1]), 250);
        assert_eq!(config.effective_debounce_ms(&config.controls[2]), 400);
    }

    #[test]
    fn test_effective_debounce_override_wins() {
        let mut config = create_valid_config();
        config.controls[1].debounce_ms = Some(30);
        assert_eq!(config.effective_debounce_ms(&config.controls[1]), 30);
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[serial]
baud_rate = 9600

[[controls]]
kind = "pot"
power_button_pin = 2
power_line_pin = 3
sensor_pin = 0
map = { mode = "float", min = -5.12, max = 5.12 }

[[controls]]
kind = "touch"
pin = 8
debounce_ms = 500
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.controls.len(), 2);
        assert_eq!(
            config.controls[0].map,
            Some(MapConfig::Float { min: -5.12, max: 5.12 })
        );
        assert_eq!(config.effective_debounce_ms(&config.controls[1]), 500);
    }

    #[test]
    fn test_load_rejects_invalid_layout() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        // Momentary without a pin
        let toml_content = r#"
[[controls]]
kind = "momentary"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_device_paths(), vec!["/dev/ttyACM0", "/dev/ttyUSB0"]);
        assert_eq!(default_baud_rate(), 115_200);
        assert_eq!(default_poll_interval_ms(), 10);
        assert_eq!(default_debounce_ms(), 250);
        assert_eq!(default_touch_debounce_ms(), 400);
    }
}
