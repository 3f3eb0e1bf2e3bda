//! # Panel Bridge
//!
//! Turn debounced buttons and potentiometers into a line-oriented serial
//! value stream.
//!
//! The binary loads the panel layout from a TOML file, polls every control
//! from a single driving loop and forwards the encoded value lines to the
//! serial consumer (or to stdout when no serial device is present).

use anyhow::{Context, Result};
use tokio::time::{interval, Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber;

use panel_bridge::config::Config;
use panel_bridge::hal::sim::SimulatedHardware;
use panel_bridge::hal::{HardwareIo, PinLevel, ANALOG_MAX};
use panel_bridge::panel::Panel;
use panel_bridge::serial::{LineSink, PanelSerial, StdoutSink};

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of loop passes between status log messages
const LOG_INTERVAL_PASSES: u64 = 1000;

/// Demo stimulus period: one full analog sweep and one button press
const DEMO_CYCLE_MS: u64 = 4000;

/// Feeds the simulated hardware a repeating stimulus so the value stream is
/// alive without physical wiring: every analog pin sweeps a triangle wave
/// and every digital pin pulses once per cycle.
fn apply_demo_stimulus(hw: &mut SimulatedHardware, config: &Config, now_ms: u64) {
    let phase = now_ms % DEMO_CYCLE_MS;
    let half = DEMO_CYCLE_MS / 2;
    let sweep = if phase < half {
        (phase * u64::from(ANALOG_MAX) / half) as u16
    } else {
        ((DEMO_CYCLE_MS - phase) * u64::from(ANALOG_MAX) / half) as u16
    };
    let pressed = PinLevel::from_bool(phase < 50);

    for control in &config.controls {
        if let Some(sensor) = control.sensor_pin {
            hw.set_analog(sensor, sweep);
        }
        if let Some(button) = control.power_button_pin {
            hw.set_digital(button, pressed);
        }
        if let Some(pin) = control.pin {
            hw.set_digital(pin, pressed);
        }
    }
}

/// Main entry point for the Panel Bridge application
///
/// Initializes logging, loads the panel layout, opens the serial link and
/// runs the driving loop: poll every debounce gate, encode every control and
/// write one value line per control per pass.
///
/// # Errors
///
/// Returns error if the configuration cannot be loaded or the panel cannot
/// be built from it. A missing serial device is not fatal; the stream falls
/// back to stdout.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Panel Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    info!(
        "Loaded {} control(s) from {}",
        config.controls.len(),
        config_path
    );

    // The real GPIO backend is supplied by the embedding project; the
    // shipped binary demonstrates the panel over simulated hardware.
    let mut hw = SimulatedHardware::new();
    let mut panel = Panel::from_config(&config, hw.now_ms())?;
    panel.begin(&mut hw);

    let device_paths: Vec<&str> = config.serial.device_paths.iter().map(String::as_str).collect();
    let mut sink: Box<dyn LineSink> =
        match PanelSerial::open_with_paths(&device_paths, config.serial.baud_rate) {
            Ok(serial) => {
                info!("Streaming values to {}", serial.device_path());
                Box::new(serial)
            }
            Err(e) => {
                warn!("No serial device available ({}), streaming to stdout", e);
                Box::new(StdoutSink)
            }
        };

    let mut poll_interval = interval(Duration::from_millis(config.serial.poll_interval_ms));
    let started = Instant::now();

    info!(
        "Starting polling loop every {}ms",
        config.serial.poll_interval_ms
    );
    info!("Press Ctrl+C to exit");

    let mut pass_count: u64 = 0;
    let mut last_log_count: u64 = 0;

    // Main driving loop
    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                let now_ms = started.elapsed().as_millis() as u64;
                hw.set_time(now_ms);
                apply_demo_stimulus(&mut hw, &config, now_ms);

                panel.poll(&mut hw);
                for line in panel.encode_all(&mut hw) {
                    if let Err(e) = sink.write_line(&line).await {
                        debug!("Failed to write value line: {}", e);
                    }
                }

                pass_count += 1;
                if pass_count - last_log_count >= LOG_INTERVAL_PASSES {
                    info!(
                        "Completed {} polling passes ({} controls per pass)",
                        pass_count,
                        panel.len()
                    );
                    last_log_count = pass_count;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total polling passes: {}", pass_count);
                break;
            }
        }
    }

    Ok(())
}
