//! # Serial Communication Module
//!
//! Handles the serial link to the PC-side consumer.
//!
//! This module handles:
//! - Opening the serial port at the configured baud rate
//! - Auto-detecting the device across common paths
//! - Writing one newline-terminated value line per call
//! - A sink trait so tests can capture the stream without hardware

pub mod port_trait;

pub use port_trait::{LineSink, StdoutSink};

use crate::error::{PanelError, Result};
use async_trait::async_trait;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// Default baud rate for the PC link
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default device paths to try (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // USB CDC devices (most common for dev boards)
    "/dev/ttyUSB0", // USB-to-serial adapters
];

/// Serial port handler for the value stream
///
/// Manages the connection to the consumer on the other end of the serial
/// link and writes one value per line.
pub struct PanelSerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyACM0)
    device_path: String,
}

impl std::fmt::Debug for PanelSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl PanelSerial {
    /// Open the value-stream port at the default baud rate
    ///
    /// Auto-detects the device by trying common paths.
    ///
    /// # Errors
    ///
    /// Returns error if no device is found or the connection fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use panel_bridge::serial::PanelSerial;
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let serial = PanelSerial::open()?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open() -> Result<Self> {
        Self::open_with_paths(DEFAULT_DEVICE_PATHS, DEFAULT_BAUD_RATE)
    }

    /// Open the value-stream port with custom device paths and baud rate
    ///
    /// # Arguments
    ///
    /// * `paths` - Device paths to try (e.g., &["/dev/ttyACM0"])
    /// * `baud_rate` - Line speed agreed with the consumer
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Successfully opened serial device at {}", path);
                    return Ok(Self {
                        port,
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(PanelError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port with 8N1 settings
    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| PanelError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl LineSink for PanelSerial {
    /// Send one value line to the consumer, newline-terminated
    async fn write_line(&mut self, value: &str) -> std::io::Result<()> {
        use tokio::io::AsyncWriteExt;

        self.port.write_all(value.as_bytes()).await?;
        self.port.write_all(b"\n").await?;
        self.port.flush().await?;

        debug!("Sent value line ({} bytes)", value.len() + 1);
        Ok(())
    }
}
