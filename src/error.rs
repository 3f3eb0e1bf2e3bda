//! # Error Types
//!
//! Custom error types for Panel Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Panel Bridge
#[derive(Debug, Error)]
pub enum PanelError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// No serial device could be opened at any of the candidate paths
    #[error("No serial device found at: {0}")]
    SerialPortNotFound(String),
}

/// Result type alias for Panel Bridge
pub type Result<T> = std::result::Result<T, PanelError>;
