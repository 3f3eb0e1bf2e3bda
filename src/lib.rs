//! # Panel Bridge Library
//!
//! Turn debounced buttons and potentiometers into a line-oriented serial
//! value stream.
//!
//! This library provides the core functionality for reading raw digital and
//! analog pin levels through a hardware abstraction, debouncing and remapping
//! them, and serializing the results as one text value per line for an
//! external consumer (typically a PC-side process on the other end of the
//! serial port).

pub mod config;
pub mod error;
pub mod hal;
pub mod control;
pub mod panel;
pub mod serial;
