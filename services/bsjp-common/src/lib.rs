//! BSJP Common - Shared configuration, validation and logging for the BSJP scanner.
//!
//! This crate provides:
//! - Configuration types and loading
//! - Configuration validation
//! - Error types and handling utilities
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{
    Config, DisplayConfig, GeneratorConfig, IgnoredOverride, NumericRange, ObservabilityConfig,
    ScannerConfig, Ticker,
};
pub use error::{Error, Result, ResultExt};
pub use validation::{Validate, ValidationError, ValidationResult};

