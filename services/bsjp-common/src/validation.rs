//! Configuration validation for the BSJP scanner.
//!
//! Checks that every configured value is present and within a range the
//! scanner can work with before any market data is generated.

use std::collections::HashSet;
use thiserror::Error;

use crate::config::{
    Config, DisplayConfig, GeneratorConfig, NumericRange, ObservabilityConfig, ScannerConfig,
};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration conflict: {reason}")]
    Conflict { reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.scanner.validate() {
            errors.push(e);
        }

        if let Err(e) = self.generator.validate() {
            errors.push(e);
        }

        if let Err(e) = self.display.validate() {
            errors.push(e);
        }

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }
}

impl Validate for ScannerConfig {
    fn validate(&self) -> ValidationResult<()> {
        // An empty universe is allowed; it scans to empty signal lists.
        let mut seen = HashSet::new();
        for (i, ticker) in self.universe.iter().enumerate() {
            if ticker.symbol.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    field: format!("scanner.universe[{i}].symbol"),
                });
            }
            if ticker.name.trim().is_empty() {
                return Err(ValidationError::MissingField {
                    field: format!("scanner.universe[{i}].name"),
                });
            }
            if !seen.insert(ticker.symbol.as_str()) {
                return Err(ValidationError::Conflict {
                    reason: format!(
                        "Ticker {} appears more than once in the universe",
                        ticker.symbol
                    ),
                });
            }
        }

        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(ValidationError::InvalidValue {
                field: "scanner.min_score".into(),
                reason: "must be between 0 and 100".into(),
            });
        }

        if !(1..=5).contains(&self.min_strength) {
            return Err(ValidationError::InvalidValue {
                field: "scanner.min_strength".into(),
                reason: "must be between 1 and 5".into(),
            });
        }

        Ok(())
    }
}

/// Lowest daily change the generator may draw. Both the close and the open
/// are derived from it, and the candle low sits a further 1.5% below.
pub const MIN_CHANGE_PERCENT: f64 = -95.0;

fn check_range(range: &NumericRange, field: &str) -> ValidationResult<()> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            reason: format!("min ({}) must be finite and below max ({})", range.min, range.max),
        })
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> ValidationResult<()> {
        check_range(&self.price_range, "generator.price_range")?;
        check_range(&self.change_range, "generator.change_range")?;
        check_range(&self.volume_range, "generator.volume_range")?;
        check_range(&self.rsi_range, "generator.rsi_range")?;
        check_range(&self.volatility_range, "generator.volatility_range")?;
        check_range(&self.gap_range, "generator.gap_range")?;

        if self.price_range.min <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "generator.price_range".into(),
                reason: "prices must be positive".into(),
            });
        }

        if self.change_range.min < MIN_CHANGE_PERCENT {
            return Err(ValidationError::InvalidValue {
                field: "generator.change_range".into(),
                reason: format!(
                    "min must be at least {MIN_CHANGE_PERCENT}% to keep prices positive"
                ),
            });
        }

        if self.volume_range.min < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "generator.volume_range".into(),
                reason: "volume must not be negative".into(),
            });
        }

        if self.rsi_range.min < 0.0 || self.rsi_range.max > 100.0 {
            return Err(ValidationError::InvalidValue {
                field: "generator.rsi_range".into(),
                reason: "RSI must stay within 0-100".into(),
            });
        }

        Ok(())
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.display_limit == 0 {
            return Err(ValidationError::InvalidValue {
                field: "display.display_limit".into(),
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}
