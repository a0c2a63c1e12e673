//! Configuration management for the Agroinversiones Beto engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGB_ prefix

use chrono::FixedOffset;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// ISO 4217 currency code used for money fields
    pub currency: String,

    /// Local timezone configuration
    pub timezone: TimezoneConfig,

    /// Listing defaults
    pub listing: ListingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimezoneConfig {
    /// Offset from UTC in whole hours. America/Lima is -5 year round.
    pub utc_offset_hours: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    /// Page size when the caller does not specify one
    pub default_limit: u32,

    /// Hard cap on requested page sizes
    pub max_limit: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("AGB_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("currency", "PEN")?
            .set_default("timezone.utc_offset_hours", -5)?
            .set_default("listing.default_limit", 50)?
            .set_default("listing.max_limit", 200)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGB_ prefix)
            .add_source(
                Environment::with_prefix("AGB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Fixed UTC offset for local business dates (report bucketing,
    /// "today" on the dashboard)
    pub fn utc_offset(&self) -> FixedOffset {
        let seconds = self.timezone.utc_offset_hours.clamp(-23, 23) * 3600;
        // Unwrap is safe after clamping to a valid offset range
        FixedOffset::east_opt(seconds).unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            currency: "PEN".to_string(),
            timezone: TimezoneConfig {
                utc_offset_hours: -5,
            },
            listing: ListingConfig {
                default_limit: 50,
                max_limit: 200,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset_is_lima() {
        let config = Config::default();
        assert_eq!(config.utc_offset(), FixedOffset::west_opt(5 * 3600).unwrap());
    }

    #[test]
    fn test_offset_clamped() {
        let config = Config {
            timezone: TimezoneConfig {
                utc_offset_hours: 99,
            },
            ..Config::default()
        };
        assert_eq!(config.utc_offset(), FixedOffset::east_opt(23 * 3600).unwrap());
    }
}
