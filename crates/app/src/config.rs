//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use domain::{Money, PricingPolicy};
use sequencer::{ScheduleError, StatusSchedule};
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The status offsets do not increase.
    #[error("invalid status schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Shell configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `DELIVERY_FEE_CENTS`: flat delivery fee (default: `399`)
/// - `TAX_RATE_BPS`: tax rate in basis points (default: `1000`)
/// - `STATUS_CONFIRMED_AFTER_MS`, `STATUS_PREPARING_AFTER_MS`,
///   `STATUS_READY_AFTER_MS`, `STATUS_DELIVERED_AFTER_MS`: offsets from
///   checkout (defaults: 2000, 5000, 8000, 11000)
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub pricing: PricingPolicy,
    pub schedule: StatusSchedule,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let fee_cents: i64 = parse(
            &lookup,
            "DELIVERY_FEE_CENTS",
            defaults.pricing.delivery_fee.cents(),
        )?;
        if fee_cents < 0 {
            return Err(ConfigError::Invalid {
                key: "DELIVERY_FEE_CENTS",
                value: fee_cents.to_string(),
                reason: "must not be negative".into(),
            });
        }

        let pricing = PricingPolicy {
            delivery_fee: Money::from_cents(fee_cents),
            tax_rate_bps: parse(&lookup, "TAX_RATE_BPS", defaults.pricing.tax_rate_bps)?,
        };

        let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
            parse(&lookup, key, default_ms).map(Duration::from_millis)
        };
        let steps = defaults.schedule.steps();
        let schedule = StatusSchedule::new(
            millis("STATUS_CONFIRMED_AFTER_MS", steps[0].after)?,
            millis("STATUS_PREPARING_AFTER_MS", steps[1].after)?,
            millis("STATUS_READY_AFTER_MS", steps[2].after)?,
            millis("STATUS_DELIVERED_AFTER_MS", steps[3].after)?,
        )?;

        let log_level = match lookup("RUST_LOG") {
            Some(value) => {
                if let Err(e) = tracing_subscriber::EnvFilter::try_new(&value) {
                    return Err(ConfigError::Invalid {
                        key: "RUST_LOG",
                        reason: e.to_string(),
                        value,
                    });
                }
                value
            }
            None => defaults.log_level,
        };

        Ok(Self {
            log_level,
            log_format: parse(&lookup, "LOG_FORMAT", defaults.log_format)?,
            pricing,
            schedule,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            pricing: PricingPolicy::default(),
            schedule: StatusSchedule::default(),
        }
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
