//! Runtime settings. Nothing is read from disk; two optional environment
//! variables can override the loan period and pin the reference date.

use chrono::{Local, NaiveDate};

use crate::error::BookError;
use crate::models::DEFAULT_LOAN_PERIOD_DAYS;
use crate::table::DATE_FORMAT;

/// Overrides the number of days a loan may run.
pub const LOAN_PERIOD_VAR: &str = "LIBRARY_LOAN_PERIOD_DAYS";
/// Pins "today" to a fixed `yyyy-mm-dd` date instead of the local clock.
pub const TODAY_VAR: &str = "LIBRARY_TODAY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub loan_period_days: u32,
    /// Reference date for overdue checks and for seeding demo records.
    pub today: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            today: Local::now().date_naive(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, BookError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing or blank keys
    /// keep their defaults; present keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BookError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(LOAN_PERIOD_VAR)) {
            config.loan_period_days = raw
                .parse()
                .map_err(|_| invalid(LOAN_PERIOD_VAR, &raw))?;
        }

        if let Some(raw) = non_blank(lookup(TODAY_VAR)) {
            config.today = NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map_err(|_| invalid(TODAY_VAR, &raw))?;
        }

        tracing::debug!(
            loan_period_days = config.loan_period_days,
            today = %config.today,
            "loaded configuration"
        );
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn invalid(key: &str, value: &str) -> BookError {
    BookError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
