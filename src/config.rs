//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Longest configurable playlist validity: one hundred years.
pub const MAX_VALIDITY_HOURS: u32 = 24 * 366 * 100;

/// Scheduling engine settings.
///
/// Defaults match one-hour playlists valid for a day, with media paths
/// left relative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time budget of one playback cycle (s).
    pub budget_secs: f64,
    /// Safety cap on sequence entries per generation.
    pub max_entries: usize,
    /// Validity of a generated playlist (hours).
    pub validity_hours: u32,
    /// Prefix for media locations. `None` = relative paths.
    pub base_url: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget_secs: crate::HOUR_SECS,
            max_entries: crate::DEFAULT_MAX_ENTRIES,
            validity_hours: 24,
            base_url: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `SIGNAGE_TIME_BUDGET_SECS` | `3600`  |
    /// | `SIGNAGE_MAX_ENTRIES`      | `5000`  |
    /// | `SIGNAGE_PLAYLIST_HOURS`   | `24`    |
    /// | `SIGNAGE_BASE_URL`         | unset   |
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            budget_secs: env_parse("SIGNAGE_TIME_BUDGET_SECS")?.unwrap_or(defaults.budget_secs),
            max_entries: env_parse("SIGNAGE_MAX_ENTRIES")?.unwrap_or(defaults.max_entries),
            validity_hours: env_parse("SIGNAGE_PLAYLIST_HOURS")?
                .unwrap_or(defaults.validity_hours),
            base_url: std::env::var("SIGNAGE_BASE_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the time budget (s).
    pub fn with_budget_secs(mut self, budget_secs: f64) -> Self {
        self.budget_secs = budget_secs;
        self
    }

    /// Sets the entry cap.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the playlist validity (hours).
    pub fn with_validity_hours(mut self, hours: u32) -> Self {
        self.validity_hours = hours;
        self
    }

    /// Sets the media base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.budget_secs.is_finite() || self.budget_secs <= 0.0 {
            return Err(Error::Config(format!(
                "time budget must be positive, got {}",
                self.budget_secs
            )));
        }
        if self.max_entries == 0 {
            return Err(Error::Config("max entries must be positive".into()));
        }
        if self.validity_hours == 0 || self.validity_hours > MAX_VALIDITY_HOURS {
            return Err(Error::InvalidValidity(self.validity_hours));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}
