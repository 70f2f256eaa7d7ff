use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Utc};

use crate::error::BotError;
use crate::models::time_slot::DEFAULT_HORIZON_DAYS;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub utc_offset_minutes: i32,
    pub horizon_days: u32,
    pub draft_ttl: Duration,
    pub cleanup_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            utc_offset_minutes: 330,
            horizon_days: DEFAULT_HORIZON_DAYS,
            draft_ttl: Duration::from_secs(1800),
            cleanup_interval: Duration::from_secs(600),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let utc_offset_minutes = parse_or(&lookup, "SUKOON_UTC_OFFSET_MINUTES", defaults.utc_offset_minutes)?;
        if offset_from_minutes(utc_offset_minutes).is_none() {
            return Err(BotError::Config {
                key: "SUKOON_UTC_OFFSET_MINUTES".to_string(),
                value: utc_offset_minutes.to_string(),
            });
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            utc_offset_minutes,
            horizon_days: parse_or(&lookup, "SUKOON_BOOKING_HORIZON_DAYS", defaults.horizon_days)?,
            draft_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SUKOON_DRAFT_TTL_SECS",
                defaults.draft_ttl.as_secs(),
            )?),
            cleanup_interval: Duration::from_secs(parse_or(
                &lookup,
                "SUKOON_CLEANUP_INTERVAL_SECS",
                defaults.cleanup_interval.as_secs(),
            )?),
        })
    }

    /// Calendar day in the service's time zone.
    pub fn today(&self) -> NaiveDate {
        match offset_from_minutes(self.utc_offset_minutes) {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Utc::now().date_naive(),
        }
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, BotError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| BotError::Config {
            key: key.to_string(),
            value: raw,
        }),
    }
}
