use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::places::fetcher::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_PHOTO_MAX_PX};

pub const API_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";

pub const DEFAULT_DELAY_MS: u64 = 200;
pub const DEFAULT_OUTPUT_PATH: &str = "lib/venues.generated.ts";
pub const DEFAULT_CITY: &str = "New York City";
pub const DEFAULT_CATEGORY: &str = "Bar & Restaurant";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GOOGLE_PLACES_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub delay_ms: u64,
    pub page_size: u32,
    pub max_retries: u32,
    pub photo_max_px: u32,
    pub output_path: PathBuf,
    pub city: String,
    pub category: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. The API key is the only
    /// required value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let string_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            api_key,
            base_url: string_or("PLACES_BASE_URL", DEFAULT_BASE_URL),
            delay_ms: parse_or(&lookup, "PLACES_DELAY_MS", DEFAULT_DELAY_MS)?,
            page_size: parse_or(&lookup, "PLACES_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
            max_retries: parse_or(&lookup, "PLACES_MAX_RETRIES", 0)?,
            photo_max_px: parse_or(&lookup, "PLACES_PHOTO_MAX_PX", DEFAULT_PHOTO_MAX_PX)?,
            output_path: PathBuf::from(string_or("PLACES_OUTPUT_PATH", DEFAULT_OUTPUT_PATH)),
            city: string_or("PLACES_CITY", DEFAULT_CITY),
            category: string_or("PLACES_CATEGORY", DEFAULT_CATEGORY),
        })
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);

        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.delay(), Duration::from_millis(DEFAULT_DELAY_MS));
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.max_retries, 0);
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg.city, "New York City");
    }

    #[test]
    fn test_overrides_and_invalid_numbers() {
        let cfg = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            ("PLACES_DELAY_MS", "0"),
            ("PLACES_PAGE_SIZE", "5"),
            ("PLACES_OUTPUT_PATH", "out/v.ts"),
        ]))
        .unwrap();
        assert_eq!(cfg.delay_ms, 0);
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.output_path, PathBuf::from("out/v.ts"));

        let err = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            ("PLACES_DELAY_MS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PLACES_DELAY_MS".to_string(),
                value: "soon".to_string()
            }
        );
    }
}
