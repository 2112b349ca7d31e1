//! Configuration loading for the demo wiring.

use std::time::Duration;

use thiserror::Error;

pub const UNITS_KEY: &str = "STOREFRONT_DEMO_UNITS";
pub const PRICE_KEY: &str = "STOREFRONT_DEMO_PRICE";
pub const TIMEOUT_KEY: &str = "STOREFRONT_REQUEST_TIMEOUT_MS";

/// Upper bound for `STOREFRONT_REQUEST_TIMEOUT_MS` (one hour).
pub const MAX_REQUEST_TIMEOUT_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the demo purchase run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub units: i64,
    pub price: i64,
    pub request_timeout: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            units: 2,
            price: 10,
            request_timeout: Duration::from_millis(500),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let units = parse(&lookup, UNITS_KEY)?.unwrap_or(defaults.units);
        let price = parse(&lookup, PRICE_KEY)?.unwrap_or(defaults.price);
        let request_timeout = match parse::<u64>(&lookup, TIMEOUT_KEY)? {
            Some(ms) if ms > MAX_REQUEST_TIMEOUT_MS => {
                return Err(ConfigError::Invalid {
                    key: TIMEOUT_KEY,
                    value: ms.to_string(),
                });
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.request_timeout,
        };

        if price < 0 {
            return Err(ConfigError::Invalid {
                key: PRICE_KEY,
                value: price.to_string(),
            });
        }

        Ok(Self {
            units,
            price,
            request_timeout,
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        assert_eq!(DemoConfig::from_lookup(lookup(&[])).unwrap(), DemoConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = DemoConfig::from_lookup(lookup(&[
            (UNITS_KEY, "3"),
            (PRICE_KEY, " 42 "),
            (TIMEOUT_KEY, "1500"),
        ]))
        .unwrap();

        assert_eq!(cfg.units, 3);
        assert_eq!(cfg.price, 42);
        assert_eq!(cfg.request_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn rejects_unparseable_value() {
        let err = DemoConfig::from_lookup(lookup(&[(UNITS_KEY, "two")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: UNITS_KEY,
                value: "two".to_string(),
            }
        );
    }

    #[test]
    fn rejects_timeout_above_bound() {
        let err = DemoConfig::from_lookup(lookup(&[(TIMEOUT_KEY, "9000000000000000")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: TIMEOUT_KEY,
                value: "9000000000000000".to_string(),
            }
        );

        let max = MAX_REQUEST_TIMEOUT_MS.to_string();
        let cfg = DemoConfig::from_lookup(lookup(&[(TIMEOUT_KEY, max.as_str())])).unwrap();
        assert_eq!(cfg.request_timeout, Duration::from_millis(MAX_REQUEST_TIMEOUT_MS));
    }

    #[test]
    fn rejects_negative_price() {
        let err = DemoConfig::from_lookup(lookup(&[(PRICE_KEY, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PRICE_KEY, .. }));
    }
}
