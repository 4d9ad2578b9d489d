//! Service configuration from environment variables

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::extractor::DEFAULT_DISTRIBUTED_LOAD;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Beam library JSON file, re-read on every run
    pub catalog_path: PathBuf,
    /// Base URL of the structural model bridge
    pub model_url: String,
    pub model_timeout: Duration,
    pub default_load: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            catalog_path: PathBuf::from("beam_library.json"),
            model_url: "http://127.0.0.1:8090".to_string(),
            model_timeout: Duration::from_secs(5),
            default_load: DEFAULT_DISTRIBUTED_LOAD,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup; unset keys keep their
    /// defaults and unparsable values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = parse_or(
            &lookup,
            "MODEL_BRIDGE_TIMEOUT_SECS",
            defaults.model_timeout.as_secs(),
        );

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            catalog_path: lookup("BEAM_LIBRARY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            model_url: lookup("MODEL_BRIDGE_URL").unwrap_or(defaults.model_url),
            model_timeout: Duration::from_secs(timeout_secs),
            default_load: parse_or(&lookup, "DEFAULT_DISTRIBUTED_LOAD", defaults.default_load),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(|_| None);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.default_load, 10.0);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8085"),
            ("BEAM_LIBRARY_PATH", "/data/library.json"),
            ("MODEL_BRIDGE_URL", "http://modelhost:9000"),
            ("MODEL_BRIDGE_TIMEOUT_SECS", "12"),
            ("DEFAULT_DISTRIBUTED_LOAD", "7.5"),
        ]));

        assert_eq!(config.bind_address(), "127.0.0.1:8085");
        assert_eq!(config.catalog_path, PathBuf::from("/data/library.json"));
        assert_eq!(config.model_url, "http://modelhost:9000");
        assert_eq!(config.model_timeout, Duration::from_secs(12));
        assert_eq!(config.default_load, 7.5);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("DEFAULT_DISTRIBUTED_LOAD", "ten"),
        ]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.default_load, 10.0);
    }
}
