use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_addr: String,

    pub api_prefix: String, // empty => routes at the root

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://atenciones.db".to_string(),
            db_max_connections: 5,
            server_addr: "127.0.0.1:5000".to_string(),
            api_prefix: String::new(),
            log_dir: "logs".to_string(),
            log_level: tracing::Level::DEBUG,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            server_addr: lookup("SERVER_ADDR").unwrap_or(defaults.server_addr),
            api_prefix: lookup("API_PREFIX")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_prefix),
            log_dir: lookup("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.parse().map_err(|_| ConfigError { key, value }),
        None => Ok(default),
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
    fn unset_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:5000");
        assert_eq!(config.database_url, "sqlite://atenciones.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.api_prefix, "");
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn reads_overrides_and_strips_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_ADDR", "0.0.0.0:8080"),
            ("API_PREFIX", "/api/"),
            ("LOG_LEVEL", "warn"),
            ("DB_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8080");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.log_level, tracing::Level::WARN);
        assert_eq!(config.db_max_connections, 2);
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = Config::from_lookup(lookup(&[("DB_MAX_CONNECTIONS", "many")])).unwrap_err();
        assert_eq!(err.key, "DB_MAX_CONNECTIONS");
        assert_eq!(err.value, "many");
    }
}
