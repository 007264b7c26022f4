use crate::readiness::ReadinessProber;
use std::{env, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub seed_mock_data: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parsed(&lookup, "PORT").unwrap_or(DEFAULT_PORT),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            seed_mock_data: lookup("APP_SEED_MOCK").is_some_and(|value| is_truthy(&value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub prober: ReadinessProber,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ReadinessProber::default();
        let millis = |key: &str, fallback: Duration| {
            parsed::<u64>(&lookup, key)
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };
        Self {
            api_base: lookup("API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            prober: ReadinessProber {
                max_attempts: parsed::<u32>(&lookup, "PROBE_MAX_ATTEMPTS")
                    .filter(|attempts| *attempts > 0)
                    .unwrap_or(defaults.max_attempts),
                retry_delay: millis("PROBE_DELAY_MS", defaults.retry_delay),
                attempt_timeout: millis("PROBE_TIMEOUT_MS", defaults.attempt_timeout),
            },
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse::<T>().ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
