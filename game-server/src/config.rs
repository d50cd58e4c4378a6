use std::env;
use std::str::FromStr;
use std::time::Duration;

use game_core::DEFAULT_COMPLETION_DELAY;
use game_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub completion_delay_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            completion_delay_ms: env_or(
                "COMPLETION_DELAY_MS",
                DEFAULT_COMPLETION_DELAY.as_millis() as u64,
            ),
        }
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an environment variable, keeping `default` when it is unset or
/// malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}={:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
