use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "backoffice.db")
    pub database_path: String,
    /// Admin token table, `token[:role],…` (default: empty)
    pub api_tokens: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_PATH` - SQLite database path (default: "backoffice.db")
    /// - `API_TOKENS` - comma separated `token[:role]` entries; role defaults to admin
    /// - `REQUEST_TIMEOUT_SECS` - per-request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "backoffice.db".to_string()),
            api_tokens: env::var("API_TOKENS").unwrap_or_default(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            database_path: "test.db".to_string(),
            api_tokens: String::new(),
            request_timeout_secs: 30,
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DATABASE_PATH");
        env::remove_var("API_TOKENS");
        env::remove_var("REQUEST_TIMEOUT_SECS");

        let config = Config::from_env();

        assert_eq!(config.database_path, "backoffice.db");
        assert_eq!(config.api_tokens, "");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
