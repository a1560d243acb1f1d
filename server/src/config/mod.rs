use std::env;

pub mod http;

pub use http::{create_cors_layer, security_header_layers};

const DEFAULT_PORT: u16 = 5000;

pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    /// Panics when `DATABASE_URL` is missing; serving without a database
    /// target is never intended.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("DATABASE_URL").ok(), env::var("PORT").ok())
    }

    fn from_vars(database_url: Option<String>, port: Option<String>) -> Self {
        Self {
            database_url: database_url.expect("DATABASE_URL must be set"),
            port: port.and_then(|raw| raw.parse().ok()).unwrap_or(DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Option<String> {
        Some("postgres://localhost/soiree".to_string())
    }

    #[test]
    fn test_port_defaults_when_unset() {
        let config = Config::from_vars(url(), None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_port_parses_when_set() {
        let config = Config::from_vars(url(), Some("3030".to_string()));
        assert_eq!(config.port, 3030);
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = Config::from_vars(url(), Some("not-a-port".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    #[should_panic(expected = "DATABASE_URL must be set")]
    fn test_missing_database_url_panics() {
        let _ = Config::from_vars(None, None);
    }
}
