//! Environment-driven server configuration.

use std::env;
use std::net::Ipv4Addr;

use thiserror::Error;

use crate::external::DEFAULT_POSTS_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");
        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub external_posts_url: String,
    pub seed_demo_items: bool,
}

impl ServerConfig {
    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads HOST, PORT, APP_ENV, EXTERNAL_POSTS_URL and SEED_DEMO_ITEMS,
    /// falling back to the defaults of `ServerConfig::default()`.
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = env_or_default("HOST", &defaults.host);
        let port = env_or_default("PORT", &defaults.port.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{}", e),
            })?;
        let seed_demo_items = env_or_default("SEED_DEMO_ITEMS", "true")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "SEED_DEMO_ITEMS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            host,
            port,
            environment: Environment::from_env(),
            external_posts_url: env_or_default("EXTERNAL_POSTS_URL", &defaults.external_posts_url),
            seed_demo_items,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 3500,
            environment: Environment::Development,
            external_posts_url: DEFAULT_POSTS_URL.to_string(),
            seed_demo_items: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = ["HOST", "PORT", "APP_ENV", "EXTERNAL_POSTS_URL", "SEED_DEMO_ITEMS"];

    #[test]
    fn from_env_with_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), "0.0.0.0:3500");
            assert_eq!(config.environment, Environment::Development);
            assert_eq!(config.external_posts_url, DEFAULT_POSTS_URL);
            assert!(config.seed_demo_items);
        });
    }

    #[test]
    fn from_env_with_custom_values() {
        temp_env::with_vars(
            [
                ("HOST", Some("127.0.0.1")),
                ("PORT", Some("9000")),
                ("APP_ENV", Some("PRODUCTION")),
                ("EXTERNAL_POSTS_URL", Some("http://localhost:1/posts")),
                ("SEED_DEMO_ITEMS", Some("false")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:9000");
                assert!(config.environment.is_production());
                assert_eq!(config.external_posts_url, "http://localhost:1/posts");
                assert!(!config.seed_demo_items);
            },
        );
    }

    #[test]
    fn invalid_port_is_a_parse_error() {
        temp_env::with_var("PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PORT"));
        });
    }

    #[test]
    fn invalid_seed_flag_is_a_parse_error() {
        temp_env::with_vars([("PORT", None), ("SEED_DEMO_ITEMS", Some("maybe"))], || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "SEED_DEMO_ITEMS"));
        });
    }
}
