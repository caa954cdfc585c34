//! Server configuration
//!
//! Read from the process environment after loading an optional `.env` file.

use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_SECRET_KEY: &str = "dev_key_super_secreta";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Keys password hashes; rotating it invalidates stored hashes
    pub secret_key: String,
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_key = match non_empty("SECRET_KEY") {
            Some(key) => key,
            None => {
                tracing::warn!("⚠️  No SECRET_KEY set - using development default");
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        let bind_addr = non_empty("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8000")?;

        let max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            secret_key,
            database_url: non_empty("DATABASE_URL"),
            bind_addr,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.secret_key, DEFAULT_SECRET_KEY);
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_reads_values() {
        let config = config(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://cedin@localhost/cedin"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://cedin@localhost/cedin")
        );
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_blank_database_url_is_unset() {
        let config = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_bind_addr() {
        assert!(config(&[("BIND_ADDR", "not-an-addr")]).is_err());
    }
}
