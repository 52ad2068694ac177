use anyhow::{Context, Result};
use std::env;

use crate::auth::AuthConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    pub database_pool_size: usize,
    pub port: u16,
    /// Origins allowed by CORS; empty means permissive.
    pub frontend_origins: Vec<String>,
    pub frontend_dir: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            database_pool_size: lookup("DATABASE_POOL_SIZE")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_POOL_SIZE must be a valid number")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "4000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            frontend_origins: lookup("FRONTEND_URL")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().trim_end_matches('/').to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            frontend_dir: lookup("FRONTEND_DIR").unwrap_or_else(|| "frontend/dist".to_string()),
            auth: AuthConfig::from_lookup(&lookup).context("Invalid auth configuration")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("AUTH_JWT_SECRET", "secret")]).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database_pool_size, 10);
        assert!(config.database_url.is_none());
        assert!(config.frontend_origins.is_empty());
        assert_eq!(config.frontend_dir, "frontend/dist");
    }

    #[test]
    fn test_frontend_origins_split() {
        let config = load(&[
            ("AUTH_JWT_SECRET", "secret"),
            ("FRONTEND_URL", "http://localhost:3000/, https://todo.example.com"),
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(
            config.frontend_origins,
            vec!["http://localhost:3000", "https://todo.example.com"]
        );
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/todo"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(load(&[("AUTH_JWT_SECRET", "secret"), ("PORT", "abc")]).is_err());
    }

    #[test]
    fn test_auth_required() {
        assert!(load(&[]).is_err());
    }
}
