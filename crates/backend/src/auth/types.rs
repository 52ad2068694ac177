//! Auth-related types and configuration.

use jsonwebtoken::{Algorithm, DecodingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims read from identity provider session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the provider's user id)
    pub sub: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Issuer, checked when an expected issuer is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verified caller identity, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub external_id: String,
}

/// Why the token verification settings could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AUTH_JWT_PUBLIC_KEY or AUTH_JWT_SECRET must be set")]
    MissingKey,

    #[error("AUTH_JWT_PUBLIC_KEY is not a valid RSA key: {0}")]
    InvalidPublicKey(#[source] jsonwebtoken::errors::Error),
}

/// Auth configuration loaded from environment
#[derive(Clone)]
pub struct AuthConfig {
    pub decoding_key: DecodingKey,
    pub algorithm: Algorithm,
    pub issuer: Option<String>,
    pub cookie_name: String,
}

impl AuthConfig {
    pub const DEFAULT_COOKIE_NAME: &'static str = "__session";

    /// Verify tokens signed with a shared HS256 secret.
    pub fn with_secret(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            issuer: None,
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
        }
    }

    /// Verify RS256 tokens against the provider's PEM-encoded public key.
    pub fn with_public_key(pem: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self {
            decoding_key: DecodingKey::from_rsa_pem(pem.as_bytes())?,
            algorithm: Algorithm::RS256,
            issuer: None,
            cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
        })
    }

    /// Load auth configuration through a variable lookup.
    ///
    /// Env vars:
    /// - `AUTH_JWT_PUBLIC_KEY`: provider PEM public key (RS256), preferred
    /// - `AUTH_JWT_SECRET`: shared secret (HS256), used when no public key is set
    /// - `AUTH_ISSUER`: expected `iss` claim (optional)
    /// - `AUTH_COOKIE_NAME`: session cookie name (default `__session`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = if let Some(pem) = lookup("AUTH_JWT_PUBLIC_KEY") {
            // Multi-line keys are often supplied with escaped newlines.
            Self::with_public_key(&pem.replace("\\n", "\n"))
                .map_err(ConfigError::InvalidPublicKey)?
        } else if let Some(secret) = lookup("AUTH_JWT_SECRET") {
            Self::with_secret(&secret)
        } else {
            return Err(ConfigError::MissingKey);
        };

        config.issuer = lookup("AUTH_ISSUER");
        if let Some(cookie_name) = lookup("AUTH_COOKIE_NAME") {
            config.cookie_name = cookie_name;
        }

        Ok(config)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}
