//! Authentication against the external identity provider.
//!
//! This module provides:
//! - JWT validation for provider session tokens (RS256 public key or HS256 secret)
//! - `require_auth` middleware for protecting routes
//! - `AuthUser`, the verified caller handed to handlers

mod jwt;
mod middleware;
pub mod types;

pub use middleware::require_auth;
pub use types::{AuthConfig, AuthUser};

#[cfg(test)]
pub use jwt::create_token;
