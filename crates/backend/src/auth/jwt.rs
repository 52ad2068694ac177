//! JWT validation for identity provider session tokens.

use jsonwebtoken::{decode, Validation};

use super::types::{AuthConfig, Claims};

/// Validate a JWT token and return claims.
pub fn validate_token(
    config: &AuthConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(config.algorithm);
    // Provider session tokens carry `azp` rather than an audience.
    validation.validate_aud = false;
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(token, &config.decoding_key, &validation)?;

    Ok(token_data.claims)
}

/// Create an HS256 token, standing in for the identity provider in tests.
#[cfg(test)]
pub fn create_token(
    secret: &str,
    subject: &str,
    issuer: Option<&str>,
    ttl: chrono::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        exp: (now + ttl).timestamp(),
        iat: Some(now.timestamp()),
        iss: issuer.map(str::to_string),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-for-testing-only";

    #[test]
    fn test_create_and_validate_token() {
        let config = AuthConfig::with_secret(SECRET);
        let token =
            create_token(SECRET, "user_123", None, Duration::hours(1)).expect("should create token");

        let claims = validate_token(&config, &token).expect("should validate token");
        assert_eq!(claims.sub, "user_123");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let config = AuthConfig::with_secret(SECRET);
        assert!(validate_token(&config, "invalid-token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            create_token(SECRET, "user_123", None, Duration::hours(1)).expect("should create token");
        let config = AuthConfig::with_secret("wrong-secret");
        assert!(validate_token(&config, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig::with_secret(SECRET);
        let token = create_token(SECRET, "user_123", None, Duration::hours(-2))
            .expect("should create token");
        assert!(validate_token(&config, &token).is_err());
    }

    #[test]
    fn test_issuer_checked_when_configured() {
        let mut config = AuthConfig::with_secret(SECRET);
        config.issuer = Some("https://issuer.example".to_string());

        let wrong = create_token(SECRET, "user_123", Some("https://other.example"), Duration::hours(1))
            .expect("should create token");
        assert!(validate_token(&config, &wrong).is_err());

        let right =
            create_token(SECRET, "user_123", Some("https://issuer.example"), Duration::hours(1))
                .expect("should create token");
        assert!(validate_token(&config, &right).is_ok());
    }
}
