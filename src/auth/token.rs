//! Signed, time-limited bearer tokens.
//!
//! Tokens are JWTs signed with HS256 over the configured secret. Any HMAC
//! variant is accepted on the way in; every other algorithm is refused so a
//! token cannot pick its own verification scheme.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Longest accepted token lifetime, 100 years.
pub const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// user id
    pub sub: String,
    /// seconds since epoch
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Malformed token")]
    MalformedToken,

    #[error("Unexpected signing method")]
    InvalidSigningMethod,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token expiry out of range")]
    ExpiryOutOfRange,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_ttl_secs)
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, chrono::Utc::now().timestamp())
    }

    pub fn issue_at(&self, subject: &str, now: i64) -> Result<String, TokenError> {
        let exp = now
            .checked_add(self.ttl_secs)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verifies algorithm, signature and expiry against `now`. The token is
    /// valid only while `exp > now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // expiry is checked below against the caller's clock, without leeway
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidAlgorithm => TokenError::InvalidSigningMethod,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::MalformedToken,
            },
        )?;

        if token_data.claims.exp <= now {
            return Err(TokenError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new("secret", 3600);
        let token = tokens.issue("42").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
    }

    #[test]
    fn test_expiry_is_ttl_after_issue() {
        let tokens = TokenService::new("secret", 3600);
        let token = tokens.issue_at("7", NOW).unwrap();

        let claims = tokens.verify_at(&token, NOW).unwrap();
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = TokenService::new("secret", 60);
        let token = tokens.issue_at("7", NOW).unwrap();

        assert!(tokens.verify_at(&token, NOW + 59).is_ok());
        assert!(matches!(
            tokens.verify_at(&token, NOW + 60),
            Err(TokenError::TokenExpired)
        ));
        assert!(matches!(
            tokens.verify_at(&token, NOW + 3600),
            Err(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_overflowing_expiry_is_an_error() {
        let tokens = TokenService::new("secret", i64::MAX);
        assert!(matches!(
            tokens.issue_at("1", NOW),
            Err(TokenError::ExpiryOutOfRange)
        ));
    }

    #[test]
    fn test_longest_ttl_still_issues() {
        let tokens = TokenService::new("secret", MAX_TTL_SECS);
        let token = tokens.issue("1").unwrap();
        assert_eq!(tokens.verify(&token).unwrap().sub, "1");
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = TokenService::new("secret1", 3600);
        let verifier = TokenService::new("secret2", 3600);

        let token = issuer.issue("1").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_other_hmac_variants_are_accepted() {
        let tokens = TokenService::new("secret", 3600);
        let claims = Claims {
            sub: "9".to_string(),
            exp: NOW + 10,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(tokens.verify_at(&token, NOW).unwrap(), claims);
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        let tokens = TokenService::new("secret", 3600);
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{}}}"#, NOW + 10));
        let signature = URL_SAFE_NO_PAD.encode("not-a-real-signature");
        let token = format!("{header}.{payload}.{signature}");

        assert!(matches!(
            tokens.verify_at(&token, NOW),
            Err(TokenError::InvalidSigningMethod)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = TokenService::new("secret", 3600);
        assert!(matches!(
            tokens.verify("invalid.token.here"),
            Err(TokenError::MalformedToken)
        ));
        assert!(matches!(tokens.verify(""), Err(TokenError::MalformedToken)));
    }
}
