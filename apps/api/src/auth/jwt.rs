//! Bearer-token issuance and validation.
//!
//! Tokens are signed with HS256 (HMAC-SHA256). Expiry is configurable via
//! `JWT_EXPIRY_SECONDS` (24 h default). `JWT_SECRET` must be at least 32
//! characters; startup fails otherwise.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::errors::AppError;

/// Payload carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    /// jobseeker, employer, or admin; gates job-posting endpoints.
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Signing and verification keys, derived once at startup from `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_seconds: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_seconds: u64) -> anyhow::Result<Self> {
        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters");
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        })
    }

    /// Issues a token for an authenticated user.
    pub fn issue(&self, user_id: Uuid, email: &str, role: &str) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {e}")))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.expiry_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign token: {e}")))
    }

    /// Decodes and validates a bearer token. Any failure (bad signature,
    /// expired, malformed) maps to 401.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-0123456789-0123456789-0123456789";

    fn keys() -> JwtKeys {
        JwtKeys::new(SECRET, 3600).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtKeys::new("too-short", 3600).is_err());
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "dev@example.com", "employer").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "dev@example.com");
        assert_eq!(claims.role, "employer");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let keys = keys();
        let token = keys
            .issue(Uuid::new_v4(), "dev@example.com", "jobseeker")
            .unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        assert!(keys.verify(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys()
            .issue(Uuid::new_v4(), "dev@example.com", "jobseeker")
            .unwrap();

        let other = JwtKeys::new("another-secret-0123456789-0123456789", 3600).unwrap();
        assert!(other.verify(&token).is_err());
    }
}
