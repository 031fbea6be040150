//! Bearer-token authentication: Argon2id password hashing, HS256 tokens, and
//! the `AuthUser` extractor that protected handlers take as an argument.

pub mod jwt;
pub mod password;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const ROLE_JOBSEEKER: &str = "jobseeker";
pub const ROLE_EMPLOYER: &str = "employer";
pub const ROLE_ADMIN: &str = "admin";

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    /// Gate for employer-only endpoints (posting/editing jobs, reviewing
    /// applicants). Admins pass as well.
    pub fn require_employer(&self) -> Result<(), AppError> {
        if self.role == ROLE_EMPLOYER || self.role == ROLE_ADMIN {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = state.jwt.verify(token)?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: &str) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "a@b.co".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_employer_passes_gate() {
        assert!(user_with_role(ROLE_EMPLOYER).require_employer().is_ok());
    }

    #[test]
    fn test_admin_passes_gate() {
        assert!(user_with_role(ROLE_ADMIN).require_employer().is_ok());
    }

    #[test]
    fn test_jobseeker_is_forbidden() {
        let err = user_with_role(ROLE_JOBSEEKER).require_employer();
        assert!(matches!(err, Err(AppError::Forbidden)));
    }
}
