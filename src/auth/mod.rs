//! Authentication and authorization.
//!
//! JWT bearer tokens carry the user id, username, and role; the
//! [`AuthUser`] extractor verifies them on every protected route. The
//! capability tables in [`capabilities`] gate what each role may do.

use crate::entities::user::Role;
use crate::errors::ServiceError;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod capabilities;

pub use capabilities::{capabilities as capability_set, ensure, ensure_status_change, Action, CapabilitySet, Resource};

/// Claim structure for JWT tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated actor extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Issues a signed token for a user.
pub fn issue_token(
    secret: &str,
    expiration_secs: i64,
    user_id: Uuid,
    username: &str,
    role: Role,
) -> Result<String, ServiceError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.as_str().to_string(),
        iat: now,
        exp: now + expiration_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::InternalError(format!("failed to sign token: {}", e)))
}

/// Verifies a token and returns the actor it names.
pub fn verify_token(secret: &str, token: &str) -> Result<AuthUser, ServiceError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))?;

    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ServiceError::Unauthorized("invalid token subject".to_string()))?;

    Ok(AuthUser {
        user_id,
        username: data.claims.username,
        role: Role::parse(&data.claims.role),
    })
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::InternalError(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServiceError::InternalError(format!("corrupt password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[async_trait]
impl FromRequestParts<crate::AppState> for AuthUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthorized("missing authorization header".into()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServiceError::Unauthorized("expected bearer token".into()))?;

        verify_token(&state.config.jwt_secret, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip_preserves_identity_and_role() {
        let id = Uuid::new_v4();
        let token = issue_token(SECRET, 3600, id, "jsmith", Role::Technician).unwrap();
        let user = verify_token(SECRET, &token).unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.username, "jsmith");
        assert_eq!(user.role, Role::Technician);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = issue_token(SECRET, 3600, Uuid::new_v4(), "jsmith", Role::Viewer).unwrap();
        assert!(matches!(
            verify_token("other-secret", &token),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn unknown_role_string_degrades_to_none() {
        assert_eq!(Role::parse("Administrator"), Role::None);
        assert_eq!(Role::parse("Superuser"), Role::Superuser);
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3cret-pw").unwrap();
        assert!(verify_password("s3cret-pw", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
