//! HS256 token issue and validation.
//!
//! Three token kinds share one claims shape, separated by the `purpose`
//! claim: `access` (bearer auth), `confirm_email` (the link mailed at
//! registration), and `reset_password` (the link mailed on a recovery
//! request). A token of one purpose never validates as another.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::error::StoreServiceError;

/// Access tokens live for 24 hours.
pub const ACCESS_TOKEN_EXP: u64 = 24 * 60 * 60;
/// Confirmation links stay valid for 24 hours.
pub const CONFIRM_TOKEN_EXP: u64 = 24 * 60 * 60;
/// Password reset links stay valid for 24 hours.
pub const RESET_TOKEN_EXP: u64 = 24 * 60 * 60;

const PURPOSE_ACCESS: &str = "access";
const PURPOSE_CONFIRM: &str = "confirm_email";
const PURPOSE_RESET: &str = "reset_password";

/// JWT claims for both token purposes.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: i16,
    pub purpose: String,
    pub exp: u64,
}

/// Identity carried by a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn issue(
    user_id: Uuid,
    role: UserRole,
    purpose: &str,
    ttl: u64,
    secret: &str,
) -> Result<String, StoreServiceError> {
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role: role.as_i16(),
        purpose: purpose.to_owned(),
        exp: now_secs() + ttl,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| StoreServiceError::Internal(e.into()))
}

fn validate(token: &str, secret: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
}

fn claims_to_info(claims: TokenClaims) -> Option<TokenInfo> {
    let user_id = claims.sub.parse::<Uuid>().ok()?;
    let role = UserRole::from_i16(claims.role)?;
    Some(TokenInfo { user_id, role })
}

pub fn issue_access_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
) -> Result<String, StoreServiceError> {
    issue(user_id, role, PURPOSE_ACCESS, ACCESS_TOKEN_EXP, secret)
}

/// Validate a bearer token. Returns `Unauthorized` on any defect: bad
/// signature, expiry, wrong purpose, malformed subject or role.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, StoreServiceError> {
    validate(token, secret)
        .filter(|c| c.purpose == PURPOSE_ACCESS)
        .and_then(claims_to_info)
        .ok_or(StoreServiceError::Unauthorized)
}

pub fn issue_confirm_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
) -> Result<String, StoreServiceError> {
    issue(user_id, role, PURPOSE_CONFIRM, CONFIRM_TOKEN_EXP, secret)
}

/// Validate an email-confirmation token, returning the subject user id.
pub fn validate_confirm_token(token: &str, secret: &str) -> Result<Uuid, StoreServiceError> {
    validate(token, secret)
        .filter(|c| c.purpose == PURPOSE_CONFIRM)
        .and_then(|c| c.sub.parse::<Uuid>().ok())
        .ok_or(StoreServiceError::InvalidConfirmToken)
}

pub fn issue_reset_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
) -> Result<String, StoreServiceError> {
    issue(user_id, role, PURPOSE_RESET, RESET_TOKEN_EXP, secret)
}

/// Validate a password-reset token, returning the subject user id.
pub fn validate_reset_token(token: &str, secret: &str) -> Result<Uuid, StoreServiceError> {
    validate(token, secret)
        .filter(|c| c.purpose == PURPOSE_RESET)
        .and_then(|c| c.sub.parse::<Uuid>().ok())
        .ok_or(StoreServiceError::InvalidResetToken)
}
