//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt as _};
use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::error::StoreServiceError;
use crate::state::AppState;
use crate::usecase::token::validate_access_token;

/// Caller identity proven by the `Authorization: Bearer` access token.
///
/// Missing, malformed, or expired tokens reject with 401. Role enforcement
/// (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = StoreServiceError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned());
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(StoreServiceError::Unauthorized)?;
            let info = validate_access_token(&token, &secret)?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::usecase::token::issue_access_token;

    async fn extract(header: Option<String>) -> Result<Identity, StoreServiceError> {
        let state = AppState::for_tests("secret");
        let mut builder = Request::builder().method("GET").uri("/test");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        Identity::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn should_extract_valid_bearer_token() {
        let user_id = Uuid::now_v7();
        let token = issue_access_token(user_id, UserRole::Admin, "secret").unwrap();
        let identity = extract(Some(format!("Bearer {token}"))).await.unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn should_reject_missing_header() {
        let result = extract(None).await;
        assert!(matches!(result, Err(StoreServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn should_reject_non_bearer_scheme() {
        let result = extract(Some("Basic dXNlcjpwYXNz".into())).await;
        assert!(matches!(result, Err(StoreServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn should_reject_forged_token() {
        let token = issue_access_token(Uuid::now_v7(), UserRole::User, "other-secret").unwrap();
        let result = extract(Some(format!("Bearer {token}"))).await;
        assert!(matches!(result, Err(StoreServiceError::Unauthorized)));
    }
}
