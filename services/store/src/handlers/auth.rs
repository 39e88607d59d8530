use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::StoreServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::auth::{
    ConfirmEmailUseCase, ForgotPasswordUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordUseCase,
};
use crate::usecase::user::GetProfileUseCase;

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        mailer: state.mailer.clone(),
        jwt_secret: state.jwt_secret.clone(),
        public_url: state.public_url.clone(),
    };
    usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            age: body.age,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StoreServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let token = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse { token }))
}

// ── GET /auth/confirm-email ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmEmailQuery {
    pub token: String,
}

pub async fn confirm_email(
    State(state): State<AppState>,
    Query(query): Query<ConfirmEmailQuery>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ConfirmEmailUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(&query.token).await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        mailer: state.mailer.clone(),
        jwt_secret: state.jwt_secret.clone(),
        public_url: state.public_url.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/reset-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(&body.token, &body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /auth/user ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
    pub role: &'static str,
    pub profile_picture_url: Option<String>,
    pub email_confirmed: bool,
    #[serde(serialize_with = "gamestore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_auth_user(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, StoreServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(ProfileResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        age: user.age,
        role: user.role.as_str(),
        profile_picture_url: user.profile_picture_url,
        email_confirmed: user.email_confirmed,
        created_at: user.created_at,
    }))
}
