use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreServiceError;
use crate::handlers::order::OrderResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::checkout::BuyGameUseCase;
use crate::usecase::user::{
    ChangePasswordUseCase, EditProfileInput, EditProfileUseCase, GetLibraryUseCase,
    UploadProfileImageUseCase,
};

// ── GET /library ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OwnedGameResponse {
    pub game_id: String,
    pub title: String,
    pub image_url: String,
    #[serde(serialize_with = "gamestore_core::serde::to_rfc3339_ms")]
    pub granted_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_library(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnedGameResponse>>, StoreServiceError> {
    let usecase = GetLibraryUseCase {
        users: state.user_repo(),
    };
    let library = usecase.execute(identity.user_id).await?;
    Ok(Json(
        library
            .into_iter()
            .map(|owned| OwnedGameResponse {
                game_id: owned.game_id.to_string(),
                title: owned.title,
                image_url: owned.image_url,
                granted_at: owned.granted_at,
            })
            .collect(),
    ))
}

// ── POST /library/add-game/{id} ──────────────────────────────────────────────

pub async fn buy_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let usecase = BuyGameUseCase {
        users: state.user_repo(),
        games: state.game_repo(),
        store: state.checkout_store(),
        mailer: state.mailer.clone(),
        locks: state.locks.clone(),
    };
    let order = usecase.execute(identity.user_id, id).await?;
    Ok(Json(OrderResponse::from_domain(order)))
}

// ── PATCH /profile ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EditProfileRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
}

pub async fn edit_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<EditProfileRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = EditProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            EditProfileInput {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                age: body.age,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /profile/change-password ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(identity.user_id, &body.current_password, &body.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /profile/image ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadImageResponse {
    pub file_url: String,
}

pub async fn upload_profile_image(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>, StoreServiceError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StoreServiceError::MissingData)?
    {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|_| StoreServiceError::MissingData)?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }
    let (filename, bytes) = upload.ok_or(StoreServiceError::MissingData)?;

    let usecase = UploadProfileImageUseCase {
        users: state.user_repo(),
        blobs: state.blobs.clone(),
    };
    let file_url = usecase.execute(identity.user_id, &filename, bytes).await?;
    Ok(Json(UploadImageResponse { file_url }))
}
