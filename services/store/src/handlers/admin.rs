use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::domain::repository::GenreRepository as _;
use crate::error::StoreServiceError;
use crate::handlers::game::GameResponse;
use crate::handlers::order::OrderResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::game::{
    AddGameInput, AddGameUseCase, DeleteGameUseCase, UpdateGameInput, UpdateGameUseCase,
};
use crate::usecase::genre::{
    AddGenreUseCase, DeleteGenreUseCase, GetGenresUseCase, UpdateGenreUseCase,
};
use crate::usecase::order::GetAllOrdersUseCase;
use crate::usecase::user::{ListUsersUseCase, SetUserEnabledUseCase, SetUserRoleUseCase};

fn require_admin(identity: &Identity) -> Result<(), StoreServiceError> {
    if identity.role.is_admin() {
        Ok(())
    } else {
        Err(StoreServiceError::Forbidden)
    }
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
    pub role: &'static str,
    pub email_confirmed: bool,
    #[serde(serialize_with = "gamestore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUserResponse>>, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(
        users
            .into_iter()
            .map(|user| AdminUserResponse {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                age: user.age,
                role: user.role.as_str(),
                email_confirmed: user.email_confirmed,
                created_at: user.created_at,
            })
            .collect(),
    ))
}

// ── POST /admin/users/{id}/enable|disable ────────────────────────────────────

pub async fn enable_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    set_enabled(identity, state, id, true).await
}

pub async fn disable_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    set_enabled(identity, state, id, false).await
}

async fn set_enabled(
    identity: Identity,
    state: AppState,
    id: Uuid,
    enabled: bool,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = SetUserEnabledUseCase {
        users: state.user_repo(),
    };
    usecase.execute(id, enabled).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/users/{id}/promote|demote ────────────────────────────────────

pub async fn promote_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    set_role(identity, state, id, UserRole::Admin).await
}

pub async fn demote_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    set_role(identity, state, id, UserRole::User).await
}

async fn set_role(
    identity: Identity,
    state: AppState,
    id: Uuid,
    role: UserRole,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = SetUserRoleUseCase {
        users: state.user_repo(),
    };
    usecase.execute(id, role).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/games ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddGameRequest {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub release_date: chrono::NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre: String,
}

pub async fn add_game(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<AddGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), StoreServiceError> {
    require_admin(&identity)?;
    let usecase = AddGameUseCase {
        games: state.game_repo(),
        genres: state.genre_repo(),
        blobs: state.blobs.clone(),
    };
    let game = usecase
        .execute(AddGameInput {
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            video_url: body.video_url,
            release_date: body.release_date,
            publisher: body.publisher,
            price: body.price,
            genre: body.genre,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(GameResponse::from_domain(game))))
}

// ── PUT /admin/games/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateGameRequest {
    pub title: String,
    pub description: String,
    /// New cover source; omit to keep the current one.
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub release_date: chrono::NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre: String,
}

pub async fn update_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGameRequest>,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = UpdateGameUseCase {
        games: state.game_repo(),
        genres: state.genre_repo(),
        blobs: state.blobs.clone(),
    };
    usecase
        .execute(UpdateGameInput {
            id,
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            video_url: body.video_url,
            release_date: body.release_date,
            publisher: body.publisher,
            price: body.price,
            genre: body.genre,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/games/{id} ─────────────────────────────────────────────────

pub async fn delete_game(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = DeleteGameUseCase {
        games: state.game_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Genres ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

pub async fn list_genres(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreResponse>>, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = GetGenresUseCase {
        genres: state.genre_repo(),
    };
    let genres = usecase.execute().await?;
    Ok(Json(
        genres
            .into_iter()
            .map(|genre| GenreResponse {
                id: genre.id,
                name: genre.name,
                description: genre.description,
            })
            .collect(),
    ))
}

pub async fn get_genre(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GenreResponse>, StoreServiceError> {
    require_admin(&identity)?;
    let genre = state
        .genre_repo()
        .find_by_id(id)
        .await?
        .ok_or(StoreServiceError::GenreNotFound)?;
    Ok(Json(GenreResponse {
        id: genre.id,
        name: genre.name,
        description: genre.description,
    }))
}

#[derive(Deserialize)]
pub struct GenreRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub async fn add_genre(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<GenreRequest>,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = AddGenreUseCase {
        genres: state.genre_repo(),
    };
    usecase.execute(&body.name, &body.description).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_genre(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<GenreRequest>,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = UpdateGenreUseCase {
        genres: state.genre_repo(),
    };
    usecase.execute(id, &body.name, &body.description).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_genre(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = DeleteGenreUseCase {
        genres: state.genre_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/orders ────────────────────────────────────────────────────────

pub async fn list_orders(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, StoreServiceError> {
    require_admin(&identity)?;
    let usecase = GetAllOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute().await?;
    Ok(Json(
        orders.into_iter().map(OrderResponse::from_domain).collect(),
    ))
}
