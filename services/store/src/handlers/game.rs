use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gamestore_domain::pagination::PageRequest;

use crate::domain::types::{Comment, Game};
use crate::error::StoreServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::game::{
    AddCommentUseCase, GetCommentsUseCase, GetGameUseCase, GetGamesUseCase,
};

#[derive(Serialize)]
pub struct GameResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub release_date: chrono::NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre: String,
}

impl GameResponse {
    pub fn from_domain(game: Game) -> Self {
        Self {
            id: game.id.to_string(),
            title: game.title,
            description: game.description,
            image_url: game.image_url,
            video_url: game.video_url,
            release_date: game.release_date,
            publisher: game.publisher,
            price: game.price,
            genre: game.genre_name,
        }
    }
}

// ── GET /games ───────────────────────────────────────────────────────────────

pub async fn get_games(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<GameResponse>>, StoreServiceError> {
    let usecase = GetGamesUseCase {
        games: state.game_repo(),
    };
    let games = usecase.execute(page).await?;
    Ok(Json(games.into_iter().map(GameResponse::from_domain).collect()))
}

// ── GET /games/{id} ──────────────────────────────────────────────────────────

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameResponse>, StoreServiceError> {
    let usecase = GetGameUseCase {
        games: state.game_repo(),
    };
    let game = usecase.execute(id).await?;
    Ok(Json(GameResponse::from_domain(game)))
}

// ── GET /games/{id}/comments ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    #[serde(serialize_with = "gamestore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl CommentResponse {
    fn from_domain(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            author_id: comment.author_id.to_string(),
            author_name: comment.author_name,
            author_avatar_url: comment.author_avatar_url,
            created_at: comment.created_at,
        }
    }
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CommentResponse>>, StoreServiceError> {
    let usecase = GetCommentsUseCase {
        games: state.game_repo(),
    };
    let comments = usecase.execute(id).await?;
    Ok(Json(
        comments.into_iter().map(CommentResponse::from_domain).collect(),
    ))
}

// ── POST /games/{id}/comments ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub async fn add_comment(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddCommentRequest>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = AddCommentUseCase {
        games: state.game_repo(),
    };
    usecase.execute(id, identity.user_id, &body.content).await?;
    Ok(StatusCode::CREATED)
}
