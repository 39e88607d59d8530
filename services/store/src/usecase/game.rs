use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use gamestore_domain::pagination::PageRequest;

use crate::domain::repository::{BlobStore, GameRepository, GenreRepository};
use crate::domain::types::{Comment, Game};
use crate::error::StoreServiceError;

/// Bucket game covers are re-hosted under.
const GAME_IMAGE_BUCKET: &str = "game-images";
/// Bucket trailer videos are re-hosted under.
const GAME_VIDEO_BUCKET: &str = "game-videos";

pub struct GetGamesUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> GetGamesUseCase<G> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Game>, StoreServiceError> {
        self.games.list(page.clamped()).await
    }
}

pub struct GetGameUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> GetGameUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<Game, StoreServiceError> {
        self.games
            .find_by_id(id)
            .await?
            .ok_or(StoreServiceError::GameNotFound)
    }
}

pub struct AddGameInput {
    pub title: String,
    pub description: String,
    /// Source URL of the cover, re-hosted in the media store before insert.
    pub image_url: String,
    pub video_url: Option<String>,
    pub release_date: NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre: String,
}

pub struct AddGameUseCase<G, R, B>
where
    G: GameRepository,
    R: GenreRepository,
    B: BlobStore,
{
    pub games: G,
    pub genres: R,
    pub blobs: B,
}

impl<G, R, B> AddGameUseCase<G, R, B>
where
    G: GameRepository,
    R: GenreRepository,
    B: BlobStore,
{
    pub async fn execute(&self, input: AddGameInput) -> Result<Game, StoreServiceError> {
        if input.title.trim().is_empty() {
            return Err(StoreServiceError::MissingData);
        }
        if input.price < Decimal::ZERO {
            return Err(StoreServiceError::InvalidPrice);
        }
        let genre = self
            .genres
            .find_by_name(&input.genre)
            .await?
            .ok_or(StoreServiceError::GenreNotFound)?;
        let image_url = self
            .blobs
            .sideload(&input.image_url, GAME_IMAGE_BUCKET)
            .await?;
        let video_url = match input.video_url {
            Some(source) => Some(self.blobs.sideload(&source, GAME_VIDEO_BUCKET).await?),
            None => None,
        };

        let game = Game {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            image_url,
            video_url,
            release_date: input.release_date,
            publisher: input.publisher,
            price: input.price,
            genre_id: genre.id,
            genre_name: genre.name,
        };
        self.games.create(&game).await?;
        Ok(game)
    }
}

pub struct UpdateGameInput {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// `Some` replaces the cover via the media store; `None` keeps it.
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub release_date: NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre: String,
}

pub struct UpdateGameUseCase<G, R, B>
where
    G: GameRepository,
    R: GenreRepository,
    B: BlobStore,
{
    pub games: G,
    pub genres: R,
    pub blobs: B,
}

impl<G, R, B> UpdateGameUseCase<G, R, B>
where
    G: GameRepository,
    R: GenreRepository,
    B: BlobStore,
{
    pub async fn execute(&self, input: UpdateGameInput) -> Result<Game, StoreServiceError> {
        let existing = self
            .games
            .find_by_id(input.id)
            .await?
            .ok_or(StoreServiceError::GameNotFound)?;
        if input.title.trim().is_empty() {
            return Err(StoreServiceError::MissingData);
        }
        if input.price < Decimal::ZERO {
            return Err(StoreServiceError::InvalidPrice);
        }
        let genre = self
            .genres
            .find_by_name(&input.genre)
            .await?
            .ok_or(StoreServiceError::GenreNotFound)?;
        let image_url = match input.image_url {
            Some(source) => self.blobs.sideload(&source, GAME_IMAGE_BUCKET).await?,
            None => existing.image_url,
        };

        let game = Game {
            id: existing.id,
            title: input.title,
            description: input.description,
            image_url,
            video_url: input.video_url,
            release_date: input.release_date,
            publisher: input.publisher,
            price: input.price,
            genre_id: genre.id,
            genre_name: genre.name,
        };
        self.games.update(&game).await?;
        Ok(game)
    }
}

pub struct DeleteGameUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> DeleteGameUseCase<G> {
    pub async fn execute(&self, id: Uuid) -> Result<(), StoreServiceError> {
        if self.games.delete(id).await? {
            Ok(())
        } else {
            Err(StoreServiceError::GameNotFound)
        }
    }
}

pub struct GetCommentsUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> GetCommentsUseCase<G> {
    pub async fn execute(&self, game_id: Uuid) -> Result<Vec<Comment>, StoreServiceError> {
        if self.games.find_by_id(game_id).await?.is_none() {
            return Err(StoreServiceError::GameNotFound);
        }
        self.games.list_comments(game_id).await
    }
}

pub struct AddCommentUseCase<G: GameRepository> {
    pub games: G,
}

impl<G: GameRepository> AddCommentUseCase<G> {
    pub async fn execute(
        &self,
        game_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<(), StoreServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StoreServiceError::EmptyComment);
        }
        if self.games.find_by_id(game_id).await?.is_none() {
            return Err(StoreServiceError::GameNotFound);
        }
        self.games
            .add_comment(game_id, author_id, content, Utc::now())
            .await
    }
}
