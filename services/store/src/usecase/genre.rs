use crate::domain::repository::GenreRepository;
use crate::domain::types::Genre;
use crate::error::StoreServiceError;

pub struct GetGenresUseCase<G: GenreRepository> {
    pub genres: G,
}

impl<G: GenreRepository> GetGenresUseCase<G> {
    pub async fn execute(&self) -> Result<Vec<Genre>, StoreServiceError> {
        self.genres.list_all().await
    }
}

pub struct AddGenreUseCase<G: GenreRepository> {
    pub genres: G,
}

impl<G: GenreRepository> AddGenreUseCase<G> {
    pub async fn execute(&self, name: &str, description: &str) -> Result<(), StoreServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreServiceError::MissingData);
        }
        if self.genres.find_by_name(name).await?.is_some() {
            return Err(StoreServiceError::GenreNameTaken);
        }
        self.genres.create(name, description).await
    }
}

pub struct UpdateGenreUseCase<G: GenreRepository> {
    pub genres: G,
}

impl<G: GenreRepository> UpdateGenreUseCase<G> {
    pub async fn execute(
        &self,
        id: i32,
        name: &str,
        description: &str,
    ) -> Result<(), StoreServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreServiceError::MissingData);
        }
        if let Some(other) = self.genres.find_by_name(name).await? {
            if other.id != id {
                return Err(StoreServiceError::GenreNameTaken);
            }
        }
        if self.genres.update(id, name, description).await? {
            Ok(())
        } else {
            Err(StoreServiceError::GenreNotFound)
        }
    }
}

pub struct DeleteGenreUseCase<G: GenreRepository> {
    pub genres: G,
}

impl<G: GenreRepository> DeleteGenreUseCase<G> {
    pub async fn execute(&self, id: i32) -> Result<(), StoreServiceError> {
        if self.genres.delete(id).await? {
            Ok(())
        } else {
            Err(StoreServiceError::GenreNotFound)
        }
    }
}
