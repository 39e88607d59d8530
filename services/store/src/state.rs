use sea_orm::DatabaseConnection;

use crate::infra::blob::HttpBlobStore;
use crate::infra::db::{
    DbCartRepository, DbCheckoutStore, DbGameRepository, DbGenreRepository, DbOrderRepository,
    DbUserRepository,
};
use crate::infra::email::HttpEmailSender;
use crate::usecase::checkout::CustomerLocks;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    /// Base URL confirmation links point back at.
    pub public_url: String,
    pub locks: CustomerLocks,
    pub mailer: HttpEmailSender,
    pub blobs: HttpBlobStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn game_repo(&self) -> DbGameRepository {
        DbGameRepository {
            db: self.db.clone(),
        }
    }

    pub fn genre_repo(&self) -> DbGenreRepository {
        DbGenreRepository {
            db: self.db.clone(),
        }
    }

    pub fn cart_repo(&self) -> DbCartRepository {
        DbCartRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn checkout_store(&self) -> DbCheckoutStore {
        DbCheckoutStore {
            db: self.db.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(jwt_secret: &str) -> Self {
        Self {
            db: DatabaseConnection::Disconnected,
            jwt_secret: jwt_secret.into(),
            public_url: "http://localhost:3100".into(),
            locks: CustomerLocks::new(),
            mailer: HttpEmailSender::new("http://localhost:9925", "store@example.com"),
            blobs: HttpBlobStore::new("http://localhost:9000", "http://localhost:9000"),
        }
    }
}
