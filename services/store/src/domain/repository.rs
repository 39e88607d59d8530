#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use gamestore_domain::pagination::PageRequest;
use gamestore_domain::user::UserRole;

use crate::domain::types::{Cart, Comment, Game, Genre, Order, OwnedGame, StoreUser};
use crate::error::StoreServiceError;

/// Repository for customer accounts and their libraries.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreUser>, StoreServiceError>;
    async fn find_by_username(&self, username: &str)
    -> Result<Option<StoreUser>, StoreServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, StoreServiceError>;
    async fn create(&self, user: &StoreUser) -> Result<(), StoreServiceError>;

    /// Persist the editable profile fields (email, names, age).
    async fn update_profile(
        &self,
        id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        age: i16,
    ) -> Result<(), StoreServiceError>;

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreServiceError>;
    async fn set_email_confirmed(&self, id: Uuid, confirmed: bool)
    -> Result<(), StoreServiceError>;
    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<(), StoreServiceError>;
    async fn set_profile_picture(&self, id: Uuid, url: &str) -> Result<(), StoreServiceError>;

    /// All accounts, admins first. Admin-only listing.
    async fn list_all(&self) -> Result<Vec<StoreUser>, StoreServiceError>;

    async fn list_owned_games(&self, user_id: Uuid)
    -> Result<Vec<OwnedGame>, StoreServiceError>;
    async fn owns_game(&self, user_id: Uuid, game_id: Uuid) -> Result<bool, StoreServiceError>;
}

/// Repository for the game catalog and its comments.
pub trait GameRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreServiceError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Game>, StoreServiceError>;
    async fn create(&self, game: &Game) -> Result<(), StoreServiceError>;
    async fn update(&self, game: &Game) -> Result<(), StoreServiceError>;

    /// Delete a game. Returns `true` if a row was deleted. Cart and order
    /// links cascade at the database level.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError>;

    async fn list_comments(&self, game_id: Uuid) -> Result<Vec<Comment>, StoreServiceError>;
    async fn add_comment(
        &self,
        game_id: Uuid,
        author_id: Uuid,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreServiceError>;
}

/// Repository for catalog genres.
pub trait GenreRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Genre>, StoreServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, StoreServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, StoreServiceError>;
    async fn create(&self, name: &str, description: &str) -> Result<(), StoreServiceError>;

    /// Update a genre. Returns `true` if a row was updated.
    async fn update(
        &self,
        id: i32,
        name: &str,
        description: &str,
    ) -> Result<bool, StoreServiceError>;

    /// Delete a genre. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError>;
}

/// Repository for shopping carts.
pub trait CartRepository: Send + Sync {
    /// The customer's cart with its lines joined against the live catalog,
    /// in insertion order. `None` if the customer has never opened a cart.
    async fn find_by_customer(&self, customer_id: Uuid)
    -> Result<Option<Cart>, StoreServiceError>;

    /// Persist a new empty cart.
    async fn create(&self, cart_id: Uuid, customer_id: Uuid) -> Result<(), StoreServiceError>;

    /// Append a game at the end of the cart.
    async fn add_game(&self, cart_id: Uuid, game_id: Uuid) -> Result<(), StoreServiceError>;

    /// Remove a single line. Returns `true` if a row was deleted.
    async fn remove_game(&self, cart_id: Uuid, game_id: Uuid)
    -> Result<bool, StoreServiceError>;

    /// Remove every line.
    async fn clear(&self, cart_id: Uuid) -> Result<(), StoreServiceError>;
}

/// Read side of the order ledger.
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreServiceError>;
    async fn list_by_customer(&self, customer_id: Uuid)
    -> Result<Vec<Order>, StoreServiceError>;

    /// Every order, oldest first. Admin-only listing.
    async fn list_all(&self) -> Result<Vec<Order>, StoreServiceError>;
}

/// Write side of a purchase: order insert, library grant, and cart clear
/// committed as one transaction. No partial state is visible on failure.
pub trait CheckoutStore: Send + Sync {
    /// Persist `order` with its lines, grant each purchased game to the
    /// order's customer (already-owned entries are skipped), and clear the
    /// given cart if any.
    async fn commit(
        &self,
        order: &Order,
        clear_cart: Option<Uuid>,
    ) -> Result<(), StoreServiceError>;
}

/// Outbound notification gateway. Delivery is best-effort at every call
/// site: failures are logged, never propagated to the customer.
pub trait EmailSender: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), StoreServiceError>;
}

/// External media store: takes bytes, returns a retrievable URL.
pub trait BlobStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        bucket: &str,
    ) -> Result<String, StoreServiceError>;

    /// Fetch `source_url` and re-host it in the media store.
    async fn sideload(&self, source_url: &str, bucket: &str)
    -> Result<String, StoreServiceError>;
}
