use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use gamestore_domain::order::OrderStatus;
use gamestore_domain::user::UserRole;

/// Customer account owned by the store service.
#[derive(Debug, Clone)]
pub struct StoreUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
    pub role: UserRole,
    pub profile_picture_url: Option<String>,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Catalog genre.
#[derive(Debug, Clone)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Catalog game, joined with its genre name at the repository boundary.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub release_date: NaiveDate,
    pub publisher: String,
    pub price: Decimal,
    pub genre_id: i32,
    pub genre_name: String,
}

/// Comment on a game's detail page, joined with author display fields.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub game_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A line in a shopping cart: the referenced game's current catalog fields.
#[derive(Debug, Clone)]
pub struct CartGame {
    pub game_id: Uuid,
    pub title: String,
    pub image_url: String,
    pub price: Decimal,
}

/// Per-customer mutable cart. Totals are derived from the current entries
/// on every read; nothing is stored.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub games: Vec<CartGame>,
}

impl Cart {
    pub fn total_price(&self) -> Decimal {
        self.games.iter().map(|g| g.price).sum()
    }

    pub fn item_count(&self) -> usize {
        self.games.len()
    }

    pub fn contains(&self, game_id: Uuid) -> bool {
        self.games.iter().any(|g| g.game_id == game_id)
    }
}

/// A purchased line inside an order, snapshotted at purchase time.
#[derive(Debug, Clone)]
pub struct OrderGame {
    pub game_id: Uuid,
    pub title: String,
    pub price: Decimal,
}

/// Immutable purchase record. `total_price` is frozen at creation.
/// `customer_name` is joined for display, not persisted on the order row.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub games: Vec<OrderGame>,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
}

/// A game in a customer's library.
#[derive(Debug, Clone)]
pub struct OwnedGame {
    pub game_id: Uuid,
    pub title: String,
    pub image_url: String,
    pub granted_at: DateTime<Utc>,
}

/// Usernames: 3–30 ASCII alphanumerics or underscores.
pub fn validate_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Minimal shape check: one `@` with a dot somewhere after it.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Passwords must be at least 8 characters.
pub fn validate_password(password: &str) -> bool {
    password.len() >= 8
}

/// Customers must state a plausible age.
pub fn validate_age(age: i16) -> bool {
    (1..=130).contains(&age)
}
