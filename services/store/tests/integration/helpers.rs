use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use gamestore::domain::repository::{
    CartRepository, CheckoutStore, EmailSender, GameRepository, UserRepository,
};
use gamestore::domain::types::{
    Cart, CartGame, Comment, Game, Order, OwnedGame, StoreUser,
};
use gamestore::error::StoreServiceError;
use gamestore::usecase::auth::hash_password;
use gamestore_domain::pagination::PageRequest;
use gamestore_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// The password every [`test_user`] is created with.
pub const TEST_PASSWORD: &str = "hunter22pass";

pub fn test_user(confirmed: bool) -> StoreUser {
    let now = Utc::now();
    StoreUser {
        id: Uuid::now_v7(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        first_name: "Alice".into(),
        last_name: "Doe".into(),
        age: 30,
        role: UserRole::User,
        profile_picture_url: None,
        email_confirmed: confirmed,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_game(title: &str, price: &str) -> Game {
    Game {
        id: Uuid::now_v7(),
        title: title.into(),
        description: "A game".into(),
        image_url: "https://cdn.example/cover.png".into(),
        video_url: None,
        release_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        publisher: "Acme".into(),
        price: price.parse().unwrap(),
        genre_id: 1,
        genre_name: "Action".into(),
    }
}

pub fn cart_line(game: &Game) -> CartGame {
    CartGame {
        game_id: game.id,
        title: game.title.clone(),
        image_url: game.image_url.clone(),
        price: game.price,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<StoreUser>>>,
    pub library: Arc<Mutex<Vec<(Uuid, OwnedGame)>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<StoreUser>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            library: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreUser>, StoreServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoreUser>, StoreServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, StoreServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
    async fn create(&self, user: &StoreUser) -> Result<(), StoreServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
    async fn update_profile(
        &self,
        id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        age: i16,
    ) -> Result<(), StoreServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.email = email.to_owned();
            user.first_name = first_name.to_owned();
            user.last_name = last_name.to_owned();
            user.age = age;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = hash.to_owned();
        }
        Ok(())
    }
    async fn set_email_confirmed(
        &self,
        id: Uuid,
        confirmed: bool,
    ) -> Result<(), StoreServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.email_confirmed = confirmed;
        }
        Ok(())
    }
    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<(), StoreServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.role = role;
        }
        Ok(())
    }
    async fn set_profile_picture(&self, id: Uuid, url: &str) -> Result<(), StoreServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.profile_picture_url = Some(url.to_owned());
        }
        Ok(())
    }
    async fn list_all(&self) -> Result<Vec<StoreUser>, StoreServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }
    async fn list_owned_games(&self, user_id: Uuid) -> Result<Vec<OwnedGame>, StoreServiceError> {
        Ok(self
            .library
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, g)| g.clone())
            .collect())
    }
    async fn owns_game(&self, user_id: Uuid, game_id: Uuid) -> Result<bool, StoreServiceError> {
        Ok(self
            .library
            .lock()
            .unwrap()
            .iter()
            .any(|(owner, g)| *owner == user_id && g.game_id == game_id))
    }
}

// ── MockGameRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockGameRepo {
    pub games: Arc<Mutex<Vec<Game>>>,
}

impl MockGameRepo {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games: Arc::new(Mutex::new(games)),
        }
    }
}

impl GameRepository for MockGameRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreServiceError> {
        Ok(self.games.lock().unwrap().iter().find(|g| g.id == id).cloned())
    }
    async fn list(&self, page: PageRequest) -> Result<Vec<Game>, StoreServiceError> {
        let games = self.games.lock().unwrap();
        Ok(games
            .iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }
    async fn create(&self, game: &Game) -> Result<(), StoreServiceError> {
        self.games.lock().unwrap().push(game.clone());
        Ok(())
    }
    async fn update(&self, game: &Game) -> Result<(), StoreServiceError> {
        let mut games = self.games.lock().unwrap();
        if let Some(slot) = games.iter_mut().find(|g| g.id == game.id) {
            *slot = game.clone();
        }
        Ok(())
    }
    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let mut games = self.games.lock().unwrap();
        let before = games.len();
        games.retain(|g| g.id != id);
        Ok(games.len() < before)
    }
    async fn list_comments(&self, _game_id: Uuid) -> Result<Vec<Comment>, StoreServiceError> {
        Ok(vec![])
    }
    async fn add_comment(
        &self,
        _game_id: Uuid,
        _author_id: Uuid,
        _content: &str,
        _created_at: DateTime<Utc>,
    ) -> Result<(), StoreServiceError> {
        Ok(())
    }
}

// ── MockCartRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCartRepo {
    pub cart: Arc<Mutex<Option<Cart>>>,
}

impl MockCartRepo {
    pub fn empty() -> Self {
        Self {
            cart: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Arc::new(Mutex::new(Some(cart))),
        }
    }

    /// Shared handle to the cart for commit wiring and post-run inspection.
    pub fn cart_handle(&self) -> Arc<Mutex<Option<Cart>>> {
        Arc::clone(&self.cart)
    }
}

impl CartRepository for MockCartRepo {
    async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<Cart>, StoreServiceError> {
        Ok(self
            .cart
            .lock()
            .unwrap()
            .clone()
            .filter(|c| c.customer_id == customer_id))
    }
    async fn create(&self, cart_id: Uuid, customer_id: Uuid) -> Result<(), StoreServiceError> {
        *self.cart.lock().unwrap() = Some(Cart {
            id: cart_id,
            customer_id,
            games: vec![],
        });
        Ok(())
    }
    async fn add_game(&self, cart_id: Uuid, game_id: Uuid) -> Result<(), StoreServiceError> {
        let mut guard = self.cart.lock().unwrap();
        let cart = guard.as_mut().filter(|c| c.id == cart_id);
        let cart = cart.ok_or(StoreServiceError::CartNotFound)?;
        cart.games.push(CartGame {
            game_id,
            title: "Stub".into(),
            image_url: "https://cdn.example/stub.png".into(),
            price: Decimal::ZERO,
        });
        Ok(())
    }
    async fn remove_game(&self, cart_id: Uuid, game_id: Uuid) -> Result<bool, StoreServiceError> {
        let mut guard = self.cart.lock().unwrap();
        let cart = guard.as_mut().filter(|c| c.id == cart_id);
        let cart = cart.ok_or(StoreServiceError::CartNotFound)?;
        let before = cart.games.len();
        cart.games.retain(|g| g.game_id != game_id);
        Ok(cart.games.len() < before)
    }
    async fn clear(&self, cart_id: Uuid) -> Result<(), StoreServiceError> {
        let mut guard = self.cart.lock().unwrap();
        let cart = guard.as_mut().filter(|c| c.id == cart_id);
        let cart = cart.ok_or(StoreServiceError::CartNotFound)?;
        cart.games.clear();
        Ok(())
    }
}

// ── MockCheckoutStore ────────────────────────────────────────────────────────

/// In-memory stand-in for the transactional commit: records the order,
/// grants the library with first-write-wins de-dup, and clears the cart.
#[derive(Clone)]
pub struct MockCheckoutStore {
    pub committed: Arc<Mutex<Vec<Order>>>,
    pub grants: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
    cart: Arc<Mutex<Option<Cart>>>,
}

impl MockCheckoutStore {
    pub fn wired_to(cart: Arc<Mutex<Option<Cart>>>) -> Self {
        Self {
            committed: Arc::new(Mutex::new(vec![])),
            grants: Arc::new(Mutex::new(HashSet::new())),
            cart,
        }
    }
}

impl CheckoutStore for MockCheckoutStore {
    async fn commit(
        &self,
        order: &Order,
        clear_cart: Option<Uuid>,
    ) -> Result<(), StoreServiceError> {
        self.committed.lock().unwrap().push(order.clone());
        let mut grants = self.grants.lock().unwrap();
        for game in &order.games {
            grants.insert((order.customer_id, game.game_id));
        }
        if let Some(cart_id) = clear_cart {
            let mut guard = self.cart.lock().unwrap();
            if let Some(cart) = guard.as_mut().filter(|c| c.id == cart_id) {
                cart.games.clear();
            }
        }
        Ok(())
    }
}

// ── Mailers ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl EmailSender for RecordingMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), StoreServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), subject.to_owned(), html_body.to_owned()));
        Ok(())
    }
}
