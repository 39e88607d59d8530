use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use gamestore_domain::order::OrderStatus;

use crate::domain::repository::{
    CartRepository, CheckoutStore, EmailSender, GameRepository, UserRepository,
};
use crate::domain::types::{Order, OrderGame};
use crate::error::StoreServiceError;

/// Per-customer purchase serialization. Two concurrent checkouts for the
/// same customer take turns; different customers never contend.
#[derive(Clone, Default)]
pub struct CustomerLocks {
    inner: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl CustomerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_for(&self, customer_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(customer_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Drop a customer's entry once no purchase holds it anymore, so the
    /// map does not grow with every customer that ever checked out.
    pub fn release(&self, customer_id: Uuid) {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if map
            .get(&customer_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&customer_id);
        }
    }
}

/// Turn the whole cart into an order, grant the games, clear the cart.
pub struct CheckoutUseCase<U, C, S, M>
where
    U: UserRepository,
    C: CartRepository,
    S: CheckoutStore,
    M: EmailSender,
{
    pub users: U,
    pub carts: C,
    pub store: S,
    pub mailer: M,
    pub locks: CustomerLocks,
}

impl<U, C, S, M> CheckoutUseCase<U, C, S, M>
where
    U: UserRepository,
    C: CartRepository,
    S: CheckoutStore,
    M: EmailSender,
{
    pub async fn execute(&self, customer_id: Uuid) -> Result<Order, StoreServiceError> {
        let lock = self.locks.lock_for(customer_id);
        let result = {
            let _guard = lock.lock().await;
            self.checkout(customer_id).await
        };
        drop(lock);
        self.locks.release(customer_id);
        result
    }

    async fn checkout(&self, customer_id: Uuid) -> Result<Order, StoreServiceError> {
        let user = self
            .users
            .find_by_id(customer_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        let cart = self
            .carts
            .find_by_customer(customer_id)
            .await?
            .ok_or(StoreServiceError::CheckoutWithoutCart)?;
        if cart.games.is_empty() {
            return Err(StoreServiceError::CheckoutWithoutCart);
        }

        let order = Order {
            id: Uuid::now_v7(),
            customer_id,
            customer_name: user.full_name(),
            games: cart
                .games
                .iter()
                .map(|g| OrderGame {
                    game_id: g.game_id,
                    title: g.title.clone(),
                    price: g.price,
                })
                .collect(),
            total_price: cart.total_price(),
            status: OrderStatus::Approved,
            ordered_at: Utc::now(),
        };
        self.store.commit(&order, Some(cart.id)).await?;

        if let Err(e) = self
            .mailer
            .send(&user.email, "Your order is confirmed", &receipt_email(&order))
            .await
        {
            tracing::warn!(error = %e, order_id = %order.id, "receipt email not delivered");
        }
        Ok(order)
    }
}

/// Buy a single game immediately, skipping the cart.
pub struct BuyGameUseCase<U, G, S, M>
where
    U: UserRepository,
    G: GameRepository,
    S: CheckoutStore,
    M: EmailSender,
{
    pub users: U,
    pub games: G,
    pub store: S,
    pub mailer: M,
    pub locks: CustomerLocks,
}

impl<U, G, S, M> BuyGameUseCase<U, G, S, M>
where
    U: UserRepository,
    G: GameRepository,
    S: CheckoutStore,
    M: EmailSender,
{
    pub async fn execute(
        &self,
        customer_id: Uuid,
        game_id: Uuid,
    ) -> Result<Order, StoreServiceError> {
        let lock = self.locks.lock_for(customer_id);
        let result = {
            let _guard = lock.lock().await;
            self.buy(customer_id, game_id).await
        };
        drop(lock);
        self.locks.release(customer_id);
        result
    }

    async fn buy(&self, customer_id: Uuid, game_id: Uuid) -> Result<Order, StoreServiceError> {
        let user = self
            .users
            .find_by_id(customer_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        let game = self
            .games
            .find_by_id(game_id)
            .await?
            .ok_or(StoreServiceError::GameNotFound)?;
        if self.users.owns_game(customer_id, game_id).await? {
            return Err(StoreServiceError::GameAlreadyOwned);
        }

        let order = Order {
            id: Uuid::now_v7(),
            customer_id,
            customer_name: user.full_name(),
            games: vec![OrderGame {
                game_id: game.id,
                title: game.title.clone(),
                price: game.price,
            }],
            total_price: game.price,
            status: OrderStatus::Approved,
            ordered_at: Utc::now(),
        };
        self.store.commit(&order, None).await?;

        if let Err(e) = self
            .mailer
            .send(&user.email, "Your order is confirmed", &receipt_email(&order))
            .await
        {
            tracing::warn!(error = %e, order_id = %order.id, "receipt email not delivered");
        }
        Ok(order)
    }
}

fn receipt_email(order: &Order) -> String {
    let mut lines = String::new();
    for game in &order.games {
        lines.push_str(&format!("<li>{} — ${}</li>", game.title, game.price));
    }
    format!(
        "<h3>Thank you for your purchase, {}!</h3>\
         <ul>{lines}</ul>\
         <p>Total: ${}</p>\
         <p>Your games are already in your library.</p>",
        order.customer_name, order.total_price
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::domain::types::{Cart, CartGame};
    use crate::usecase::auth::tests::{MockUserRepo, test_user};
    use crate::usecase::cart::tests::{MockCartRepo, MockGameRepo, test_game};

    #[derive(Default)]
    struct MockCheckoutStore {
        committed: Mutex<Vec<(Order, Option<Uuid>)>>,
        fail: bool,
    }

    impl CheckoutStore for MockCheckoutStore {
        async fn commit(
            &self,
            order: &Order,
            clear_cart: Option<Uuid>,
        ) -> Result<(), StoreServiceError> {
            if self.fail {
                return Err(StoreServiceError::Internal(anyhow::anyhow!(
                    "commit aborted"
                )));
            }
            self.committed
                .lock()
                .unwrap()
                .push((order.clone(), clear_cart));
            Ok(())
        }
    }

    struct SilentMailer;

    impl EmailSender for SilentMailer {
        async fn send(
            &self,
            _to: &str,
            _subject: &str,
            _html_body: &str,
        ) -> Result<(), StoreServiceError> {
            Ok(())
        }
    }

    fn cart_with(customer_id: Uuid, games: Vec<CartGame>) -> Cart {
        Cart {
            id: Uuid::now_v7(),
            customer_id,
            games,
        }
    }

    fn cart_line(title: &str, price: &str) -> CartGame {
        CartGame {
            game_id: Uuid::now_v7(),
            title: title.into(),
            image_url: "https://cdn.example/cover.png".into(),
            price: price.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn should_checkout_whole_cart() {
        let user = test_user(true);
        let cart = cart_with(
            user.id,
            vec![cart_line("Celeste", "10.00"), cart_line("Hades", "25.00")],
        );
        let cart_id = cart.id;
        let uc = CheckoutUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            carts: MockCartRepo::with_cart(cart),
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let order = uc.execute(user.id).await.unwrap();
        assert_eq!(order.total_price, Decimal::new(3500, 2));
        assert_eq!(order.games.len(), 2);
        assert_eq!(order.status, OrderStatus::Approved);
        assert_eq!(order.customer_name, user.full_name());

        let committed = uc.store.committed.lock().unwrap();
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].1, Some(cart_id));
    }

    #[tokio::test]
    async fn checkout_without_cart_is_rejected() {
        let user = test_user(true);
        let uc = CheckoutUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            carts: MockCartRepo::empty(),
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let result = uc.execute(user.id).await;
        assert!(matches!(result, Err(StoreServiceError::CheckoutWithoutCart)));
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_rejected() {
        let user = test_user(true);
        let uc = CheckoutUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            carts: MockCartRepo::with_cart(cart_with(user.id, vec![])),
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let result = uc.execute(user.id).await;
        assert!(matches!(result, Err(StoreServiceError::CheckoutWithoutCart)));
        assert!(uc.store.committed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_commit_surfaces_and_sends_no_mail() {
        let user = test_user(true);
        let uc = CheckoutUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            carts: MockCartRepo::with_cart(cart_with(
                user.id,
                vec![cart_line("Celeste", "10.00")],
            )),
            store: MockCheckoutStore {
                fail: true,
                ..Default::default()
            },
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let result = uc.execute(user.id).await;
        assert!(matches!(result, Err(StoreServiceError::Internal(_))));
    }

    #[tokio::test]
    async fn should_buy_single_game() {
        let user = test_user(true);
        let game = test_game(Uuid::now_v7(), "Hades", "25.00");
        let uc = BuyGameUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            games: MockGameRepo { games: vec![game.clone()] },
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let order = uc.execute(user.id, game.id).await.unwrap();
        assert_eq!(order.total_price, game.price);
        assert_eq!(order.games.len(), 1);
        assert_eq!(uc.store.committed.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn buying_owned_game_conflicts() {
        let user = test_user(true);
        let game = test_game(Uuid::now_v7(), "Hades", "25.00");
        let mut users = MockUserRepo::new(vec![user.clone()]);
        users.library.push((
            user.id,
            crate::domain::types::OwnedGame {
                game_id: game.id,
                title: game.title.clone(),
                image_url: game.image_url.clone(),
                granted_at: Utc::now(),
            },
        ));
        let uc = BuyGameUseCase {
            users,
            games: MockGameRepo { games: vec![game.clone()] },
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };
        let result = uc.execute(user.id, game.id).await;
        assert!(matches!(result, Err(StoreServiceError::GameAlreadyOwned)));
        assert!(uc.store.committed.lock().unwrap().is_empty());
    }

    #[test]
    fn locks_are_per_customer() {
        let locks = CustomerLocks::new();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert!(Arc::ptr_eq(&locks.lock_for(a), &locks.lock_for(a)));
        assert!(!Arc::ptr_eq(&locks.lock_for(a), &locks.lock_for(b)));
    }

    #[test]
    fn release_evicts_only_unheld_entries() {
        let locks = CustomerLocks::new();
        let customer = Uuid::now_v7();

        let held = locks.lock_for(customer);
        locks.release(customer);
        // Still held here, so the entry survives.
        assert!(Arc::ptr_eq(&held, &locks.lock_for(customer)));

        let entry = Arc::downgrade(&held);
        drop(held);
        locks.release(customer);
        assert!(entry.upgrade().is_none());
    }

    #[tokio::test]
    async fn checkout_releases_the_customer_lock() {
        let user = test_user(true);
        let cart = cart_with(user.id, vec![cart_line("Celeste", "10.00")]);
        let uc = CheckoutUseCase {
            users: MockUserRepo::new(vec![user.clone()]),
            carts: MockCartRepo::with_cart(cart),
            store: MockCheckoutStore::default(),
            mailer: SilentMailer,
            locks: CustomerLocks::new(),
        };

        let entry = Arc::downgrade(&uc.locks.lock_for(user.id));
        uc.execute(user.id).await.unwrap();
        assert!(entry.upgrade().is_none());
    }
}
