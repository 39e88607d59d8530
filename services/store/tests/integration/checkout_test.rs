use rust_decimal::Decimal;
use uuid::Uuid;

use gamestore::domain::types::Cart;
use gamestore::error::StoreServiceError;
use gamestore::usecase::checkout::{BuyGameUseCase, CheckoutUseCase, CustomerLocks};
use gamestore_domain::order::OrderStatus;

use crate::helpers::{
    MockCartRepo, MockCheckoutStore, MockGameRepo, MockUserRepo, RecordingMailer, cart_line,
    test_game, test_user,
};

// ── Whole-cart checkout ──────────────────────────────────────────────────────

#[tokio::test]
async fn checkout_turns_cart_into_approved_order() {
    let user = test_user(true);
    let game_a = test_game("Celeste", "10.00");
    let game_b = test_game("Hades", "15.00");
    let cart = Cart {
        id: Uuid::now_v7(),
        customer_id: user.id,
        games: vec![cart_line(&game_a), cart_line(&game_b)],
    };
    let carts = MockCartRepo::with_cart(cart);
    let store = MockCheckoutStore::wired_to(carts.cart_handle());
    let mailer = RecordingMailer::new();

    let uc = CheckoutUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        carts: carts.clone(),
        store: store.clone(),
        mailer: mailer.clone(),
        locks: CustomerLocks::new(),
    };
    let order = uc.execute(user.id).await.unwrap();

    assert_eq!(order.total_price, Decimal::new(2500, 2));
    assert_eq!(order.status, OrderStatus::Approved);
    assert_eq!(order.games.len(), 2);

    // Cart emptied, both games granted, receipt sent.
    let cart = carts.cart.lock().unwrap().clone().unwrap();
    assert!(cart.games.is_empty());
    let grants = store.grants.lock().unwrap();
    assert!(grants.contains(&(user.id, game_a.id)));
    assert!(grants.contains(&(user.id, game_b.id)));
    assert_eq!(mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn order_snapshot_survives_catalog_price_change() {
    let user = test_user(true);
    let game = test_game("Celeste", "10.00");
    let cart = Cart {
        id: Uuid::now_v7(),
        customer_id: user.id,
        games: vec![cart_line(&game)],
    };
    let carts = MockCartRepo::with_cart(cart);
    let store = MockCheckoutStore::wired_to(carts.cart_handle());

    let uc = CheckoutUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        carts,
        store: store.clone(),
        mailer: RecordingMailer::new(),
        locks: CustomerLocks::new(),
    };
    let order = uc.execute(user.id).await.unwrap();

    // The committed line carries the price at purchase time, not a
    // reference the catalog could later rewrite.
    let committed = store.committed.lock().unwrap();
    assert_eq!(committed[0].games[0].price, Decimal::new(1000, 2));
    assert_eq!(order.games[0].title, "Celeste");
}

// ── Double checkout race ─────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_checkouts_produce_exactly_one_order() {
    let user = test_user(true);
    let game = test_game("Celeste", "10.00");
    let cart = Cart {
        id: Uuid::now_v7(),
        customer_id: user.id,
        games: vec![cart_line(&game)],
    };
    let carts = MockCartRepo::with_cart(cart);
    let store = MockCheckoutStore::wired_to(carts.cart_handle());
    let users = MockUserRepo::new(vec![user.clone()]);
    let locks = CustomerLocks::new();

    let make_usecase = || CheckoutUseCase {
        users: users.clone(),
        carts: carts.clone(),
        store: store.clone(),
        mailer: RecordingMailer::new(),
        locks: locks.clone(),
    };
    let first = make_usecase();
    let second = make_usecase();
    let customer_id = user.id;

    let (a, b) = tokio::join!(
        tokio::spawn(async move { first.execute(customer_id).await }),
        tokio::spawn(async move { second.execute(customer_id).await }),
    );
    let results = [a.unwrap(), b.unwrap()];

    let ok = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(ok, 1, "exactly one checkout must win");
    assert!(results.iter().any(|r| matches!(
        r,
        Err(StoreServiceError::CheckoutWithoutCart)
    )));
    assert_eq!(store.committed.lock().unwrap().len(), 1);
    assert_eq!(store.grants.lock().unwrap().len(), 1);
}

// ── Direct purchase ──────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_purchase_grants_game_without_cart() {
    let user = test_user(true);
    let game = test_game("Hades", "15.00");
    let carts = MockCartRepo::empty();
    let store = MockCheckoutStore::wired_to(carts.cart_handle());

    let uc = BuyGameUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        games: MockGameRepo::new(vec![game.clone()]),
        store: store.clone(),
        mailer: RecordingMailer::new(),
        locks: CustomerLocks::new(),
    };
    let order = uc.execute(user.id, game.id).await.unwrap();

    assert_eq!(order.total_price, Decimal::new(1500, 2));
    assert!(store.grants.lock().unwrap().contains(&(user.id, game.id)));
}

#[tokio::test]
async fn repurchase_is_rejected_after_grant() {
    let user = test_user(true);
    let game = test_game("Hades", "15.00");
    let carts = MockCartRepo::empty();
    let store = MockCheckoutStore::wired_to(carts.cart_handle());
    let users = MockUserRepo::new(vec![user.clone()]);

    let uc = BuyGameUseCase {
        users: users.clone(),
        games: MockGameRepo::new(vec![game.clone()]),
        store: store.clone(),
        mailer: RecordingMailer::new(),
        locks: CustomerLocks::new(),
    };
    uc.execute(user.id, game.id).await.unwrap();

    // Reflect the grant in the ownership view, then buy again.
    users.library.lock().unwrap().push((
        user.id,
        gamestore::domain::types::OwnedGame {
            game_id: game.id,
            title: game.title.clone(),
            image_url: game.image_url.clone(),
            granted_at: chrono::Utc::now(),
        },
    ));
    let result = uc.execute(user.id, game.id).await;
    assert!(matches!(result, Err(StoreServiceError::GameAlreadyOwned)));
    assert_eq!(store.committed.lock().unwrap().len(), 1);
}
