use uuid::Uuid;

use gamestore::error::StoreServiceError;
use gamestore::usecase::cart::{
    AddGameToCartUseCase, ClearCartUseCase, GetCartUseCase, RemoveGameFromCartUseCase,
};

use crate::helpers::{MockCartRepo, MockGameRepo, test_game, test_user};

#[tokio::test]
async fn first_cart_access_creates_an_empty_cart() {
    let user = test_user(true);
    let carts = MockCartRepo::empty();

    let uc = GetCartUseCase {
        carts: carts.clone(),
    };
    let cart = uc.execute(user.id).await.unwrap();
    assert!(cart.games.is_empty());

    // Second access returns the same cart instead of minting another.
    let again = uc.execute(user.id).await.unwrap();
    assert_eq!(again.id, cart.id);
}

#[tokio::test]
async fn add_remove_round_trip() {
    let user = test_user(true);
    let game = test_game("Celeste", "10.00");
    let carts = MockCartRepo::empty();
    let games = MockGameRepo::new(vec![game.clone()]);

    AddGameToCartUseCase {
        carts: carts.clone(),
        games: games.clone(),
    }
    .execute(user.id, game.id)
    .await
    .unwrap();

    // Adding the same game twice conflicts rather than duplicating the line.
    let result = AddGameToCartUseCase {
        carts: carts.clone(),
        games: games.clone(),
    }
    .execute(user.id, game.id)
    .await;
    assert!(matches!(result, Err(StoreServiceError::GameAlreadyInCart)));

    RemoveGameFromCartUseCase {
        carts: carts.clone(),
    }
    .execute(user.id, game.id)
    .await
    .unwrap();
    let cart = carts.cart.lock().unwrap().clone().unwrap();
    assert!(cart.games.is_empty());
}

#[tokio::test]
async fn removing_game_not_in_cart_is_a_404() {
    let user = test_user(true);
    let carts = MockCartRepo::empty();

    // Materialize an empty cart first.
    GetCartUseCase {
        carts: carts.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();

    let result = RemoveGameFromCartUseCase { carts }
        .execute(user.id, Uuid::now_v7())
        .await;
    assert!(matches!(result, Err(StoreServiceError::GameNotInCart)));
}

#[tokio::test]
async fn remove_all_empties_the_cart() {
    let user = test_user(true);
    let game_a = test_game("Celeste", "10.00");
    let game_b = test_game("Hades", "15.00");
    let carts = MockCartRepo::empty();
    let games = MockGameRepo::new(vec![game_a.clone(), game_b.clone()]);

    for game_id in [game_a.id, game_b.id] {
        AddGameToCartUseCase {
            carts: carts.clone(),
            games: games.clone(),
        }
        .execute(user.id, game_id)
        .await
        .unwrap();
    }

    ClearCartUseCase {
        carts: carts.clone(),
    }
    .execute(user.id)
    .await
    .unwrap();
    let cart = carts.cart.lock().unwrap().clone().unwrap();
    assert!(cart.games.is_empty());
}
