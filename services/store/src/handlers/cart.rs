use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Cart;
use crate::error::StoreServiceError;
use crate::handlers::order::OrderResponse;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::cart::{
    AddGameToCartUseCase, ClearCartUseCase, GetCartUseCase, RemoveGameFromCartUseCase,
};
use crate::usecase::checkout::CheckoutUseCase;

#[derive(Serialize)]
pub struct CartLineResponse {
    pub game_id: String,
    pub title: String,
    pub image_url: String,
    pub price: Decimal,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub games: Vec<CartLineResponse>,
    pub total_price: Decimal,
    pub item_count: usize,
}

impl CartResponse {
    fn from_domain(cart: Cart) -> Self {
        let total_price = cart.total_price();
        let item_count = cart.item_count();
        Self {
            id: cart.id.to_string(),
            games: cart
                .games
                .into_iter()
                .map(|line| CartLineResponse {
                    game_id: line.game_id.to_string(),
                    title: line.title,
                    image_url: line.image_url,
                    price: line.price,
                })
                .collect(),
            total_price,
            item_count,
        }
    }
}

// ── GET /shopping-cart ───────────────────────────────────────────────────────

pub async fn get_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, StoreServiceError> {
    let usecase = GetCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(identity.user_id).await?;
    Ok(Json(CartResponse::from_domain(cart)))
}

// ── POST /shopping-cart/add-game/{id} ────────────────────────────────────────

pub async fn add_game_to_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = AddGameToCartUseCase {
        carts: state.cart_repo(),
        games: state.game_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::OK)
}

// ── DELETE /shopping-cart/remove-game/{id} ───────────────────────────────────

pub async fn remove_game_from_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = RemoveGameFromCartUseCase {
        carts: state.cart_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::OK)
}

// ── POST /shopping-cart/remove-all ───────────────────────────────────────────

pub async fn clear_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, StoreServiceError> {
    let usecase = ClearCartUseCase {
        carts: state.cart_repo(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::OK)
}

// ── POST /shopping-cart/checkout ─────────────────────────────────────────────

pub async fn checkout(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let usecase = CheckoutUseCase {
        users: state.user_repo(),
        carts: state.cart_repo(),
        store: state.checkout_store(),
        mailer: state.mailer.clone(),
        locks: state.locks.clone(),
    };
    let order = usecase.execute(identity.user_id).await?;
    Ok(Json(OrderResponse::from_domain(order)))
}
