use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Order;
use crate::error::StoreServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::order::{GetOrderUseCase, GetOrdersUseCase};

#[derive(Serialize)]
pub struct OrderGameResponse {
    pub game_id: String,
    pub title: String,
    pub price: Decimal,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_name: String,
    pub games: Vec<OrderGameResponse>,
    pub total_price: Decimal,
    pub status: &'static str,
    #[serde(serialize_with = "gamestore_core::serde::to_rfc3339_ms")]
    pub ordered_at: chrono::DateTime<chrono::Utc>,
}

impl OrderResponse {
    pub fn from_domain(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name,
            games: order
                .games
                .into_iter()
                .map(|game| OrderGameResponse {
                    game_id: game.game_id.to_string(),
                    title: game.title,
                    price: game.price,
                })
                .collect(),
            total_price: order.total_price,
            status: order.status.as_str(),
            ordered_at: order.ordered_at,
        }
    }
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn get_orders(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, StoreServiceError> {
    let usecase = GetOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(identity.user_id).await?;
    Ok(Json(
        orders.into_iter().map(OrderResponse::from_domain).collect(),
    ))
}

// ── GET /order/{id} ──────────────────────────────────────────────────────────

pub async fn get_order(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, StoreServiceError> {
    let usecase = GetOrderUseCase {
        orders: state.order_repo(),
    };
    let order = usecase.execute(id, identity.user_id, identity.role).await?;
    Ok(Json(OrderResponse::from_domain(order)))
}
