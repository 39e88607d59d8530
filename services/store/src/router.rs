use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use gamestore_core::health::{healthz, readyz};
use gamestore_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    admin::{
        add_game, add_genre, delete_game, delete_genre, demote_user, disable_user, enable_user,
        get_genre, list_genres, list_orders, list_users, promote_user, update_game, update_genre,
    },
    auth::{confirm_email, forgot_password, get_auth_user, login, register, reset_password},
    cart::{add_game_to_cart, checkout, clear_cart, get_cart, remove_game_from_cart},
    game::{add_comment, get_comments, get_game, get_games},
    order::{get_order, get_orders},
    user::{buy_game, change_password, edit_profile, get_library, upload_profile_image},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/confirm-email", get(confirm_email))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/user", get(get_auth_user))
        // Catalog
        .route("/games", get(get_games))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/comments", get(get_comments))
        .route("/games/{id}/comments", post(add_comment))
        // Shopping cart
        .route("/shopping-cart", get(get_cart))
        .route("/shopping-cart/add-game/{id}", post(add_game_to_cart))
        .route("/shopping-cart/remove-game/{id}", delete(remove_game_from_cart))
        .route("/shopping-cart/remove-all", post(clear_cart))
        .route("/shopping-cart/checkout", post(checkout))
        // Orders and library
        .route("/orders", get(get_orders))
        .route("/order/{id}", get(get_order))
        .route("/library", get(get_library))
        .route("/library/add-game/{id}", post(buy_game))
        // Profile
        .route("/profile", patch(edit_profile))
        .route("/profile/change-password", post(change_password))
        .route("/profile/image", post(upload_profile_image))
        // Admin
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/enable", post(enable_user))
        .route("/admin/users/{id}/disable", post(disable_user))
        .route("/admin/users/{id}/promote", post(promote_user))
        .route("/admin/users/{id}/demote", post(demote_user))
        .route("/admin/games", post(add_game))
        .route("/admin/games/{id}", put(update_game))
        .route("/admin/games/{id}", delete(delete_game))
        .route("/admin/genres", get(list_genres))
        .route("/admin/genres", post(add_genre))
        .route("/admin/genres/{id}", get(get_genre))
        .route("/admin/genres/{id}", put(update_genre))
        .route("/admin/genres/{id}", delete(delete_genre))
        .route("/admin/orders", get(list_orders))
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
