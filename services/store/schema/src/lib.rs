//! sea-orm entities for the store database.

pub mod cart_games;
pub mod comments;
pub mod games;
pub mod genres;
pub mod order_games;
pub mod orders;
pub mod owned_games;
pub mod shopping_carts;
pub mod users;
