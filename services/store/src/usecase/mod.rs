pub mod auth;
pub mod cart;
pub mod checkout;
pub mod game;
pub mod genre;
pub mod order;
pub mod token;
pub mod user;
