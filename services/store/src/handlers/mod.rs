pub mod admin;
pub mod auth;
pub mod cart;
pub mod game;
pub mod order;
pub mod user;
