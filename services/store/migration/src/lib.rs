use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_genres;
mod m20260801_000003_create_games;
mod m20260801_000004_create_comments;
mod m20260801_000005_create_shopping_carts;
mod m20260801_000006_create_cart_games;
mod m20260801_000007_create_orders;
mod m20260801_000008_create_order_games;
mod m20260801_000009_create_owned_games;
mod m20260801_000010_seed_genres;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_genres::Migration),
            Box::new(m20260801_000003_create_games::Migration),
            Box::new(m20260801_000004_create_comments::Migration),
            Box::new(m20260801_000005_create_shopping_carts::Migration),
            Box::new(m20260801_000006_create_cart_games::Migration),
            Box::new(m20260801_000007_create_orders::Migration),
            Box::new(m20260801_000008_create_order_games::Migration),
            Box::new(m20260801_000009_create_owned_games::Migration),
            Box::new(m20260801_000010_seed_genres::Migration),
        ]
    }
}
