use sea_orm::entity::prelude::*;
use rust_decimal::Decimal;

/// Catalog game record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub release_date: chrono::NaiveDate,
    pub publisher: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub genre_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::genres::Entity",
        from = "Column::GenreId",
        to = "super::genres::Column::Id"
    )]
    Genre,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::cart_games::Entity")]
    CartGames,
    #[sea_orm(has_many = "super::order_games::Entity")]
    OrderGames,
    #[sea_orm(has_many = "super::owned_games::Entity")]
    OwnedGames,
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genre.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::cart_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartGames.def()
    }
}

impl Related<super::order_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderGames.def()
    }
}

impl Related<super::owned_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnedGames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
