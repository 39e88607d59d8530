use sea_orm::entity::prelude::*;
use rust_decimal::Decimal;

/// Completed purchase. Immutable once inserted; `total_price` is fixed at
/// checkout time and never recomputed from live catalog prices.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_price: Decimal,
    pub status: i16,
    pub ordered_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::order_games::Entity")]
    OrderGames,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderGames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
