use sea_orm::entity::prelude::*;

/// Per-customer shopping cart. `customer_id` is unique, so at most one cart
/// per customer, created lazily on first cart access.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shopping_carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub customer_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CustomerId",
        to = "super::users::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::cart_games::Entity")]
    CartGames,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::cart_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartGames.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
