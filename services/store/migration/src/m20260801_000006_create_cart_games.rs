use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartGames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CartGames::CartId).uuid().not_null())
                    .col(ColumnDef::new(CartGames::GameId).uuid().not_null())
                    .col(ColumnDef::new(CartGames::Position).integer().not_null())
                    .col(
                        ColumnDef::new(CartGames::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CartGames::CartId)
                            .col(CartGames::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CartGames::Table, CartGames::CartId)
                            .to(ShoppingCarts::Table, ShoppingCarts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CartGames::Table, CartGames::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartGames::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CartGames {
    Table,
    CartId,
    GameId,
    Position,
    AddedAt,
}

#[derive(Iden)]
enum ShoppingCarts {
    Table,
    Id,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
}
