use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderGames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderGames::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderGames::GameId).uuid().not_null())
                    .col(ColumnDef::new(OrderGames::Title).string().not_null())
                    .col(
                        ColumnDef::new(OrderGames::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrderGames::OrderId)
                            .col(OrderGames::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderGames::Table, OrderGames::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OrderGames::Table, OrderGames::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderGames::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OrderGames {
    Table,
    OrderId,
    GameId,
    Title,
    Price,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
}
