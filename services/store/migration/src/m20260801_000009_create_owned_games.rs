use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnedGames::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OwnedGames::UserId).uuid().not_null())
                    .col(ColumnDef::new(OwnedGames::GameId).uuid().not_null())
                    .col(
                        ColumnDef::new(OwnedGames::GrantedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(OwnedGames::UserId)
                            .col(OwnedGames::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OwnedGames::Table, OwnedGames::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OwnedGames::Table, OwnedGames::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OwnedGames::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OwnedGames {
    Table,
    UserId,
    GameId,
    GrantedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
}
