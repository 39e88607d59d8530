use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Title).string().not_null())
                    .col(ColumnDef::new(Games::Description).text().not_null())
                    .col(ColumnDef::new(Games::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Games::VideoUrl).string().null())
                    .col(ColumnDef::new(Games::ReleaseDate).date().not_null())
                    .col(ColumnDef::new(Games::Publisher).string().not_null())
                    .col(
                        ColumnDef::new(Games::Price)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::GenreId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Games::Table, Games::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
    VideoUrl,
    ReleaseDate,
    Publisher,
    Price,
    GenreId,
}

#[derive(Iden)]
enum Genres {
    Table,
    Id,
}
