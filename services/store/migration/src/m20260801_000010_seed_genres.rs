use sea_orm_migration::prelude::*;

/// Fixed genre set the catalog ships with. Admins can add more at runtime.
const SEED: &[(&str, &str)] = &[
    ("Action", "Fast-paced games focused on combat and reflexes"),
    ("Adventure", "Exploration and narrative-driven games"),
    ("RPG", "Role-playing games with character progression"),
    ("Strategy", "Planning and resource-management games"),
    ("Simulation", "Games simulating real-world or fictional systems"),
    ("Sports", "Competitive sports and racing games"),
    ("Indie", "Independently developed titles"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, description) in SEED {
            let insert = Query::insert()
                .into_table(Genres::Table)
                .columns([Genres::Name, Genres::Description])
                .values_panic([(*name).into(), (*description).into()])
                .on_conflict(
                    OnConflict::column(Genres::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .to_owned();
            manager.exec_stmt(insert).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let names: Vec<Value> = SEED.iter().map(|(name, _)| (*name).into()).collect();
        let delete = Query::delete()
            .from_table(Genres::Table)
            .cond_where(Expr::col(Genres::Name).is_in(names))
            .to_owned();
        manager.exec_stmt(delete).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Genres {
    Table,
    Name,
    Description,
}
