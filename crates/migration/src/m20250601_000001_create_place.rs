//! Create `place` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Place::Table)
                    .if_not_exists()
                    .col(big_integer(Place::Id).auto_increment().primary_key())
                    .col(text(Place::Label).not_null())
                    .col(text(Place::Location).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Place::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Place {
    Table,
    Id,
    Label,
    Location,
}
