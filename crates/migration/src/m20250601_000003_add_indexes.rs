use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // DayOpening: lookups by owning place
        manager
            .create_index(
                Index::create()
                    .name("idx_day_opening_place")
                    .table(DayOpening::Table)
                    .col(DayOpening::PlaceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_day_opening_place").table(DayOpening::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DayOpening { Table, PlaceId }
