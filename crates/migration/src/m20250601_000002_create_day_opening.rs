//! Create `day_opening` table.
//! One row per opening interval of a place on a given weekday.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DayOpening::Table)
                    .if_not_exists()
                    .col(big_integer(DayOpening::Id).auto_increment().primary_key())
                    .col(big_integer(DayOpening::PlaceId).not_null())
                    .col(string_len(DayOpening::DayOfWeek, 16).not_null())
                    .col(string_len(DayOpening::StartTime, 8).not_null())
                    .col(string_len(DayOpening::EndTime, 8).not_null())
                    .col(text_null(DayOpening::OpeningType))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_day_opening_place")
                            .from(DayOpening::Table, DayOpening::PlaceId)
                            .to(Place::Table, Place::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DayOpening::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DayOpening {
    Table,
    Id,
    PlaceId,
    DayOfWeek,
    StartTime,
    EndTime,
    OpeningType,
}

#[derive(DeriveIden)]
enum Place { Table, Id }
