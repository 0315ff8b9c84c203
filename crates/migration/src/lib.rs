//! Migrator registering the place schema in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_place;
mod m20250601_000002_create_day_opening;
mod m20250601_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_place::Migration),
            Box::new(m20250601_000002_create_day_opening::Migration),
            // Indexes should always be applied last
            Box::new(m20250601_000003_add_indexes::Migration),
        ]
    }
}
