use sea_orm::{
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, TransactionTrait,
};
use tracing::debug;

use models::{day_opening, place};

use crate::errors::ServiceError;
use crate::place::domain::{OpeningHours, PlaceRecord};
use crate::place::mapper;
use crate::place::repository::PlaceRepository;

#[derive(Clone)]
pub struct SeaOrmPlaceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPlaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PlaceRepository for SeaOrmPlaceRepository {
    async fn insert_all(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>, ServiceError> {
        let txn = self.db.begin().await?;
        let mut saved = Vec::with_capacity(places.len());
        for record in places {
            let p = place::create(&txn, &record.label, &record.location).await?;
            let rows = record.opening_hours.as_ref().map(mapper::to_rows).unwrap_or_default();
            let created = day_opening::insert_many(&txn, p.id, &rows).await?;
            debug!(place_id = p.id, openings = created.len(), "place inserted");
            saved.push(mapper::to_record(&p, &created));
        }
        txn.commit().await?;
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<PlaceRecord>, ServiceError> {
        let places = place::Entity::find().order_by_asc(place::Column::Id).all(&self.db).await?;
        let ids: Vec<i64> = places.iter().map(|p| p.id).collect();
        let rows = day_opening::find_by_places(&self.db, &ids).await?;
        Ok(places.iter().map(|p| mapper::to_record(p, &rows)).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<PlaceRecord>, ServiceError> {
        let Some(p) = place::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let rows = day_opening::find_by_places(&self.db, &[p.id]).await?;
        Ok(Some(mapper::to_record(&p, &rows)))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        if place::Entity::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }
        let openings = day_opening::delete_by_place(&txn, id).await?;
        place::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        debug!(place_id = id, openings, "place deleted");
        Ok(true)
    }

    async fn replace(&self, id: i64, label: &str, location: &str, hours: &OpeningHours) -> Result<Option<PlaceRecord>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(p) = place::rename(&txn, id, label, location).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        day_opening::delete_by_place(&txn, id).await?;
        let created = day_opening::insert_many(&txn, id, &mapper::to_rows(hours)).await?;
        txn.commit().await?;
        Ok(Some(mapper::to_record(&p, &created)))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(place::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::domain::{DayOfWeek, OpenInterval};
    use crate::test_support::get_db;

    fn record(label: &str) -> PlaceRecord {
        let mut hours = OpeningHours::default();
        hours.days.insert(DayOfWeek::Monday, vec![OpenInterval::new("13:00", "17:00", "open"), OpenInterval::new("08:00", "12:00", "open")]);
        hours.days.insert(DayOfWeek::Thursday, vec![OpenInterval::new("08:00", "00:00", "open")]);
        PlaceRecord { id: None, label: label.into(), location: "Luzern".into(), opening_hours: Some(hours) }
    }

    #[tokio::test]
    async fn place_roundtrip_through_database() -> Result<(), anyhow::Error> {
        let repo = SeaOrmPlaceRepository::new(get_db().await?);
        let saved = repo.insert_all(vec![record("A"), record("B")]).await?;
        assert_eq!(saved.len(), 2);
        let id = saved[0].id.unwrap();

        let found = repo.find(id).await?.unwrap();
        assert_eq!(found, saved[0]);
        let monday = &found.opening_hours.as_ref().unwrap().days[&DayOfWeek::Monday];
        assert_eq!(monday[0].start, "13:00");

        let listed = repo.list().await?;
        assert_eq!(listed.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(repo.count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn replace_swaps_openings() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmPlaceRepository::new(db.clone());
        let id = repo.insert_all(vec![record("A")]).await?[0].id.unwrap();

        let mut hours = OpeningHours::default();
        hours.days.insert(DayOfWeek::Sunday, vec![OpenInterval::new("10:00", "14:00", "emergency")]);
        let updated = repo.replace(id, "A2", "Chur", &hours).await?.unwrap();
        assert_eq!(updated.location, "Chur");
        assert_eq!(updated.opening_hours, Some(hours));

        let rows = day_opening::find_by_places(&db, &[id]).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].day_of_week, "SUNDAY");

        assert!(repo.replace(id + 100, "X", "Y", &OpeningHours::default()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_openings() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmPlaceRepository::new(db.clone());
        let id = repo.insert_all(vec![record("A")]).await?[0].id.unwrap();
        assert!(repo.delete(id).await?);
        assert!(repo.find(id).await?.is_none());
        assert!(day_opening::find_by_places(&db, &[id]).await?.is_empty());
        assert!(!repo.delete(id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn failed_batch_leaves_nothing_behind() -> Result<(), anyhow::Error> {
        let repo = SeaOrmPlaceRepository::new(get_db().await?);
        let mut bad = record("B");
        bad.label = String::new();
        assert!(repo.insert_all(vec![record("A"), bad]).await.is_err());
        assert_eq!(repo.count().await?, 0);
        Ok(())
    }
}
