use async_trait::async_trait;

use super::domain::{OpeningHours, PlaceRecord};
use crate::errors::ServiceError;

/// Persistence of places together with their weekly openings.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Insert all places in one unit of work; returns them with ids assigned.
    async fn insert_all(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>, ServiceError>;
    async fn list(&self) -> Result<Vec<PlaceRecord>, ServiceError>;
    async fn find(&self, id: i64) -> Result<Option<PlaceRecord>, ServiceError>;
    /// Returns `false` when no such place exists.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    /// Replace label, location and all openings. `None` when the id is unknown.
    async fn replace(&self, id: i64, label: &str, location: &str, hours: &OpeningHours) -> Result<Option<PlaceRecord>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockPlaceRepository {
        places: Mutex<BTreeMap<i64, PlaceRecord>>,
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl PlaceRepository for MockPlaceRepository {
        async fn insert_all(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>, ServiceError> {
            let mut store = self.places.lock().await;
            let mut next = self.next_id.lock().await;
            let mut saved = Vec::with_capacity(places.len());
            for mut p in places {
                *next += 1;
                p.id = Some(*next);
                store.insert(*next, p.clone());
                saved.push(p);
            }
            Ok(saved)
        }

        async fn list(&self) -> Result<Vec<PlaceRecord>, ServiceError> {
            Ok(self.places.lock().await.values().cloned().collect())
        }

        async fn find(&self, id: i64) -> Result<Option<PlaceRecord>, ServiceError> {
            Ok(self.places.lock().await.get(&id).cloned())
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.places.lock().await.remove(&id).is_some())
        }

        async fn replace(&self, id: i64, label: &str, location: &str, hours: &OpeningHours) -> Result<Option<PlaceRecord>, ServiceError> {
            let mut store = self.places.lock().await;
            let Some(existing) = store.get_mut(&id) else { return Ok(None) };
            existing.label = label.to_string();
            existing.location = location.to_string();
            existing.opening_hours = Some(hours.clone());
            Ok(Some(existing.clone()))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.places.lock().await.len() as u64)
        }
    }
}
