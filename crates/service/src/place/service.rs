use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{GroupedPlace, PlaceRecord};
use super::grouping;
use super::repository::PlaceRepository;
use super::validation;
use crate::errors::ServiceError;

/// Place business service independent of web framework
pub struct PlaceService<R: PlaceRepository> {
    repo: Arc<R>,
}

impl<R: PlaceRepository> PlaceService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    fn not_found(id: i64) -> ServiceError {
        ServiceError::NotFound(format!("Place not found: {id}"))
    }

    /// Validate and store a batch of places.
    ///
    /// # Examples
    /// ```
    /// use service::place::{PlaceService, repository::mock::MockPlaceRepository};
    /// use service::place::domain::{DayOfWeek, OpenInterval, OpeningHours, PlaceRecord};
    /// use std::sync::Arc;
    /// let svc = PlaceService::new(Arc::new(MockPlaceRepository::default()));
    /// let mut hours = OpeningHours::default();
    /// hours.days.insert(DayOfWeek::Monday, vec![OpenInterval::new("08:00", "12:00", "open")]);
    /// let rec = PlaceRecord { id: None, label: "Praxis".into(), location: "Bern".into(), opening_hours: Some(hours) };
    /// let saved = tokio_test::block_on(svc.save_places(vec![rec])).unwrap();
    /// assert_eq!(saved[0].id, Some(1));
    /// ```
    #[instrument(skip(self, places), fields(count = places.len()))]
    pub async fn save_places(&self, places: Vec<PlaceRecord>) -> Result<Vec<PlaceRecord>, ServiceError> {
        let violations = validation::validate_new_places(&places);
        if !violations.is_empty() {
            warn!(violations = violations.len(), "rejected place payload");
            return Err(ServiceError::Validation(violations));
        }
        let saved = self.repo.insert_all(places).await?;
        info!(count = saved.len(), "places_saved");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<PlaceRecord>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<PlaceRecord, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| Self::not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(Self::not_found(id));
        }
        info!(place_id = id, "place_deleted");
        Ok(())
    }

    /// Full replacement of an existing place, openings included.
    #[instrument(skip(self, place), fields(place_id = ?place.id))]
    pub async fn update_place(&self, place: PlaceRecord) -> Result<PlaceRecord, ServiceError> {
        let violations = validation::validate_update(&place);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }
        let (Some(id), Some(hours)) = (place.id, place.opening_hours.as_ref()) else {
            return Err(ServiceError::Validation(vec![validation::ID_MANDATORY.to_string()]));
        };
        let updated = self
            .repo
            .replace(id, &place.label, &place.location, hours)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        info!(place_id = id, "place_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn grouped_opening_hours(&self, id: i64) -> Result<GroupedPlace, ServiceError> {
        let record = self.find_by_id(id).await?;
        Ok(grouping::group_place(&record))
    }

    /// Number of stored places.
    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }
}
