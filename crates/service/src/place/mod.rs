//! Places and their weekly opening hours: domain, validation, repository,
//! service and the grouped weekly view.

pub mod domain;
pub mod grouping;
pub mod mapper;
pub mod repo;
pub mod repository;
pub mod service;
pub mod validation;

pub use repo::SeaOrmPlaceRepository;
pub use service::PlaceService;
