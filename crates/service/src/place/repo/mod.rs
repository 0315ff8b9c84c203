pub mod seaorm;

pub use seaorm::SeaOrmPlaceRepository;
