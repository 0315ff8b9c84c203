pub mod errors;
pub mod db;
pub mod place;
pub mod day_opening;
