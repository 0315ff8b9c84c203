pub mod types;
pub mod utils;

/// Greeting served from the service root.
pub const HOME_MESSAGE: &str = "Aerztekasse - code challenge - Home!";
