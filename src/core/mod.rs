// Core algorithm exports
pub mod distance;
pub mod ranking;

pub use distance::{distance_km, haversine_distance};
pub use ranking::rank;
