// Service exports
pub mod cache;
pub mod geolocate;
pub mod inference;
pub mod places;

pub use cache::{CacheError, CacheKey, ShopCache};
pub use geolocate::{GeoLocator, GeolocateError, DEFAULT_LOCATION};
pub use inference::{DamageClient, InferenceError};
pub use places::{fallback_shops, PlacesClient, PlacesError};
