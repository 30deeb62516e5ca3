// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, DamageAnalysis, RepairShop, ShopSource, SortCriterion};
pub use requests::{CostRequest, DamageReportQuery, NearbyShopsQuery};
pub use responses::{
    DamageReportResponse, ErrorResponse, GeolocateResponse, HealthResponse, NearbyShopsResponse,
};
