use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::SortCriterion;

/// Query parameters for the nearby shops endpoint
///
/// When `lat`/`lon` are omitted the service resolves the origin through IP
/// geolocation (with its documented fallback coordinate).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyShopsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
    #[serde(default)]
    pub sort: Option<SortCriterion>,
    #[validate(range(min = 100, max = 50000))]
    #[serde(alias = "radius_m", rename = "radiusM")]
    pub radius_m: Option<u32>,
    #[validate(range(min = 1, max = 60))]
    pub limit: Option<usize>,
}

/// Query parameters accompanying a damage report upload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DamageReportQuery {
    #[validate(length(min = 1))]
    pub brand: String,
    #[validate(range(min = 1.0, max = 500.0))]
    #[serde(alias = "car_price_lakhs", rename = "carPriceLakhs")]
    pub car_price_lakhs: f64,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Body for the cost estimation call to the inference backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRequest {
    pub brand: String,
    pub location: String,
    pub severity: String,
    pub car_price_lakhs: f64,
}
