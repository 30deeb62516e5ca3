use serde::{Deserialize, Serialize};

use crate::models::domain::{Coordinate, DamageAnalysis, RepairShop, ShopSource, SortCriterion};

/// Response for the nearby shops endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyShopsResponse {
    pub origin: Coordinate,
    pub sort: SortCriterion,
    pub source: ShopSource,
    pub shops: Vec<RepairShop>,
    pub total_results: usize,
    /// Human-readable caveat, e.g. when sample data or the fallback origin is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Response for the geolocation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocateResponse {
    pub origin: Coordinate,
    pub used_fallback: bool,
}

/// Combined damage analysis and cost estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageReportResponse {
    pub analysis: DamageAnalysis,
    pub cost_prediction: serde_json::Value,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
