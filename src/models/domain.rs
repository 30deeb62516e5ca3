use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]. The value
/// type itself does not validate ranges; inbound API queries do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A repair shop candidate being ranked
///
/// Shape follows the place-search response: rating and opening status are
/// optional, and `distance_km` is populated by the ranking pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairShop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    pub location: Coordinate,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "openNow", default)]
    pub open_now: Option<bool>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
}

impl RepairShop {
    /// Rating with the unrated-is-zero convention used for ranking
    pub fn rating_or_default(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// Sort key selector for the ranking operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    Distance,
    Rating,
}

/// Where a shop listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopSource {
    /// Fetched from the live place-search API
    Live,
    /// Bundled sample data served when the live search is unavailable
    Fallback,
}

/// Severity and panel location detected by the inference backend
///
/// The model may return additional fields (confidence, annotated image URL);
/// those are passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageAnalysis {
    pub detected_location: String,
    pub detected_severity: String,
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_json::Value>,
}
