use crate::models::{Coordinate, RepairShop};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when querying the place-search API
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No repair shops found")]
    NoResults,
}

/// Place-search API client
///
/// Queries a Google-Places-style nearby search for car repair shops around an
/// origin coordinate. Ordering of the response is not trusted; ranking is
/// always recomputed downstream from raw coordinates.
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    client: Client,
}

/// Wire shape of a nearby-search response
#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    place_id: Option<String>,
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    geometry: PlaceGeometry,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: PlaceLatLng,
}

// The wire format says `lng`, the domain says `lon`.
#[derive(Debug, Deserialize)]
struct PlaceLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

impl From<PlaceResult> for RepairShop {
    fn from(place: PlaceResult) -> Self {
        let location = Coordinate::new(place.geometry.location.lat, place.geometry.location.lng);
        RepairShop {
            id: place.place_id.unwrap_or_else(|| place.name.clone()),
            name: place.name,
            vicinity: place.vicinity,
            location,
            rating: place.rating,
            open_now: place.opening_hours.and_then(|h| h.open_now),
            distance_km: None,
        }
    }
}

impl PlacesClient {
    /// Create a new place-search client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Fetch car repair shops within `radius_m` meters of `origin`
    pub async fn nearby_car_repair(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<RepairShop>, PlacesError> {
        let location = format!("{},{}", origin.lat, origin.lon);
        let url = format!(
            "{}/nearbysearch/json?location={}&radius={}&type=car_repair&key={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&location),
            radius_m,
            self.api_key
        );

        tracing::debug!("Fetching nearby shops around {}", location);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Nearby search failed: {}",
                response.status()
            )));
        }

        let body: NearbySearchResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        if let Some(status) = &body.status {
            if status != "OK" && status != "ZERO_RESULTS" {
                return Err(PlacesError::ApiError(format!(
                    "Nearby search returned status {}",
                    status
                )));
            }
        }

        if body.results.is_empty() {
            return Err(PlacesError::NoResults);
        }

        let shops: Vec<RepairShop> = body.results.into_iter().map(RepairShop::from).collect();
        tracing::debug!("Nearby search returned {} shops", shops.len());

        Ok(shops)
    }
}

/// Bundled sample shops served when the live search is unavailable
///
/// Mumbai-area data matching the sample set shipped with the original app.
pub fn fallback_shops() -> Vec<RepairShop> {
    let samples = [
        ("auto-service-center", "Auto Service Center", 19.1340, 72.8336, 4.5),
        ("car-care-solutions", "Car Care Solutions", 19.1440, 72.8436, 4.3),
        ("premium-auto-repair", "Premium Auto Repair", 19.1240, 72.8236, 4.7),
        ("quick-fix-garage", "Quick Fix Garage", 19.1540, 72.8536, 4.2),
        ("expert-auto-service", "Expert Auto Service", 19.1140, 72.8136, 4.6),
    ];

    samples
        .iter()
        .map(|(id, name, lat, lon, rating)| RepairShop {
            id: id.to_string(),
            name: name.to_string(),
            vicinity: None,
            location: Coordinate::new(*lat, *lon),
            rating: Some(*rating),
            open_now: None,
            distance_km: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shops_are_rated() {
        let shops = fallback_shops();
        assert_eq!(shops.len(), 5);
        assert!(shops.iter().all(|s| s.rating.is_some()));
    }

    #[test]
    fn test_place_result_conversion() {
        let json = serde_json::json!({
            "place_id": "abc123",
            "name": "AutoCare Center",
            "vicinity": "123 Main Street, Mumbai",
            "geometry": { "location": { "lat": 19.1345, "lng": 72.8340 } },
            "rating": 4.5,
            "opening_hours": { "open_now": true }
        });

        let place: PlaceResult = serde_json::from_value(json).unwrap();
        let shop = RepairShop::from(place);

        assert_eq!(shop.id, "abc123");
        assert_eq!(shop.location.lon, 72.8340);
        assert_eq!(shop.open_now, Some(true));
    }

    #[test]
    fn test_place_result_without_optionals() {
        let json = serde_json::json!({
            "name": "Nameless Garage",
            "geometry": { "location": { "lat": 19.0, "lng": 72.0 } }
        });

        let place: PlaceResult = serde_json::from_value(json).unwrap();
        let shop = RepairShop::from(place);

        assert_eq!(shop.id, "Nameless Garage");
        assert_eq!(shop.rating, None);
        assert_eq!(shop.open_now, None);
    }
}
