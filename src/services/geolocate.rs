use crate::models::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Origin used when IP geolocation fails or is unavailable (Mumbai)
pub const DEFAULT_LOCATION: Coordinate = Coordinate {
    lat: 19.1340,
    lon: 72.8336,
};

/// Errors that can occur during IP geolocation
#[derive(Debug, Error)]
pub enum GeolocateError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// IP geolocation client
///
/// Resolves the caller's approximate coordinate from an ipinfo-style endpoint
/// whose response carries a `loc` field shaped as `"lat,lon"`.
pub struct GeoLocator {
    base_url: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    loc: String,
}

impl GeoLocator {
    pub fn new(
        base_url: String,
        token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GeolocateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            token,
            client,
        })
    }

    /// Resolve the caller's coordinate from its IP address
    pub async fn locate(&self) -> Result<Coordinate, GeolocateError> {
        let mut url = format!("{}/json", self.base_url.trim_end_matches('/'));
        if let Some(token) = &self.token {
            url = format!("{}?token={}", url, urlencoding::encode(token));
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(GeolocateError::ApiError(format!(
                "Geolocation lookup failed: {}",
                response.status()
            )));
        }

        let body: IpInfoResponse = response
            .json()
            .await
            .map_err(|e| GeolocateError::InvalidResponse(e.to_string()))?;

        parse_loc(&body.loc)
    }

    /// Resolve the caller's coordinate, falling back to [`DEFAULT_LOCATION`]
    ///
    /// Returns the coordinate and whether the fallback was used.
    pub async fn locate_or_default(&self) -> (Coordinate, bool) {
        match self.locate().await {
            Ok(origin) => (origin, false),
            Err(e) => {
                tracing::warn!("Geolocation failed, using default location: {}", e);
                (DEFAULT_LOCATION, true)
            }
        }
    }
}

fn parse_loc(loc: &str) -> Result<Coordinate, GeolocateError> {
    let mut parts = loc.splitn(2, ',');
    let lat = parts
        .next()
        .and_then(|p| p.trim().parse::<f64>().ok())
        .ok_or_else(|| GeolocateError::InvalidResponse(format!("Malformed loc field: {}", loc)))?;
    let lon = parts
        .next()
        .and_then(|p| p.trim().parse::<f64>().ok())
        .ok_or_else(|| GeolocateError::InvalidResponse(format!("Malformed loc field: {}", loc)))?;

    Ok(Coordinate::new(lat, lon))
}
