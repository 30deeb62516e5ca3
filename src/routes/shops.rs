use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::SearchSettings;
use crate::core::rank;
use crate::models::{
    Coordinate, ErrorResponse, GeolocateResponse, HealthResponse, NearbyShopsQuery,
    NearbyShopsResponse, RepairShop, ShopSource,
};
use crate::services::{fallback_shops, CacheKey, DamageClient, GeoLocator, PlacesClient, ShopCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub places: Arc<PlacesClient>,
    pub locator: Arc<GeoLocator>,
    pub damage: Arc<DamageClient>,
    pub cache: Arc<ShopCache>,
    pub search: SearchSettings,
}

/// Configure shop discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/geolocate", web::get().to(geolocate))
        .route("/shops/nearby", web::get().to(nearby_shops));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the caller's origin via IP geolocation
///
/// GET /api/v1/geolocate
async fn geolocate(state: web::Data<AppState>) -> impl Responder {
    let (origin, used_fallback) = state.locator.locate_or_default().await;

    HttpResponse::Ok().json(GeolocateResponse {
        origin,
        used_fallback,
    })
}

/// Nearby repair shops, ranked by distance or rating
///
/// GET /api/v1/shops/nearby?lat=19.13&lon=72.83&sort=distance&radiusM=5000&limit=5
///
/// Origin comes from the query when present, otherwise from IP geolocation.
/// Shop data comes from the place-search API (cached), with bundled sample
/// shops as a last resort. Ranking is always recomputed here from raw
/// coordinates, regardless of the order the upstream source returned.
async fn nearby_shops(
    state: web::Data<AppState>,
    query: web::Query<NearbyShopsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for nearby_shops request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mut notice: Option<String> = None;

    // Origin: explicit query coordinates, else IP geolocation with fallback
    let origin = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
        _ => {
            let (origin, used_fallback) = state.locator.locate_or_default().await;
            if used_fallback {
                notice = Some(
                    "Using default location. Your location could not be determined.".to_string(),
                );
            }
            origin
        }
    };

    let criterion = query.sort.unwrap_or(state.search.default_sort);
    let radius_m = query.radius_m.unwrap_or(state.search.radius_m);
    let limit = query
        .limit
        .unwrap_or(state.search.default_limit)
        .min(state.search.max_limit);

    tracing::info!(
        "Nearby shops for origin ({}, {}), sort {:?}, radius {}m",
        origin.lat,
        origin.lon,
        criterion,
        radius_m
    );

    let (shops, source) = fetch_shops(&state, origin, radius_m, &mut notice).await;

    let mut ranked = rank(origin, &shops, criterion);
    ranked.truncate(limit);

    let total_results = ranked.len();

    HttpResponse::Ok().json(NearbyShopsResponse {
        origin,
        sort: criterion,
        source,
        shops: ranked,
        total_results,
        notice,
    })
}

/// Fetch the unranked shop list: cache, then live search, then sample data
async fn fetch_shops(
    state: &AppState,
    origin: Coordinate,
    radius_m: u32,
    notice: &mut Option<String>,
) -> (Vec<RepairShop>, ShopSource) {
    let cache_key = CacheKey::nearby(origin, radius_m);

    if let Ok(cached) = state.cache.get::<Vec<RepairShop>>(&cache_key).await {
        tracing::debug!("Serving {} shops from cache", cached.len());
        return (cached, ShopSource::Live);
    }

    match state.places.nearby_car_repair(origin, radius_m).await {
        Ok(shops) => {
            if let Err(e) = state.cache.set(&cache_key, &shops).await {
                tracing::warn!("Failed to cache nearby shops: {}", e);
            }
            (shops, ShopSource::Live)
        }
        Err(e) => {
            tracing::warn!("Nearby search failed, using fallback shops: {}", e);
            *notice =
                Some("Using sample repair shop data. Real-time data unavailable.".to_string());
            (fallback_shops(), ShopSource::Fallback)
        }
    }
}
