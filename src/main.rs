mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use routes::AppState;
use services::{DamageClient, GeoLocator, PlacesClient, ShopCache};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration comes first so the subscriber can honor [logging]
    let settings = Settings::load().unwrap_or_else(|e| {
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT env vars override the config
    let log_level =
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Shopradar service...");
    info!("Configuration loaded successfully");

    // Initialize the place-search client
    let places = Arc::new(
        PlacesClient::new(
            settings.places.base_url,
            settings.places.api_key,
            settings.places.timeout_secs.unwrap_or(30),
        )
        .unwrap_or_else(|e| {
            error!("Failed to create place-search client: {}", e);
            panic!("Place-search client error: {}", e);
        }),
    );

    info!("Place-search client initialized");

    // Initialize the IP geolocation client
    let locator = Arc::new(
        GeoLocator::new(
            settings.geolocation.base_url,
            settings.geolocation.token,
            settings.geolocation.timeout_secs.unwrap_or(10),
        )
        .unwrap_or_else(|e| {
            error!("Failed to create geolocation client: {}", e);
            panic!("Geolocation client error: {}", e);
        }),
    );

    info!("Geolocation client initialized");

    // Initialize the damage inference client
    let damage = Arc::new(
        DamageClient::new(
            settings.inference.base_url,
            settings.inference.timeout_secs.unwrap_or(60),
        )
        .unwrap_or_else(|e| {
            error!("Failed to create inference client: {}", e);
            panic!("Inference client error: {}", e);
        }),
    );

    info!("Inference client initialized");

    // Initialize the shop cache
    let cache_capacity = settings.cache.capacity.unwrap_or(1000);
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache = Arc::new(ShopCache::new(cache_capacity, cache_ttl));

    info!("Shop cache initialized ({} entries, TTL: {}s)", cache_capacity, cache_ttl);

    // Build application state
    let app_state = AppState {
        places,
        locator,
        damage,
        cache,
        search: settings.search,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            // Damage photos are forwarded as raw bytes
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
