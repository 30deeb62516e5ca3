// Integration tests for the external HTTP collaborators, using mocked servers

use actix_web::{test, web, App};
use shopradar::config::SearchSettings;
use shopradar::models::{Coordinate, CostRequest};
use shopradar::routes::{self, AppState};
use shopradar::services::{
    DamageClient, GeoLocator, PlacesClient, ShopCache, DEFAULT_LOCATION,
};
use std::sync::Arc;

fn app_state(places_url: String, geolocate_url: String) -> AppState {
    AppState {
        places: Arc::new(PlacesClient::new(places_url, "test-key".to_string(), 5).unwrap()),
        locator: Arc::new(GeoLocator::new(geolocate_url, None, 5).unwrap()),
        damage: Arc::new(DamageClient::new("http://127.0.0.1:9".to_string(), 5).unwrap()),
        cache: Arc::new(ShopCache::new(16, 60)),
        search: SearchSettings::default(),
    }
}

const NEARBY_RESPONSE: &str = r#"{
    "status": "OK",
    "results": [
        {
            "place_id": "p1",
            "name": "AutoCare Center",
            "vicinity": "123 Main Street, Mumbai",
            "geometry": { "location": { "lat": 19.1345, "lng": 72.8340 } },
            "rating": 4.5,
            "opening_hours": { "open_now": true }
        },
        {
            "place_id": "p2",
            "name": "Quick Fix Garage",
            "vicinity": "456 Park Road, Mumbai",
            "geometry": { "location": { "lat": 19.1335, "lng": 72.8330 } },
            "rating": 4.2,
            "opening_hours": { "open_now": false }
        },
        {
            "place_id": "p3",
            "name": "Pro Auto Service",
            "geometry": { "location": { "lat": 19.1350, "lng": 72.8345 } }
        }
    ]
}"#;

#[tokio::test]
async fn test_places_client_parses_nearby_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NEARBY_RESPONSE)
        .create_async()
        .await;

    let client = PlacesClient::new(server.url(), "test-key".to_string(), 5).unwrap();
    let origin = Coordinate::new(19.1340, 72.8336);

    let shops = client.nearby_car_repair(origin, 5000).await.unwrap();

    mock.assert_async().await;
    assert_eq!(shops.len(), 3);
    assert_eq!(shops[0].id, "p1");
    assert_eq!(shops[0].open_now, Some(true));
    assert_eq!(shops[2].rating, None);
    // The `lng` wire field lands in the `lon` domain field
    assert_eq!(shops[1].location.lon, 72.8330);
}

#[tokio::test]
async fn test_places_client_rejects_error_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "REQUEST_DENIED", "results": []}"#)
        .create_async()
        .await;

    let client = PlacesClient::new(server.url(), "bad-key".to_string(), 5).unwrap();
    let origin = Coordinate::new(19.1340, 72.8336);

    let result = client.nearby_car_repair(origin, 5000).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_places_client_empty_results_is_no_results() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "ZERO_RESULTS", "results": []}"#)
        .create_async()
        .await;

    let client = PlacesClient::new(server.url(), "test-key".to_string(), 5).unwrap();
    let origin = Coordinate::new(19.1340, 72.8336);

    let result = client.nearby_car_repair(origin, 5000).await;
    assert!(result.is_err(), "empty result set should trigger the fallback path");
}

#[tokio::test]
async fn test_geolocator_parses_loc_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ip": "203.0.113.7", "city": "Mumbai", "loc": "19.0760,72.8777"}"#)
        .create_async()
        .await;

    let locator = GeoLocator::new(server.url(), Some("tok".to_string()), 5).unwrap();
    let origin = locator.locate().await.unwrap();

    assert_eq!(origin.lat, 19.0760);
    assert_eq!(origin.lon, 72.8777);
}

#[tokio::test]
async fn test_geolocator_falls_back_on_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/json")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let locator = GeoLocator::new(server.url(), None, 5).unwrap();
    let (origin, used_fallback) = locator.locate_or_default().await;

    assert!(used_fallback);
    assert_eq!(origin, DEFAULT_LOCATION);
}

#[tokio::test]
async fn test_damage_client_two_step_flow() {
    let mut server = mockito::Server::new_async().await;

    let predict_mock = server
        .mock("POST", "/predict")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"detected_location": "door", "detected_severity": "moderate", "confidence": 0.91}"#,
        )
        .create_async()
        .await;

    let cost_mock = server
        .mock("POST", "/predict-cost")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"estimated_cost": 12500, "currency": "INR"}"#)
        .create_async()
        .await;

    let client = DamageClient::new(server.url(), 5).unwrap();

    let analysis = client
        .analyze(vec![0xFF, 0xD8, 0xFF, 0xE0], "dent.jpg".to_string())
        .await
        .unwrap();
    assert_eq!(analysis.detected_location, "door");
    assert_eq!(analysis.detected_severity, "moderate");

    let cost = client
        .estimate_cost(&CostRequest {
            brand: "Toyota".to_string(),
            location: analysis.detected_location.clone(),
            severity: analysis.detected_severity.clone(),
            car_price_lakhs: 15.0,
        })
        .await
        .unwrap();

    predict_mock.assert_async().await;
    cost_mock.assert_async().await;
    assert_eq!(cost.get("estimated_cost").and_then(|v| v.as_u64()), Some(12500));
}

#[actix_web::test]
async fn test_nearby_shops_serves_fallback_with_notice() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let state = app_state(server.url(), server.url());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/shops/nearby?lat=19.1340&lon=72.8336&sort=distance&limit=3")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "fallback");
    assert_eq!(body["shops"].as_array().unwrap().len(), 3, "limit must apply to fallback data");
    assert!(
        body["notice"].as_str().unwrap().contains("sample repair shop data"),
        "fallback responses carry the sample-data notice"
    );
    // Nearest sample shop sits at the query origin
    assert_eq!(body["shops"][0]["name"], "Auto Service Center");
    assert_eq!(body["shops"][0]["distanceKm"], 0.0);
}

#[actix_web::test]
async fn test_nearby_shops_caches_live_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(NEARBY_RESPONSE)
        .expect(1)
        .create_async()
        .await;

    let state = app_state(server.url(), server.url());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/v1/shops/nearby?lat=19.1340&lon=72.8336")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["source"], "live");
        // Default sort is rating, so the 4.5-rated shop leads
        assert_eq!(body["sort"], "rating");
        assert_eq!(body["shops"][0]["id"], "p1");
        assert_eq!(body["shops"].as_array().unwrap().len(), 3);
    }

    // Second request must be served from the cache
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_nearby_shops_rejects_out_of_range_origin() {
    let server = mockito::Server::new_async().await;

    let state = app_state(server.url(), server.url());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/shops/nearby?lat=97.0&lon=72.8336")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_damage_client_surfaces_backend_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/predict")
        .with_status(503)
        .create_async()
        .await;

    let client = DamageClient::new(server.url(), 5).unwrap();
    let result = client.analyze(vec![1, 2, 3], "dent.jpg".to_string()).await;

    assert!(result.is_err());
}
