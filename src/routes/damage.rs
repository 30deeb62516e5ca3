use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CostRequest, DamageReportQuery, DamageReportResponse, ErrorResponse};
use crate::routes::shops::AppState;

/// Configure damage report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/damage/report", web::post().to(damage_report));
}

/// Analyze a damage photo and estimate the repair cost
///
/// POST /api/v1/damage/report?brand=Toyota&carPriceLakhs=15
///
/// The request body is the raw image bytes. This runs the original two-step
/// flow against the inference backend: detect location/severity from the
/// image, then price the repair from the detection plus the car details.
async fn damage_report(
    state: web::Data<AppState>,
    query: web::Query<DamageReportQuery>,
    body: web::Bytes,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if body.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing image".to_string(),
            message: "Request body must contain the damage photo".to_string(),
            status_code: 400,
        });
    }

    let filename = query
        .filename
        .clone()
        .unwrap_or_else(|| "damage.jpg".to_string());

    tracing::info!(
        "Damage report for brand {}, image {} bytes",
        query.brand,
        body.len()
    );

    let analysis = match state.damage.analyze(body.to_vec(), filename).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!("Damage analysis failed: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Damage analysis failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let cost_request = CostRequest {
        brand: query.brand.clone(),
        location: analysis.detected_location.clone(),
        severity: analysis.detected_severity.clone(),
        car_price_lakhs: query.car_price_lakhs,
    };

    let cost_prediction = match state.damage.estimate_cost(&cost_request).await {
        Ok(prediction) => prediction,
        Err(e) => {
            tracing::error!("Cost estimation failed: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Cost estimation failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    tracing::info!(
        "Damage report complete: {} / {}",
        analysis.detected_location,
        analysis.detected_severity
    );

    HttpResponse::Ok().json(DamageReportResponse {
        analysis,
        cost_prediction,
    })
}
