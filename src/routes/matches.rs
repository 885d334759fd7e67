use actix_web::{web, HttpResponse, Responder};

use crate::core::effective_limit;
use crate::models::{HealthResponse, MatchQuery, MatchRequest, MatchResponse};
use crate::routes::{ApiError, AppState};

const DEMO_PAGE: &str = include_str!("../../static/demo.html");

/// Configure health and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(match_properties))
        .route("/demo", web::get().to(demo));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await;
    let status = if store_healthy { "ok" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match endpoint
///
/// POST /api/v1/match?limit=N
///
/// Request body:
/// ```json
/// {
///   "profile": {
///     "name": "string",
///     "budget_min": 200000,
///     "budget_max": 400000,
///     "priorities": { "quietness": 0.3 },
///     "hard_filters": { "must_have_amenities": ["parking"] }
///   },
///   "limit": 5
/// }
/// ```
///
/// A parsable `limit` query parameter overrides the body; `limit <= 0` means 5.
async fn match_properties(
    state: web::Data<AppState>,
    query: web::Query<MatchQuery>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, ApiError> {
    let MatchRequest { profile, limit } = req.into_inner();
    let limit = effective_limit(query.limit().unwrap_or(limit));

    let candidates = state.store.all().await?;
    let matcher = state.matcher.clone();
    let client = profile.name.clone();

    // Scoring is CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        matcher.find_matches(&profile, &candidates, limit)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("scoring task failed: {}", e)))?;

    tracing::info!(
        "Returning {} matches for client {:?} ({} admitted of {} candidates)",
        result.matches.len(),
        client,
        result.admitted,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(MatchResponse {
        results: result.matches,
        total_candidates: result.total_candidates,
    }))
}

/// Static page exercising the API from a browser
pub(crate) async fn demo() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(DEMO_PAGE)
}
