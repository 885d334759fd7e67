// Route exports
pub mod error;
pub mod matches;
pub mod properties;

use actix_web::{error as actix_error, web, HttpRequest};
use std::sync::Arc;

use crate::config::PaginationSettings;
use crate::core::Matcher;
use crate::services::PropertyStore;

pub use error::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PropertyStore>,
    pub matcher: Matcher,
    pub pagination: PaginationSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(matches::demo)).service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(properties::configure),
    );
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: actix_error::JsonPayloadError,
    req: &HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::InvalidJson(err.to_string()).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: actix_error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::InvalidQuery(err.to_string()).into()
}
