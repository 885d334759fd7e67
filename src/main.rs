use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use property_match::config::Settings;
use property_match::core::Matcher;
use property_match::logging::init_tracing;
use property_match::routes::{
    self, handle_json_payload_error, handle_query_payload_error, AppState,
};
use property_match::services::{load_weights_or_default, open_store};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging);

    info!("Starting property matching service...");

    let store = match open_store(&settings.storage).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open {:?} store: {}", settings.storage.backend, e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    match store.count().await {
        Ok(n) => info!("Store ready ({} backend, {} properties)", store.backend(), n),
        Err(e) => error!("Store opened but count failed: {}", e),
    }

    // Initialize matcher with configured weights
    let weights = load_weights_or_default(settings.scoring.weights_path.as_deref());
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        store,
        matcher,
        pagination: settings.pagination,
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
