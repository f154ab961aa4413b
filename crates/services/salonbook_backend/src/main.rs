// --- File: crates/services/salonbook_backend/src/main.rs ---
use axum::{routing::get, Json, Router};
use salonbook_booking::routes as booking_routes;
use salonbook_common::logging;
use salonbook_config::{load_config, AppConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Assembles the full application: welcome and health routes plus the
/// booking routes, all under `/api`.
fn build_app(config: Arc<AppConfig>) -> Result<Router, salonbook_booking::BookingError> {
    let booking_router = booking_routes::routes(config)?;

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Salonbook API!" }))
        .route("/health", get(health))
        .merge(booking_router);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use salonbook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Salonbook API",
                version = "0.1.0",
                description = "Salon and spa slot availability and booking",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    Ok(app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

#[tokio::main]
async fn main() {
    logging::init();

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let app = match build_app(config.clone()) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to set up booking routes: {}", e);
            std::process::exit(1);
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
    }
}
