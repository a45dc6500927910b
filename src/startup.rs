use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    response::Html,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers,
    middleware::{metrics::metrics_middleware, request_id::request_id_middleware},
    openapi::ApiDoc,
};

/// Uploads are capped at 5 MB per file; allow some multipart framing overhead.
const BODY_LIMIT: usize = 6 * 1024 * 1024;

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    // CORS configuration; the frontend origin comes from config
    let origin = state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    // Staff routes
    let staff_routes = Router::new()
        .route("/", get(handlers::staff_handler::get_staff_list))
        .route("/", post(handlers::staff_handler::create_staff))
        .route("/{id}", get(handlers::staff_handler::get_staff))
        .route("/{id}", put(handlers::staff_handler::update_staff))
        .route("/{id}", delete(handlers::staff_handler::delete_staff));

    // Client routes
    let client_routes = Router::new()
        .route("/", get(handlers::clients_handler::get_clients))
        .route("/", post(handlers::clients_handler::create_client))
        .route("/{id}", get(handlers::clients_handler::get_client))
        .route("/{id}", put(handlers::clients_handler::update_client))
        .route("/{id}", delete(handlers::clients_handler::delete_client));

    // Show routes (no update; shows are immutable after creation)
    let show_routes = Router::new()
        .route("/", get(handlers::shows_handler::get_shows))
        .route("/", post(handlers::shows_handler::create_show))
        .route("/{id}", get(handlers::shows_handler::get_show))
        .route("/{id}", delete(handlers::shows_handler::delete_show));

    // Booking routes. /grouped must come before /{id} to prevent shadowing.
    let booking_routes = Router::new()
        .route("/", get(handlers::bookings_handler::get_bookings))
        .route("/", post(handlers::bookings_handler::create_booking))
        .route("/grouped", get(handlers::bookings_handler::get_bookings_grouped))
        .route("/{id}", get(handlers::bookings_handler::get_booking))
        .route("/{id}", put(handlers::bookings_handler::update_booking))
        .route("/{id}", delete(handlers::bookings_handler::delete_booking))
        .route(
            "/{id}/days/headcount",
            put(handlers::bookings_handler::set_all_headcounts),
        )
        .route(
            "/{id}/days/{index}/headcount",
            put(handlers::bookings_handler::set_day_headcount),
        )
        .route(
            "/{id}/days/{index}/slots/{slot}",
            put(handlers::bookings_handler::assign_day_slot),
        )
        .route(
            "/{id}/days/{index}/copy-previous",
            post(handlers::bookings_handler::copy_previous_day),
        )
        .route(
            "/{id}/days/{index}/auto-fill",
            post(handlers::bookings_handler::auto_fill_day),
        );

    // Upload routes
    let upload_routes = Router::new()
        .route("/photo", post(handlers::uploads_handler::upload_photo))
        .route("/photo", delete(handlers::uploads_handler::delete_photo))
        .route("/resume", post(handlers::uploads_handler::upload_resume));

    // Assistant routes
    let assistant_routes = Router::new().route("/chat", post(handlers::assistant_handler::chat));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .nest("/api/staff", staff_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/shows", show_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/uploads", upload_routes)
        .nest("/api/assistant", assistant_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/swagger-ui", get(swagger_ui))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .with_state(state)
}

async fn swagger_ui() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ShowStaff API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
