pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use handlers::ApiDoc;

use crate::{config::AllowedOrigins, reading_cache::LatestCache, store::FileStore};

/// Shared state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cache: LatestCache,
    pub store: FileStore,
}

pub fn router(state: AppState, allowed_origins: &AllowedOrigins) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/", get(handlers::root))
        .route("/api/sensor-data/add", post(handlers::add_sensor_data))
        .route("/api/sensor-data/get", get(handlers::get_sensor_data))
        .with_state(state)
        .split_for_parts();

    router
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(cors_layer(allowed_origins))
}

/// Build the CORS layer covering every route, preflight included.
///
/// Requests without an `Origin` header bypass CORS entirely; a disallowed
/// origin gets no allow headers back, so enforcement happens in the browser.
fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values = list.iter().filter_map(|origin| {
                match origin.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring unparseable ALLOWED_ORIGINS entry");
                        None
                    }
                }
            });
            layer.allow_origin(AllowOrigin::list(values))
        }
    }
}
