use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use video_balancer_core::modules::database;

use crate::api;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(api::router())
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

// Redirects keep working without the cache, so failed pings only show up
// in the body.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let cache = match state.cache().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!(error = %e, "Cache ping failed");
            "unavailable"
        },
    };
    let database = match state.database() {
        None => "memory",
        Some(pool) => match database::ping(pool).await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                "unavailable"
            },
        },
    };
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok", "cache": cache, "database": database })),
    )
}
