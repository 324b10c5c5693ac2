//! CDN settings handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::info;
use validator::Validate;
use video_balancer_types::RoutingSettings;

use super::error::ApiError;
use crate::state::AppState;

pub async fn get_cdn_settings(
    State(state): State<AppState>,
) -> Result<Json<RoutingSettings>, ApiError> {
    state
        .settings()
        .read()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Cdn settings not found".to_string()))
}

pub async fn create_cdn_settings(
    State(state): State<AppState>,
    Json(payload): Json<RoutingSettings>,
) -> Result<(StatusCode, Json<RoutingSettings>), ApiError> {
    payload.validate()?;

    if state.settings().read().await?.is_some() {
        return Err(ApiError::BadRequest("Cdn settings already exist".to_string()));
    }

    state.settings().create(&payload).await?;
    info!(host = %payload.host, ratio = payload.ratio, "CDN settings created");
    Ok((StatusCode::CREATED, Json(payload)))
}

pub async fn update_cdn_settings(
    State(state): State<AppState>,
    Json(payload): Json<RoutingSettings>,
) -> Result<Json<RoutingSettings>, ApiError> {
    payload.validate()?;

    state.settings().update(&payload).await?;
    info!(host = %payload.host, ratio = payload.ratio, "CDN settings updated");
    Ok(Json(payload))
}
