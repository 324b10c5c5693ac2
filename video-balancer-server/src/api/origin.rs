//! Origin server handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;
use video_balancer_types::{OriginServer, RepositoryError};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedOrigin {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct OriginIdParams {
    pub id: i64,
}

pub async fn create_origin_server(
    State(state): State<AppState>,
    Json(payload): Json<OriginServer>,
) -> Result<(StatusCode, Json<CreatedOrigin>), ApiError> {
    payload.validate()?;

    if state.origins().read_by_name(&payload.name).await?.is_some() {
        return Err(ApiError::BadRequest("Origin server already exists".to_string()));
    }

    let id = state.origins().create(&payload).await.map_err(already_exists)?;
    info!(id, name = %payload.name, ratio = ?payload.ratio, "Origin server created");
    Ok((StatusCode::CREATED, Json(CreatedOrigin { id })))
}

pub async fn update_origin_server(
    State(state): State<AppState>,
    Query(params): Query<OriginIdParams>,
    Json(payload): Json<OriginServer>,
) -> Result<Json<OriginServer>, ApiError> {
    payload.validate()?;

    if state.origins().read_by_id(params.id).await?.is_none() {
        return Err(ApiError::NotFound("Origin server not found".to_string()));
    }

    state.origins().update(params.id, &payload).await.map_err(already_exists)?;
    info!(id = params.id, name = %payload.name, "Origin server updated");
    Ok(Json(payload))
}

// Two writers racing past the existence check end up here.
fn already_exists(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::AlreadyExists(_) => {
            ApiError::BadRequest("Origin server with same name already exists".to_string())
        },
        other => other.into(),
    }
}
