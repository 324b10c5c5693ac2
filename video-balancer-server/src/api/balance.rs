//! Redirect endpoint

use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde::Deserialize;
use tracing::debug;
use video_balancer_types::{BalancerError, UrlError};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BalanceParams {
    /// Video file URL on the origin server
    pub video_url: String,
}

/// `GET /?video_url=...` answers with a 307 to the CDN or the origin.
///
/// URLs that cannot be sent back in a `Location` header are rejected with a
/// 400 before they reach the balancer, so they never advance a counter.
pub async fn balance_request(
    State(state): State<AppState>,
    Query(params): Query<BalanceParams>,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1]), ApiError> {
    location_header(&params.video_url)?;

    let target = state.balancer().get_redirect_address(&params.video_url).await?;
    debug!(kind = target.kind.as_str(), url = %target.url, "Redirecting");
    let location = location_header(&target.url)?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]))
}

fn location_header(url: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::try_from(url).map_err(|_| {
        BalancerError::Url(UrlError::NotRedirectable { url: url.escape_debug().to_string() }).into()
    })
}
