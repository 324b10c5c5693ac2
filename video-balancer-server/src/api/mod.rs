//! API Routes
//!
//! Redirect endpoint on `/` plus the admin endpoints for CDN settings and
//! origin servers.

mod balance;
mod cdn;
pub(crate) mod error;
mod origin;

#[cfg(test)]
mod admin_tests;
#[cfg(test)]
mod balance_tests;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Balancing
        .route("/", get(balance::balance_request))
        // CDN settings
        .route(
            "/cdn",
            get(cdn::get_cdn_settings)
                .post(cdn::create_cdn_settings)
                .put(cdn::update_cdn_settings),
        )
        // Origin servers
        .route("/origin", post(origin::create_origin_server).put(origin::update_origin_server))
}
