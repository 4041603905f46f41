//! API request handlers.

mod disease;
mod health;
mod soil;
mod weather;

pub use disease::*;
pub use health::*;
pub use soil::*;
pub use weather::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::datasources::UpstreamResponse;

/// Send a provider reply back with the provider's own status code.
fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(upstream.body)).into_response()
}
