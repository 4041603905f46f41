pub mod openweathermap;
pub mod plantid;

pub use openweathermap::{ForecastQuery, OpenWeatherMapClient};
pub use plantid::PlantIdClient;

use crate::error::{FarmError, Result};

/// Upstream reply relayed to the caller as-is
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request URLs carry credentials, so they are stripped from the message.
fn transport_error(provider: &'static str, err: reqwest::Error) -> FarmError {
    FarmError::UpstreamUnavailable(format!("{}: {}", provider, err.without_url()))
}

/// Read a provider response, keeping its status and requiring a JSON body.
async fn read_json_response(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<UpstreamResponse> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(provider, e))?;

    match serde_json::from_str(&text) {
        Ok(body) => Ok(UpstreamResponse { status, body }),
        Err(_) => {
            tracing::warn!("{} returned a non-JSON body with status {}", provider, status);
            Err(FarmError::NonJsonResponse {
                provider,
                body: text,
            })
        }
    }
}
