//! Weather forecast proxy handler.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::relay;
use crate::datasources::ForecastQuery;
use crate::error::FarmError;
use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Forward a forecast lookup by city name or coordinates.
pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Response, ApiError> {
    if !state.weather.is_configured() {
        return Err(FarmError::NotConfigured("Weather").into());
    }

    let query = ForecastQuery::from_params(
        params.q.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    )
    .ok_or_else(|| FarmError::InvalidRequest("City or coordinates are required".into()))?;

    let upstream = state.weather.fetch_forecast(&query).await?;
    Ok(relay(upstream))
}
