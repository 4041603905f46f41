//! Soil analysis handler.

use axum::{
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};

use crate::logic::analyze_soil;
use crate::models::{SoilReport, SoilSample};
use crate::server::error::ApiError;

/// Soil sample decoded from either a JSON or an HTML form body.
pub struct SoilPayload(pub SoilSample);

impl<S> FromRequest<S> for SoilPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let sample = if is_form {
            let Form(sample) = Form::<SoilSample>::from_request(req, state).await?;
            sample
        } else {
            let Json(sample) = Json::<SoilSample>::from_request(req, state).await?;
            sample
        };

        Ok(SoilPayload(sample))
    }
}

/// Classify each nutrient in the submitted sample.
pub async fn analyze_soil_sample(
    SoilPayload(sample): SoilPayload,
) -> Result<Json<SoilReport>, ApiError> {
    let report = analyze_soil(&sample)?;
    Ok(Json(report))
}
