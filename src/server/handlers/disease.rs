//! Plant disease detection proxy handler.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Response,
};

use super::relay;
use crate::error::FarmError;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the leaf photo.
const IMAGE_FIELD: &str = "image";

/// Forward an uploaded leaf photo to the health assessment service.
pub async fn detect_disease(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    if !state.disease.is_configured() {
        return Err(FarmError::NotConfigured("Disease").into());
    }

    // A non-multipart body simply has no image in it.
    let image = match multipart {
        Ok(mut multipart) => read_image(&mut multipart).await?,
        Err(_) => None,
    }
    .ok_or_else(|| FarmError::InvalidRequest("No image uploaded".into()))?;

    let upstream = state.disease.assess_health(&image).await?;
    Ok(relay(upstream))
}

async fn read_image(multipart: &mut Multipart) -> Result<Option<Bytes>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;
            return Ok(Some(bytes));
        }
    }

    Ok(None)
}
