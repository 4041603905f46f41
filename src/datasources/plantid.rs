use super::{read_json_response, transport_error, UpstreamResponse};
use crate::config::DiseaseConfig;
use crate::error::{FarmError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

const PROVIDER: &str = "Plant.id";

/// Body of a Plant.id v3 health assessment request
#[derive(Debug, Serialize)]
struct HealthAssessmentRequest<'a> {
    images: Vec<String>,
    classification_level: &'a str,
    similar_images: bool,
    health: &'a str,
}

impl HealthAssessmentRequest<'_> {
    fn for_image(image: &[u8]) -> Self {
        Self {
            images: vec![STANDARD.encode(image)],
            classification_level: "species",
            similar_images: true,
            health: "only",
        }
    }
}

pub struct PlantIdClient {
    client: reqwest::Client,
    config: DiseaseConfig,
}

impl PlantIdClient {
    pub fn new(config: DiseaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Submit a leaf photo for disease detection and relay the verdict.
    pub async fn assess_health(&self, image: &[u8]) -> Result<UpstreamResponse> {
        if !self.is_configured() {
            return Err(FarmError::NotConfigured("Disease"));
        }

        tracing::debug!("Submitting {} byte image for health assessment", image.len());

        let response = self
            .client
            .post(self.endpoint("health_assessment"))
            .header("Api-Key", &self.config.api_key)
            .json(&HealthAssessmentRequest::for_image(image))
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let upstream = read_json_response(PROVIDER, response).await?;
        if !upstream.is_success() {
            tracing::warn!("{} returned {}", PROVIDER, upstream.status);
        }

        Ok(upstream)
    }

    /// Test connection to the Plant.id API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("usage_info"))
            .header("Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        Ok(response.status().is_success())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}
