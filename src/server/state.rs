//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::config::Config;
use crate::datasources::{OpenWeatherMapClient, PlantIdClient};

#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<OpenWeatherMapClient>,
    pub disease: Arc<PlantIdClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        if config.weather.is_configured() {
            tracing::info!("OpenWeatherMap key loaded - /api/weather enabled");
        } else {
            tracing::warn!("WEATHER_API_KEY not configured - /api/weather will return errors");
        }

        if config.disease.is_configured() {
            tracing::info!("Plant.id key loaded - /api/disease enabled");
        } else {
            tracing::warn!("DISEASE_API_KEY not configured - /api/disease will return errors");
        }

        Self {
            weather: Arc::new(OpenWeatherMapClient::new(config.weather.clone())),
            disease: Arc::new(PlantIdClient::new(config.disease.clone())),
        }
    }
}
