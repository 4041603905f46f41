use super::{read_json_response, transport_error, UpstreamResponse};
use crate::config::WeatherConfig;
use crate::error::{FarmError, Result};
use reqwest::Url;

const PROVIDER: &str = "OpenWeatherMap";

/// Location selector for a forecast request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastQuery {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl ForecastQuery {
    /// A non-empty city name wins; otherwise both coordinates are required.
    pub fn from_params(q: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        if let Some(city) = present(q) {
            return Some(ForecastQuery::City(city));
        }

        match (present(lat), present(lon)) {
            (Some(lat), Some(lon)) => Some(ForecastQuery::Coordinates { lat, lon }),
            _ => None,
        }
    }
}

impl std::fmt::Display for ForecastQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastQuery::City(city) => write!(f, "city '{}'", city),
            ForecastQuery::Coordinates { lat, lon } => write!(f, "({}, {})", lat, lon),
        }
    }
}

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Fetch the 5-day/3-hour forecast and relay it untouched.
    pub async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<UpstreamResponse> {
        if !self.is_configured() {
            return Err(FarmError::NotConfigured("Weather"));
        }

        let url = self.forecast_url(query)?;
        tracing::debug!("Requesting forecast for {}", query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        let upstream = read_json_response(PROVIDER, response).await?;
        if !upstream.is_success() {
            tracing::warn!("{} returned {} for {}", PROVIDER, upstream.status, query);
        }

        Ok(upstream)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint(
            "weather",
            &[
                ("lat", "0"),
                ("lon", "0"),
                ("appid", self.config.api_key.as_str()),
            ],
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;

        Ok(response.status().is_success())
    }

    fn forecast_url(&self, query: &ForecastQuery) -> Result<Url> {
        let units = self.config.units.as_str();
        let appid = self.config.api_key.as_str();

        match query {
            ForecastQuery::City(city) => self.endpoint(
                "forecast",
                &[("q", city.as_str()), ("units", units), ("appid", appid)],
            ),
            ForecastQuery::Coordinates { lat, lon } => self.endpoint(
                "forecast",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", units),
                    ("appid", appid),
                ],
            ),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(&format!("{}/{}", base, path), params)
            .map_err(|e| FarmError::Config(format!("Invalid weather base_url: {}", e)))
    }
}
