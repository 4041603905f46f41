use crate::error::{FarmError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_DISEASE_URL: &str = "https://plant.id/api/v3";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub disease: DiseaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    /// Directory of frontend assets served for non-API paths
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

/// Accepts `port: 4000` as well as `port: "${PORT}"` after substitution.
fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u16),
        Text(String),
    }

    match RawPort::deserialize(deserializer)? {
        RawPort::Number(port) => Ok(port),
        RawPort::Text(value) => value.trim().parse::<u16>().map_err(|_| {
            D::Error::custom(format!(
                "invalid port '{}' - ensure the PORT environment variable is set",
                value
            ))
        }),
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                FarmError::Config(format!(
                    "Invalid listen address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            static_dir: default_static_dir(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_weather_url() -> String {
    DEFAULT_WEATHER_URL.into()
}

fn default_units() -> String {
    "metric".into()
}

impl WeatherConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_url(),
            units: default_units(),
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct DiseaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_disease_url")]
    pub base_url: String,
}

fn default_disease_url() -> String {
    DEFAULT_DISEASE_URL.into()
}

impl DiseaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_disease_url(),
        }
    }
}

impl std::fmt::Debug for DiseaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiseaseConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from YAML (if any) and apply environment overrides.
    ///
    /// An explicit path must exist. Without one, a missing file means
    /// defaults plus environment, which is how the service runs in containers.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_override {
            Some(path) => {
                if !path.exists() {
                    return Err(FarmError::Config(format!(
                        "Config file not found at {:?}",
                        path
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::find_config_path() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    Config::default()
                }
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| FarmError::Config(format!("Failed to read config: {}", e)))?;

        tracing::debug!("Loading config from {}", path.display());
        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content, |name| std::env::var(name).ok());

        serde_yaml::from_str(&content)
            .map_err(|e| FarmError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("farmassist").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/farmassist/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmError::Config("Cannot determine config directory".into()))?
            .join("farmassist");
        Ok(config_dir.join("config.yaml"))
    }

    /// Applies `PORT`, `WEATHER_API_KEY` and `DISEASE_API_KEY` from the environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value '{}'", port),
            }
        }

        if let Some(key) = lookup("WEATHER_API_KEY") {
            self.weather.api_key = key;
        }

        if let Some(key) = lookup("DISEASE_API_KEY") {
            self.disease.api_key = key;
        }
    }

    fn substitute_env_vars<F>(content: &str, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Some(value) = lookup(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up the Farmer Assistant service!");
        println!();

        println!("Server");
        let port: u16 = Input::new()
            .with_prompt("  Port")
            .default(DEFAULT_PORT)
            .interact_text()
            .map_err(|e| FarmError::Config(format!("Input error: {}", e)))?;

        let static_dir: String = Input::new()
            .with_prompt("  Frontend directory")
            .default("frontend".into())
            .interact_text()
            .map_err(|e| FarmError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("OpenWeatherMap (leave API key blank to disable /api/weather)");
        let weather_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| FarmError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Plant.id (leave API key blank to disable /api/disease)");
        let disease_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| FarmError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            server: ServerConfig {
                port,
                static_dir: PathBuf::from(static_dir),
                ..Default::default()
            },
            weather: WeatherConfig {
                api_key: weather_key,
                ..Default::default()
            },
            disease: DiseaseConfig {
                api_key: disease_key,
                ..Default::default()
            },
        };

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| FarmError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# Farmer Assistant Configuration\n# Generated by `farmassist init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }
}
