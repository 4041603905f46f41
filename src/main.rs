mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod server;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{OpenWeatherMapClient, PlantIdClient};
use models::{Nutrient, SoilSample};
use server::AppState;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Init => {
            Config::setup_interactive()?;
        }
        Commands::Analyze { file, json } => {
            analyze_file(&file, json)?;
        }
        Commands::Check => {
            let config = load_config(cli.config, cli.port)?;
            check(&config).await?;
        }
        Commands::Serve => {
            let config = load_config(cli.config, cli.port)?;
            tracing::debug!("Configuration: {:?}", config);

            let state = AppState::new(&config);
            server::run_server(state, &config.server)
                .await
                .context("HTTP server failed")?;
        }
    }

    Ok(())
}

fn load_config(
    path: Option<std::path::PathBuf>,
    port_override: Option<u16>,
) -> anyhow::Result<Config> {
    let mut config = Config::load(path).context("Failed to load configuration")?;
    if let Some(port) = port_override {
        config.server.port = port;
    }
    Ok(config)
}

/// Run the soil analysis on a sample file without starting the server.
fn analyze_file(path: &Path, as_json: bool) -> anyhow::Result<()> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read sample from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample {}", path.display()))?
    };

    let sample: SoilSample =
        serde_json::from_str(&content).context("Sample is not a valid soil sample document")?;
    let report = logic::analyze_soil(&sample)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Crop: {}    Soil: {}",
        report.crop.as_deref().unwrap_or("-"),
        report.soil_type.as_deref().unwrap_or("-")
    );
    println!();
    for nutrient in Nutrient::ALL {
        if let Some(verdict) = report.verdict(nutrient) {
            println!(
                "  {:<16} {:>8} {:<8} {}",
                nutrient.to_string(),
                verdict.value,
                verdict.status.as_str(),
                verdict.suggestion
            );
        }
    }
    if report.all_optimal() {
        println!();
        println!("All nutrients within reference ranges.");
    }
    Ok(())
}

/// Validate config and test connections to both providers.
async fn check(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    println!("Listen address: {}", addr);
    println!("Frontend directory: {}", config.server.static_dir.display());

    let weather = OpenWeatherMapClient::new(config.weather.clone());
    let weather_status = if !weather.is_configured() {
        "NOT CONFIGURED".to_string()
    } else {
        match weather.test_connection().await {
            Ok(true) => "OK".to_string(),
            Ok(false) => "REJECTED".to_string(),
            Err(e) => format!("OFFLINE ({})", e),
        }
    };

    let disease = PlantIdClient::new(config.disease.clone());
    let disease_status = if !disease.is_configured() {
        "NOT CONFIGURED".to_string()
    } else {
        match disease.test_connection().await {
            Ok(true) => "OK".to_string(),
            Ok(false) => "REJECTED".to_string(),
            Err(e) => format!("OFFLINE ({})", e),
        }
    };

    println!("OpenWeatherMap: {}", weather_status);
    println!("Plant.id: {}", disease_status);
    Ok(())
}
