use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "farmassist",
    version,
    about = "Farmer assistant: soil analysis, weather and plant health API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Interactive configuration setup
    Init,
    /// Validate config and test upstream connections
    Check,
    /// Analyze a soil sample JSON file ("-" reads stdin) and print the report
    Analyze {
        /// Path to the sample file
        file: PathBuf,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
