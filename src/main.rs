use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tilescan::{default_config_path, init_logging, simulate_scan, ScanConfig};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tilescan", version, about = "Snake raster tile scanning for microscope stages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the configured region and print the motion path as JSON
    Plan {
        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run a full scan against the simulated stage and camera
    Simulate {
        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to the user config directory)
        path: Option<PathBuf>,
    },
}

fn resolve_config_path(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(default_config_path()?),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ScanConfig> {
    let path = resolve_config_path(path)?;
    let config = ScanConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!("tilescan {} (built {})", tilescan::VERSION, tilescan::BUILD_DATE);

    match cli.command {
        Command::Plan { config, pretty } => {
            let config = load_config(config)?;
            for note in config.advisories() {
                warn!("{}", note);
            }
            let path = config.plan()?;
            let json = if pretty {
                serde_json::to_string_pretty(&path)?
            } else {
                serde_json::to_string(&path)?
            };
            println!("{}", json);
        }
        Command::Simulate { config } => {
            let config = load_config(config)?;
            let grid = simulate_scan(&config)?;
            info!(
                "Simulated scan captured {} x {} tiles into {}",
                grid.num_rows(),
                grid.num_columns(),
                config.output.save_folder.display()
            );
        }
        Command::InitConfig { path } => {
            let path = resolve_config_path(path)?;
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            ScanConfig::default().save_to_file(&path)?;
            info!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
