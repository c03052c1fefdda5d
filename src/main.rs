use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use state_drift::config::{expand_tilde, Config, ConfigOverrides};
use state_drift::drift::run_drift_detection;
use state_drift::output::json::render_json;
use state_drift::output::OutputFormat;
use state_drift::report::StdoutReporter;
use state_drift::state::{add_shortcut, ShortcutSchema};
use state_drift::storage::FileSystem;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "state-drift",
    about = "Detect drift between snapshots of validation query results"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two states of the same check.
    Detect {
        #[arg(short, long)]
        dir: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Register an alias for a state file in a query directory.
    AddShortcut {
        #[arg(short, long)]
        dir: Option<String>,
        #[arg(short, long)]
        shortcut: String,
        #[arg(short, long)]
        file: String,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    init_logging(&config.logging.level)?;

    let dir_override = match &cli.command {
        Commands::Detect { dir, .. } | Commands::AddShortcut { dir, .. } => dir.clone(),
        Commands::Config { .. } => None,
    };
    let (start_override, end_override) = match &cli.command {
        Commands::Detect { start, end, .. } => (start.clone(), end.clone()),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        query_directory: dir_override,
        start_state: start_override,
        end_state: end_override,
        output_format: cli.output,
    });

    match &cli.command {
        Commands::Detect { .. } => {
            let request = config.drift_request();
            let reporter = StdoutReporter::new(config.output.format);
            if run_drift_detection(&request, &FileSystem, &reporter).is_none() {
                warn!("drift comparison skipped");
            }
        }
        Commands::AddShortcut { shortcut, file, .. } => {
            let directory = expand_tilde(&config.detection.query_directory);
            let table = add_shortcut(&directory, &FileSystem, &ShortcutSchema, shortcut, file)?;
            println!("{shortcut} -> {}", table.resolve(shortcut));
        }
        Commands::Config { init, show } => {
            if *init {
                Config::write_template(&config_path)?;
                println!("Wrote config template to {}", config_path.display());
            }
            if *show || !*init {
                println!("{}", render_json(&config)?);
            }
        }
    }

    Ok(())
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid log level {default_level}: {e}"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
