// --- Schedule Sooner - Archivo principal ---

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use schedulesooner::catalog::build_to_file;
use schedulesooner::config::AppConfig;
use schedulesooner::run_server;

#[derive(Parser)]
#[command(name = "schedulesooner", about = "Course catalog API and conflict-free schedule builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Overrides SCHEDULESOONER_BIND
        #[arg(long)]
        bind: Option<String>,
    },
    /// Build one conflict-free schedule from a JSON listing
    Build {
        #[arg(long, default_value = "all_unique_courses.json")]
        input: PathBuf,
        #[arg(long, default_value = "final_schedule.json")]
        output: PathBuf,
        /// Overrides SCHEDULESOONER_MAX_CLASSES
        #[arg(long)]
        max_classes: Option<usize>,
        /// Print the per-course outcome as JSON
        #[arg(long)]
        report: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(b) = bind {
                config.bind = b;
            }
            run_server(config).await?;
        }
        Commands::Build { input, output, max_classes, report } => {
            let max_classes = max_classes.unwrap_or(config.max_classes);
            let result = build_to_file(&input, &output, max_classes)?;
            if report {
                println!("{}", serde_json::to_string_pretty(&result.groups)?);
            }
        }
    }
    Ok(())
}
