mod platform;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use platform::{AppConfig, LogDestination, RunOptions};

#[derive(Parser)]
#[command(name = "docreview")]
#[command(about = "Upload documents for obligation analysis and review the checklist", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to select at startup
    files: Vec<PathBuf>,

    /// Analysis server base URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,

    /// Directory for downloaded CSVs and exported reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Configuration file (RON); defaults to ./docreview.ron when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum)]
    log: Option<LogTarget>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Analyze the given files, print the result and exit
    #[arg(long)]
    once: bool,

    /// With --once, also download the checklist CSV
    #[arg(long, requires = "once")]
    download: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(target) = cli.log {
        config.log_destination = target.into();
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    platform::initialize_logging(config.log_destination, level);

    platform::run_app(
        config,
        RunOptions {
            initial_files: cli.files,
            once: cli.once,
            download: cli.download,
        },
    )
}
