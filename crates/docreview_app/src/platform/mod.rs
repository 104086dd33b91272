mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::{run_app, RunOptions};
pub use config::AppConfig;
pub use logging::{initialize as initialize_logging, LogDestination};
