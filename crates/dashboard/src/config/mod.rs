use std::path::PathBuf;

use clap::{Parser, Subcommand};
use engine::Currency;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";
const DEFAULT_TUI_LOG_PATH: &str = "income_dashboard.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the income document lives: URL, path, or a location relative to
    /// `base_url`.
    pub source: String,
    pub base_url: Option<String>,
    pub currency: Currency,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: "src/data/income.json".to_string(),
            base_url: None,
            currency: Currency::Brl,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive terminal dashboard (default).
    #[default]
    Tui,
    /// Print the latest gross and net totals.
    Summary,
    /// Write the summary and the three chart specs as JSON.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a static HTML page rendering the charts with Chart.js.
    Html {
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Parser)]
#[command(name = "income_dashboard", about = "Personal income dashboard")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the income data location.
    #[arg(long)]
    source: Option<String>,
    /// Base URL relative sources are resolved against.
    #[arg(long)]
    base_url: Option<String>,
    /// Log level for the dashboard and engine (e.g. debug).
    #[arg(long)]
    log_level: Option<String>,
    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub command: Command,
}

pub fn load() -> Result<Settings> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<Settings> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("INCOME_DASHBOARD"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(source) = args.source {
        settings.source = source;
    }
    if let Some(base_url) = args.base_url {
        settings.base_url = Some(base_url);
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    let command = args.command.unwrap_or_default();
    // The terminal owns stdout/stderr while the dashboard is drawn.
    if command == Command::Tui && settings.log_file.is_none() {
        settings.log_file = Some(DEFAULT_TUI_LOG_PATH.to_string());
    }

    Ok(Settings {
        config: settings,
        command,
    })
}
