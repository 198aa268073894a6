mod app;
mod charts;
mod client;
mod config;
mod error;
mod export;
mod loader;
mod ui;

use std::{fs::OpenOptions, process::ExitCode, sync::Mutex};

use crate::{
    charts::DashboardView,
    client::Client,
    config::{AppConfig, Command, Settings},
    error::Result,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let Settings { config, command } = config::load()?;
    init_tracing(&config)?;
    tracing::debug!("loaded settings: {config:?}");

    let client = Client::new(config.base_url.as_deref())?;

    match command {
        Command::Tui => {
            let mut app = app::App::new(client, &config);
            app.run().await?;
        }
        Command::Summary => {
            let view = load_view(&client, &config).await?;
            println!("Último período: {}", view.summary.date);
            println!("Valor Bruto Atual: {}", view.summary.gross);
            println!("Valor Líquido Atual: {}", view.summary.net);
        }
        Command::Export { output } => {
            let json = export::to_json(&load_view(&client, &config).await?)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    tracing::info!("wrote dashboard JSON to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Html { output } => {
            let page = export::render_html(&load_view(&client, &config).await?)?;
            tokio::fs::write(&output, page).await?;
            tracing::info!("wrote dashboard page to {}", output.display());
        }
    }

    Ok(())
}

async fn load_view(client: &Client, config: &AppConfig) -> Result<DashboardView> {
    let series = loader::load_dashboard(client, &config.source).await?;
    Ok(DashboardView::new(&series, config.currency))
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = format!(
        "income_dashboard={level},engine={level}",
        level = config.log_level
    );

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
