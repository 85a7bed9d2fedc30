mod app;
mod client;
mod config;
mod effects;
mod error;
mod registration;
mod ui;

use std::{fs, path::Path, sync::Mutex};

use crate::{config::Command, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load()?;
    init_tracing(&settings.app)?;

    match settings.command {
        Some(Command::Register(args)) => {
            let client = client::Client::new(&settings.app.base_url)?;
            registration::run(&client, args).await
        }
        None => {
            tracing::info!(origin = %settings.app.origin, "starting terminal UI");
            let mut app = app::App::new(settings.app)?;
            app.run().await
        }
    }
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_file).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finanzas_tui={level},view_state={level}",
            level = config.log_level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
