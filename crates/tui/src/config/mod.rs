use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use view_state::projection::DEFAULT_TOP_PAY_LIMIT;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Account label whose transactions are browsed.
    pub origin: String,
    pub timezone: String,
    pub log_level: String,
    pub log_file: String,
    pub top_pay_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            origin: "Main".to_string(),
            timezone: "Europe/Madrid".to_string(),
            log_level: "info".to_string(),
            log_file: "logs/finanzas_tui.log".to_string(),
            top_pay_limit: DEFAULT_TOP_PAY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|err| {
            config::ConfigError::Message(format!("invalid timezone {}: {err}", self.timezone))
                .into()
        })
    }

    /// Current date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

#[derive(Debug, Parser)]
#[command(name = "finanzas_tui", disable_version_flag = true)]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the account whose transactions are shown.
    #[arg(long)]
    origin: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a user account. The password is read from stdin.
    Register(RegisterArgs),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Accept the terms and conditions.
    #[arg(long)]
    pub accept_terms: bool,
}

#[derive(Debug)]
pub struct Settings {
    pub app: AppConfig,
    pub command: Option<Command>,
}

pub fn load() -> Result<Settings> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANZAS_TUI"));
    let mut app: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = cli.base_url {
        app.base_url = base_url;
    }
    if let Some(origin) = cli.origin {
        app.origin = origin;
    }
    if let Some(timezone) = cli.timezone {
        app.timezone = timezone;
    }
    if let Some(log_level) = cli.log_level {
        app.log_level = log_level;
    }
    app.tz()?;

    Ok(Settings {
        app,
        command: cli.command,
    })
}
