//! Settings for the service binary.
//!
//! Values come from `settings.toml` (optional), then `CELENGAN__*`
//! environment variables, then command line flags.

use std::path::PathBuf;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "celengan")]
#[command(about = "Personal finance tracker HTTP service")]
pub struct Cli {
    /// Settings file; the `.toml` extension may be omitted.
    #[arg(long, env = "CELENGAN_CONFIG", default_value = "settings")]
    pub config: PathBuf,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("server.database", "memory")?
            .add_source(File::from(cli.config.clone()).required(false))
            .add_source(Environment::with_prefix("CELENGAN").separator("__"))
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("server.bind", cli.bind.clone())?
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("celengan").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_settings_file() {
        let settings = Settings::new(&cli(&["--config", "does-not-exist"])).unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.database, Database::Memory);
    }

    #[test]
    fn flags_override_settings() {
        let args = ["--config", "does-not-exist", "--port", "8080", "--bind", "0.0.0.0"];
        let settings = Settings::new(&cli(&args)).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.bind, "0.0.0.0");
    }

    #[test]
    fn sqlite_url_creates_missing_file() {
        let database = Database::Sqlite("data/celengan.db".to_string());
        assert_eq!(database.url(), "sqlite:data/celengan.db?mode=rwc");
    }
}
