//! One-shot schema tool: `migration [up|down|fresh|status]`.
//!
//! The target database is read from the environment: `DATABASE_URL` when
//! set, otherwise a SQLite file at `CELENGAN_DB_PATH` (default
//! `./celengan.db`).

use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DB_PATH: &str = "./celengan.db";

fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }
    let path = std::env::var("CELENGAN_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    format!("sqlite:{path}?mode=rwc")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cmd = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let db = Database::connect(database_url()).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, Some(1)).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => migration::Migrator::status(&db).await?,
        other => {
            eprintln!("unknown command '{other}'");
            eprintln!("Usage: migration [up|down|fresh|status]");
            std::process::exit(2);
        }
    }

    Ok(())
}
