use std::net::SocketAddr;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection};
use settings::{Cli, Database, Settings};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = Settings::new(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "celengan={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let addr: SocketAddr = format!("{}:{}", settings.server.bind, settings.server.port).parse()?;
    server::run(engine, addr).await;

    Ok(())
}

async fn connect(
    database: &Database,
) -> Result<DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let mut options = ConnectOptions::new(database.url());
    if *database == Database::Memory {
        // every pooled connection would otherwise open its own empty database
        options.max_connections(1);
    }
    options.sqlx_logging(false);

    let db = sea_orm::Database::connect(options).await?;
    tracing::info!("running pending migrations");
    Migrator::up(&db, None).await?;
    Ok(db)
}
