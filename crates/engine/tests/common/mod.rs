use std::path::PathBuf;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use engine::{Account, AccountCmd, AccountType, Engine};
use migration::MigratorTrait;

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    // one connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

/// A database file in the temp dir, removed on drop.
pub struct FileDb {
    path: PathBuf,
}

impl Drop for FileDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let mut path = self.path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Engine over a file database shared by a pool of `connections`.
pub async fn engine_with_file_db(connections: u32) -> (Engine, FileDb) {
    let path = std::env::temp_dir().join(format!("celengan-{}.db", uuid::Uuid::new_v4()));
    let file = FileDb { path };
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", file.path.display()));
    options.max_connections(connections).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    (engine, file)
}

pub async fn account(engine: &Engine, user: &str, name: &str, balance: i64) -> Account {
    engine
        .create_account(AccountCmd::new(user, name, AccountType::Bank).balance(balance))
        .await
        .unwrap()
}

pub async fn balance_of(engine: &Engine, user: &str, account_id: &str) -> i64 {
    engine.account(user, account_id).await.unwrap().balance
}
