use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod access;
mod accounts;
mod balances;
mod budgets;
mod categories;
mod debts;
mod investments;
mod recurring;
mod reminders;
mod reports;
mod savings_goals;
mod split_bills;
mod tags;
mod transactions;
mod transfers;
mod users;

pub(crate) use access::Owned;
pub use balances::MAX_BALANCE_RETRIES;
pub use budgets::BudgetFilter;
pub use debts::DebtFilter;
pub use transactions::TransactionFilter;

/// Attempts made before a write transaction that keeps finding the database
/// locked gives up with [`crate::EngineError::Conflict`].
pub const MAX_TX_ATTEMPTS: u32 = 8;

/// Delay before retrying a locked write transaction, grows with each attempt.
const TX_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// The body runs as its own async block, so `?` inside it ends the block
/// (not the caller) and the rollback below always runs. When SQLite reports
/// the database as locked the whole block runs again in a fresh transaction,
/// so the body must only borrow what it captures.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let mut attempt = 1;
        loop {
            let $tx = sea_orm::TransactionTrait::begin(&$self.database).await?;
            let result: $crate::ResultEngine<_> = async { $body }.await;
            let outcome = match result {
                Ok(value) => $tx
                    .commit()
                    .await
                    .map(|()| value)
                    .map_err($crate::EngineError::from),
                Err(err) => {
                    if let Err(rollback_err) = $tx.rollback().await {
                        tracing::error!("rollback failed: {rollback_err}");
                    }
                    Err(err)
                }
            };
            match outcome {
                Err(err) if err.is_busy() => {
                    if attempt >= $crate::ops::MAX_TX_ATTEMPTS {
                        tracing::warn!(attempt, "database stayed locked, giving up");
                        break Err($crate::EngineError::Conflict(format!(
                            "database stayed locked after {attempt} attempts"
                        )));
                    }
                    tracing::debug!(attempt, "database locked, retrying transaction");
                    $crate::ops::retry_pause(attempt).await;
                    attempt += 1;
                }
                outcome => break outcome,
            }
        }
    }};
}

pub(crate) async fn retry_pause(attempt: u32) {
    tokio::time::sleep(TX_RETRY_DELAY * attempt).await;
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
