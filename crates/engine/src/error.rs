//! The module contains the errors the engine can return.
//!
//! Validation problems ([`InvalidAmount`], [`InvalidInput`], [`InvalidName`],
//! [`CurrencyMismatch`]) are raised before anything is written. State
//! problems ([`KeyNotFound`], [`ExistingKey`], [`InvalidState`],
//! [`Conflict`]) are raised from inside a database transaction, which is then
//! rolled back.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`CurrencyMismatch`]: EngineError::CurrencyMismatch
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidState`]: EngineError::InvalidState
//!  [`Conflict`]: EngineError::Conflict
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// A compare-and-swap update kept losing against concurrent writers.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// SQLite refused the statement because another connection holds the
    /// write lock. The whole transaction can be run again.
    pub(crate) fn is_busy(&self) -> bool {
        let Self::Database(err) = self else {
            return false;
        };
        let message = err.to_string();
        message.contains("database is locked") || message.contains("database table is locked")
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::CurrencyMismatch(a), Self::CurrencyMismatch(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidState(a), Self::InvalidState(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::RuntimeErr;

    use super::*;

    #[test]
    fn lock_errors_are_busy() {
        let locked = EngineError::Database(DbErr::Exec(RuntimeErr::Internal(
            "error returned from database: (code: 5) database is locked".to_string(),
        )));
        assert!(locked.is_busy());

        let table = EngineError::Database(DbErr::Query(RuntimeErr::Internal(
            "(code: 6) database table is locked".to_string(),
        )));
        assert!(table.is_busy());

        let other = EngineError::Database(DbErr::Custom("no such table: accounts".to_string()));
        assert!(!other.is_busy());
        assert!(!EngineError::Conflict("database is locked".to_string()).is_busy());
    }
}
