//! Owner-scoped lookups shared by every operation.
//!
//! A row that exists but belongs to someone else is reported exactly like a
//! missing row.

use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine};

/// An entity whose rows carry an owner column.
pub(crate) trait Owned: EntityTrait {
    /// Human label used in error messages.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn owner_column() -> Self::Column;
}

pub(crate) fn not_found<E: Owned>() -> EngineError {
    EngineError::KeyNotFound(format!("{} not exists", E::LABEL))
}

/// Load a row by id, only if `user_id` owns it.
pub(crate) async fn require_owned<E, C>(db: &C, id: &str, user_id: &str) -> ResultEngine<E::Model>
where
    E: Owned,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .filter(E::owner_column().eq(user_id))
        .one(db)
        .await?
        .ok_or_else(not_found::<E>)
}

/// Delete a row by id, only if `user_id` owns it.
pub(crate) async fn delete_owned<E, C>(db: &C, id: &str, user_id: &str) -> ResultEngine<()>
where
    E: Owned,
    C: ConnectionTrait,
{
    let result = E::delete_many()
        .filter(E::id_column().eq(id))
        .filter(E::owner_column().eq(user_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(not_found::<E>());
    }
    Ok(())
}
