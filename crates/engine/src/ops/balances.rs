//! Conditional balance updates.
//!
//! Balances are never written blindly: the update only matches while the row
//! still holds the balance that was read, and a lost race is retried from a
//! fresh read.

use chrono::Utc;
use sea_orm::{ConnectionTrait, QueryFilter, prelude::*, sea_query::Expr};

use crate::{EngineError, ResultEngine, accounts, savings_goals};

use super::access::require_owned;

/// Attempts made before a contended balance update gives up with
/// [`EngineError::Conflict`].
pub const MAX_BALANCE_RETRIES: usize = 5;

/// Add `delta` to an account balance and return the new balance.
pub(super) async fn apply_account_delta<C>(
    db: &C,
    user_id: &str,
    account_id: &str,
    delta: i64,
) -> ResultEngine<i64>
where
    C: ConnectionTrait,
{
    for attempt in 1..=MAX_BALANCE_RETRIES {
        let account = require_owned::<accounts::Entity, _>(db, account_id, user_id).await?;
        let balance = account.balance.checked_add(delta).ok_or_else(|| {
            EngineError::InvalidAmount(format!(
                "balance of account '{}' would overflow",
                account.name
            ))
        })?;

        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::Balance, Expr::value(balance))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::Balance.eq(account.balance))
            .exec(db)
            .await?;
        if result.rows_affected == 1 {
            return Ok(balance);
        }
        tracing::debug!(account_id, attempt, "account balance changed concurrently, retrying");
    }

    Err(EngineError::Conflict(format!(
        "account {account_id} kept changing, gave up after {MAX_BALANCE_RETRIES} attempts"
    )))
}

/// Add a signed contribution to a savings goal and return the updated row.
///
/// The completion flag is written together with the amount.
pub(super) async fn apply_goal_delta<C>(
    db: &C,
    user_id: &str,
    goal_id: &str,
    delta: i64,
) -> ResultEngine<savings_goals::Model>
where
    C: ConnectionTrait,
{
    for attempt in 1..=MAX_BALANCE_RETRIES {
        let goal = require_owned::<savings_goals::Entity, _>(db, goal_id, user_id).await?;
        let current = goal.current_amount.checked_add(delta).ok_or_else(|| {
            EngineError::InvalidAmount(format!("savings goal '{}' would overflow", goal.name))
        })?;
        if current < 0 {
            return Err(EngineError::InvalidAmount(format!(
                "savings goal '{}' cannot go below 0",
                goal.name
            )));
        }
        let is_completed = current >= goal.target_amount;

        let result = savings_goals::Entity::update_many()
            .col_expr(savings_goals::Column::CurrentAmount, Expr::value(current))
            .col_expr(savings_goals::Column::IsCompleted, Expr::value(is_completed))
            .filter(savings_goals::Column::Id.eq(goal_id))
            .filter(savings_goals::Column::UserId.eq(user_id))
            .filter(savings_goals::Column::CurrentAmount.eq(goal.current_amount))
            .exec(db)
            .await?;
        if result.rows_affected == 1 {
            return Ok(savings_goals::Model {
                current_amount: current,
                is_completed,
                ..goal
            });
        }
        tracing::debug!(goal_id, attempt, "savings goal changed concurrently, retrying");
    }

    Err(EngineError::Conflict(format!(
        "savings goal {goal_id} kept changing, gave up after {MAX_BALANCE_RETRIES} attempts"
    )))
}
