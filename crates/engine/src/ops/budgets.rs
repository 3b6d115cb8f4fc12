use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Budget, BudgetCmd, BudgetField, EngineError, ListOrder, Patch, ResultEngine, SortOrder,
    budgets,
    util::{ensure_month, ensure_non_negative, new_id},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    transactions::ensure_category,
    with_tx,
};

/// Optional filters for [`Engine::list_budgets`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BudgetFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// One budget per (owner, category, month, year); `except` skips the row
/// being updated.
async fn ensure_unique<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    category_id: Option<&str>,
    month: i32,
    year: i32,
    except: Option<&str>,
) -> ResultEngine<()> {
    let mut query = budgets::Entity::find()
        .filter(budgets::Column::UserId.eq(user_id))
        .filter(budgets::Column::Month.eq(month))
        .filter(budgets::Column::Year.eq(year));
    query = match category_id {
        Some(category_id) => query.filter(budgets::Column::CategoryId.eq(category_id)),
        None => query.filter(budgets::Column::CategoryId.is_null()),
    };
    if let Some(id) = except {
        query = query.filter(budgets::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(EngineError::ExistingKey(format!(
            "budget for {year}-{month:02}"
        )));
    }
    Ok(())
}

impl Engine {
    /// Create a budget. A second budget for the same category and month is
    /// rejected.
    pub async fn create_budget(&self, cmd: BudgetCmd) -> ResultEngine<Budget> {
        ensure_non_negative(cmd.amount, "budget amount")?;
        ensure_month(cmd.month)?;
        // validated to 1..=12
        let month = cmd.month as i32;

        with_tx!(self, |db_tx| {
            ensure_category(&db_tx, &cmd.user_id, cmd.category_id.as_deref()).await?;
            ensure_unique(
                &db_tx,
                &cmd.user_id,
                cmd.category_id.as_deref(),
                month,
                cmd.year,
                None,
            )
            .await?;

            let model = budgets::ActiveModel {
                id: ActiveValue::Set(new_id()),
                user_id: ActiveValue::Set(cmd.user_id.clone()),
                category_id: ActiveValue::Set(cmd.category_id.clone()),
                amount: ActiveValue::Set(cmd.amount),
                month: ActiveValue::Set(month),
                year: ActiveValue::Set(cmd.year),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            Budget::try_from(model)
        })
    }

    pub async fn budget(&self, user_id: &str, budget_id: &str) -> ResultEngine<Budget> {
        let model = require_owned::<budgets::Entity, _>(&self.database, budget_id, user_id).await?;
        Budget::try_from(model)
    }

    /// List budgets, latest period first by default.
    pub async fn list_budgets(
        &self,
        user_id: &str,
        filter: &BudgetFilter,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Budget>> {
        let mut query = budgets::Entity::find().filter(budgets::Column::UserId.eq(user_id));
        if let Some(month) = filter.month {
            ensure_month(month)?;
            query = query.filter(budgets::Column::Month.eq(month as i32));
        }
        if let Some(year) = filter.year {
            query = query.filter(budgets::Column::Year.eq(year));
        }
        query = match order.sort {
            Some(_) => {
                let (column, direction) = budgets::FIELDS
                    .order_by(order, (budgets::Column::Year, SortOrder::Desc))?;
                query.order_by(column, direction)
            }
            None => query
                .order_by_desc(budgets::Column::Year)
                .order_by_desc(budgets::Column::Month),
        };
        query
            .all(&self.database)
            .await?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    pub async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        patch: Patch<BudgetField>,
    ) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let model = require_owned::<budgets::Entity, _>(&db_tx, budget_id, user_id).await?;
            for field in patch.fields() {
                if let BudgetField::CategoryId(category_id) = field {
                    ensure_category(&db_tx, user_id, category_id.as_deref()).await?;
                }
            }
            let mut active: budgets::ActiveModel = model.into();
            patch.clone().apply_to(&mut active)?;
            let updated = active.update(&db_tx).await?;
            ensure_unique(
                &db_tx,
                user_id,
                updated.category_id.as_deref(),
                updated.month,
                updated.year,
                Some(updated.id.as_str()),
            )
            .await?;
            Budget::try_from(updated)
        })
    }

    pub async fn delete_budget(&self, user_id: &str, budget_id: &str) -> ResultEngine<()> {
        delete_owned::<budgets::Entity, _>(&self.database, budget_id, user_id).await
    }
}
