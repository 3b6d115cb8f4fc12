use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ListOrder, Patch, ResultEngine, SortOrder, Transaction, TransactionCmd, TransactionField,
    TransactionType, categories, transactions,
    util::{ensure_positive, month_bounds, new_id, normalize_optional_text, today},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
};

/// Optional filters for [`Engine::list_transactions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Month of `date`; only applied together with `year`.
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub kind: Option<TransactionType>,
    pub category_id: Option<String>,
}

/// A referenced category must exist and belong to the same user.
pub(super) async fn ensure_category<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    category_id: Option<&str>,
) -> ResultEngine<()> {
    if let Some(category_id) = category_id {
        require_owned::<categories::Entity, _>(db, category_id, user_id).await?;
    }
    Ok(())
}

impl Engine {
    pub async fn create_transaction(&self, cmd: TransactionCmd) -> ResultEngine<Transaction> {
        ensure_positive(cmd.amount, "transaction amount")?;
        ensure_category(&self.database, &cmd.user_id, cmd.category_id.as_deref()).await?;

        let model = transactions::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            category_id: ActiveValue::Set(cmd.category_id),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            amount: ActiveValue::Set(cmd.amount),
            description: ActiveValue::Set(normalize_optional_text(cmd.description.as_deref())),
            date: ActiveValue::Set(cmd.date.unwrap_or_else(today)),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;

        tracing::debug!(transaction_id = %model.id, kind = %model.kind, "transaction recorded");
        Transaction::try_from(model)
    }

    pub async fn transaction(&self, user_id: &str, transaction_id: &str) -> ResultEngine<Transaction> {
        let model =
            require_owned::<transactions::Entity, _>(&self.database, transaction_id, user_id)
                .await?;
        Transaction::try_from(model)
    }

    /// List transactions, newest `date` first by default.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Transaction>> {
        let (column, direction) = transactions::FIELDS
            .order_by(order, (transactions::Column::Date, SortOrder::Desc))?;
        let mut query =
            transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
        if let (Some(month), Some(year)) = (filter.month, filter.year) {
            let (start, end) = month_bounds(month, year)?;
            query = query
                .filter(transactions::Column::Date.gte(start))
                .filter(transactions::Column::Date.lt(end));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(category_id) = filter.category_id.as_deref() {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        query
            .order_by(column, direction)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        patch: Patch<TransactionField>,
    ) -> ResultEngine<Transaction> {
        for field in patch.fields() {
            if let TransactionField::CategoryId(category_id) = field {
                ensure_category(&self.database, user_id, category_id.as_deref()).await?;
            }
        }
        let model =
            require_owned::<transactions::Entity, _>(&self.database, transaction_id, user_id)
                .await?;
        let mut active: transactions::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Transaction::try_from(model)
    }

    pub async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> ResultEngine<()> {
        delete_owned::<transactions::Entity, _>(&self.database, transaction_id, user_id).await
    }
}
