use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ListOrder, Patch, Recurring, RecurringCmd, RecurringField, ResultEngine, SortOrder,
    recurring::{self, ensure_date_order},
    util::{ensure_positive, new_id, normalize_optional_text, today},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    transactions::ensure_category,
    with_tx,
};

impl Engine {
    pub async fn create_recurring(&self, cmd: RecurringCmd) -> ResultEngine<Recurring> {
        ensure_positive(cmd.amount, "recurring amount")?;
        let start_date = cmd.start_date.unwrap_or_else(today);
        ensure_date_order(start_date, cmd.end_date)?;
        ensure_category(&self.database, &cmd.user_id, cmd.category_id.as_deref()).await?;

        let model = recurring::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            category_id: ActiveValue::Set(cmd.category_id),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            amount: ActiveValue::Set(cmd.amount),
            description: ActiveValue::Set(normalize_optional_text(cmd.description.as_deref())),
            frequency: ActiveValue::Set(cmd.frequency.as_str().to_string()),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(cmd.end_date),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Recurring::try_from(model)
    }

    pub async fn recurring(&self, user_id: &str, recurring_id: &str) -> ResultEngine<Recurring> {
        let model =
            require_owned::<recurring::Entity, _>(&self.database, recurring_id, user_id).await?;
        Recurring::try_from(model)
    }

    pub async fn list_recurring(
        &self,
        user_id: &str,
        active_only: bool,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Recurring>> {
        let (column, direction) = recurring::FIELDS
            .order_by(order, (recurring::Column::CreatedAt, SortOrder::Desc))?;
        let mut query = recurring::Entity::find().filter(recurring::Column::UserId.eq(user_id));
        if active_only {
            query = query.filter(recurring::Column::IsActive.eq(true));
        }
        query
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Recurring::try_from)
            .collect()
    }

    /// Sparse update. The resulting start and end dates must still be in
    /// order, whichever of them changed.
    pub async fn update_recurring(
        &self,
        user_id: &str,
        recurring_id: &str,
        patch: Patch<RecurringField>,
    ) -> ResultEngine<Recurring> {
        with_tx!(self, |db_tx| {
            let model = require_owned::<recurring::Entity, _>(&db_tx, recurring_id, user_id).await?;
            for field in patch.fields() {
                if let RecurringField::CategoryId(category_id) = field {
                    ensure_category(&db_tx, user_id, category_id.as_deref()).await?;
                }
            }
            let mut active: recurring::ActiveModel = model.into();
            patch.clone().apply_to(&mut active)?;
            let updated = active.update(&db_tx).await?;
            ensure_date_order(updated.start_date, updated.end_date)?;
            Recurring::try_from(updated)
        })
    }

    pub async fn delete_recurring(&self, user_id: &str, recurring_id: &str) -> ResultEngine<()> {
        delete_owned::<recurring::Entity, _>(&self.database, recurring_id, user_id).await
    }
}
