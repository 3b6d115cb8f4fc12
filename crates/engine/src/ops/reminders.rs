use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ListOrder, Patch, Reminder, ReminderCmd, ReminderField, ResultEngine, SortOrder,
    reminders::{self, upcoming_window},
    util::{ensure_positive, new_id, normalize_optional_text, normalize_required_name, today},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
};

impl Engine {
    pub async fn create_reminder(&self, cmd: ReminderCmd) -> ResultEngine<Reminder> {
        let title = normalize_required_name(&cmd.title, "reminder")?;
        if let Some(amount) = cmd.amount {
            ensure_positive(amount, "reminder amount")?;
        }

        let model = reminders::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(normalize_optional_text(cmd.description.as_deref())),
            amount: ActiveValue::Set(cmd.amount),
            due_date: ActiveValue::Set(cmd.due_date),
            is_completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Ok(Reminder::from(model))
    }

    pub async fn reminder(&self, user_id: &str, reminder_id: &str) -> ResultEngine<Reminder> {
        let model =
            require_owned::<reminders::Entity, _>(&self.database, reminder_id, user_id).await?;
        Ok(Reminder::from(model))
    }

    /// List reminders by due date, soonest first.
    ///
    /// With `upcoming_days` only incomplete reminders due between today and
    /// `today + upcoming_days` (inclusive) are returned.
    pub async fn list_reminders(
        &self,
        user_id: &str,
        upcoming_days: Option<u32>,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Reminder>> {
        let (column, direction) = reminders::FIELDS
            .order_by(order, (reminders::Column::DueDate, SortOrder::Asc))?;
        let mut query = reminders::Entity::find().filter(reminders::Column::UserId.eq(user_id));
        if let Some(days) = upcoming_days {
            let (from, until) = upcoming_window(today(), days);
            query = query
                .filter(reminders::Column::IsCompleted.eq(false))
                .filter(reminders::Column::DueDate.gte(from))
                .filter(reminders::Column::DueDate.lte(until));
        }
        Ok(query
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Reminder::from)
            .collect())
    }

    pub async fn update_reminder(
        &self,
        user_id: &str,
        reminder_id: &str,
        patch: Patch<ReminderField>,
    ) -> ResultEngine<Reminder> {
        let model =
            require_owned::<reminders::Entity, _>(&self.database, reminder_id, user_id).await?;
        let mut active: reminders::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Ok(Reminder::from(model))
    }

    pub async fn delete_reminder(&self, user_id: &str, reminder_id: &str) -> ResultEngine<()> {
        delete_owned::<reminders::Entity, _>(&self.database, reminder_id, user_id).await
    }
}
