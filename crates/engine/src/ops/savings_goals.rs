use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ListOrder, Patch, ResultEngine, SavingsGoal, SavingsGoalCmd, SavingsGoalField, SortOrder,
    palette, savings_goals,
    util::{
        ensure_non_negative, ensure_positive, new_id, normalize_optional_text,
        normalize_required_name,
    },
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    balances::apply_goal_delta,
    with_tx,
};

impl Engine {
    pub async fn create_savings_goal(&self, cmd: SavingsGoalCmd) -> ResultEngine<SavingsGoal> {
        let name = normalize_required_name(&cmd.name, "savings goal")?;
        ensure_positive(cmd.target_amount, "target amount")?;
        ensure_non_negative(cmd.current_amount, "current amount")?;
        let color = normalize_optional_text(cmd.color.as_deref())
            .unwrap_or_else(|| palette::first_color().to_string());
        let icon = normalize_optional_text(cmd.icon.as_deref())
            .unwrap_or_else(|| palette::first_icon().to_string());

        let model = savings_goals::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            name: ActiveValue::Set(name),
            target_amount: ActiveValue::Set(cmd.target_amount),
            current_amount: ActiveValue::Set(cmd.current_amount),
            deadline: ActiveValue::Set(cmd.deadline),
            color: ActiveValue::Set(color),
            icon: ActiveValue::Set(icon),
            is_completed: ActiveValue::Set(cmd.current_amount >= cmd.target_amount),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Ok(SavingsGoal::from(model))
    }

    pub async fn savings_goal(&self, user_id: &str, goal_id: &str) -> ResultEngine<SavingsGoal> {
        let model =
            require_owned::<savings_goals::Entity, _>(&self.database, goal_id, user_id).await?;
        Ok(SavingsGoal::from(model))
    }

    pub async fn list_savings_goals(
        &self,
        user_id: &str,
        order: &ListOrder,
    ) -> ResultEngine<Vec<SavingsGoal>> {
        let (column, direction) = savings_goals::FIELDS
            .order_by(order, (savings_goals::Column::CreatedAt, SortOrder::Desc))?;
        Ok(savings_goals::Entity::find()
            .filter(savings_goals::Column::UserId.eq(user_id))
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(SavingsGoal::from)
            .collect())
    }

    /// Sparse update; the completion flag is recomputed from the result.
    pub async fn update_savings_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        patch: Patch<SavingsGoalField>,
    ) -> ResultEngine<SavingsGoal> {
        with_tx!(self, |db_tx| {
            let model = require_owned::<savings_goals::Entity, _>(&db_tx, goal_id, user_id).await?;
            let mut active: savings_goals::ActiveModel = model.clone().into();
            patch.clone().apply_to(&mut active)?;

            let current = match &active.current_amount {
                ActiveValue::Set(value) | ActiveValue::Unchanged(value) => *value,
                ActiveValue::NotSet => model.current_amount,
            };
            let target = match &active.target_amount {
                ActiveValue::Set(value) | ActiveValue::Unchanged(value) => *value,
                ActiveValue::NotSet => model.target_amount,
            };
            active.is_completed = ActiveValue::Set(current >= target);

            let model = active.update(&db_tx).await?;
            Ok(SavingsGoal::from(model))
        })
    }

    /// Add a signed contribution. A withdrawal may not take the goal below 0.
    pub async fn contribute_to_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        amount: i64,
    ) -> ResultEngine<SavingsGoal> {
        let goal = with_tx!(self, |db_tx| {
            apply_goal_delta(&db_tx, user_id, goal_id, amount).await
        })?;
        tracing::info!(goal_id, amount, completed = goal.is_completed, "savings contribution");
        Ok(SavingsGoal::from(goal))
    }

    pub async fn delete_savings_goal(&self, user_id: &str, goal_id: &str) -> ResultEngine<()> {
        delete_owned::<savings_goals::Entity, _>(&self.database, goal_id, user_id).await
    }
}
