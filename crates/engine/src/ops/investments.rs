use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Investment, InvestmentCmd, InvestmentField, ListOrder, Patch, ResultEngine, SortOrder,
    investments::{self, ensure_quantity},
    util::{ensure_non_negative, new_id, normalize_optional_text, normalize_required_name, today},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
};

impl Engine {
    /// Record a position. The current price starts at the buy price unless
    /// given.
    pub async fn create_investment(&self, cmd: InvestmentCmd) -> ResultEngine<Investment> {
        let name = normalize_required_name(&cmd.name, "investment")?;
        ensure_quantity(cmd.quantity)?;
        ensure_non_negative(cmd.buy_price, "buy price")?;
        let current_price = cmd.current_price.unwrap_or(cmd.buy_price);
        ensure_non_negative(current_price, "current price")?;

        let model = investments::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            name: ActiveValue::Set(name),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            quantity: ActiveValue::Set(cmd.quantity),
            buy_price: ActiveValue::Set(cmd.buy_price),
            current_price: ActiveValue::Set(current_price),
            buy_date: ActiveValue::Set(cmd.buy_date.unwrap_or_else(today)),
            notes: ActiveValue::Set(normalize_optional_text(cmd.notes.as_deref())),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Investment::try_from(model)
    }

    pub async fn investment(&self, user_id: &str, investment_id: &str) -> ResultEngine<Investment> {
        let model =
            require_owned::<investments::Entity, _>(&self.database, investment_id, user_id)
                .await?;
        Investment::try_from(model)
    }

    pub async fn list_investments(
        &self,
        user_id: &str,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Investment>> {
        let (column, direction) = investments::FIELDS
            .order_by(order, (investments::Column::CreatedAt, SortOrder::Desc))?;
        investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Investment::try_from)
            .collect()
    }

    pub async fn update_investment(
        &self,
        user_id: &str,
        investment_id: &str,
        patch: Patch<InvestmentField>,
    ) -> ResultEngine<Investment> {
        let model =
            require_owned::<investments::Entity, _>(&self.database, investment_id, user_id)
                .await?;
        let mut active: investments::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Investment::try_from(model)
    }

    pub async fn delete_investment(&self, user_id: &str, investment_id: &str) -> ResultEngine<()> {
        delete_owned::<investments::Entity, _>(&self.database, investment_id, user_id).await
    }
}
