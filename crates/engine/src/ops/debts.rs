use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{
    Debt, DebtCmd, DebtField, DebtType, EngineError, ListOrder, Patch, ResultEngine, SortOrder,
    debts,
    util::{ensure_positive, new_id, normalize_optional_text, normalize_required_name, today},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    with_tx,
};

/// Optional filters for [`Engine::list_debts`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebtFilter {
    pub kind: Option<DebtType>,
    pub is_paid: Option<bool>,
}

impl Engine {
    pub async fn create_debt(&self, cmd: DebtCmd) -> ResultEngine<Debt> {
        let person_name = normalize_required_name(&cmd.person_name, "person")?;
        ensure_positive(cmd.amount, "debt amount")?;

        let model = debts::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            person_name: ActiveValue::Set(person_name),
            amount: ActiveValue::Set(cmd.amount),
            description: ActiveValue::Set(normalize_optional_text(cmd.description.as_deref())),
            due_date: ActiveValue::Set(cmd.due_date),
            is_paid: ActiveValue::Set(false),
            paid_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Debt::try_from(model)
    }

    pub async fn debt(&self, user_id: &str, debt_id: &str) -> ResultEngine<Debt> {
        let model = require_owned::<debts::Entity, _>(&self.database, debt_id, user_id).await?;
        Debt::try_from(model)
    }

    pub async fn list_debts(
        &self,
        user_id: &str,
        filter: &DebtFilter,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Debt>> {
        let (column, direction) =
            debts::FIELDS.order_by(order, (debts::Column::CreatedAt, SortOrder::Desc))?;
        let mut query = debts::Entity::find().filter(debts::Column::UserId.eq(user_id));
        if let Some(kind) = filter.kind {
            query = query.filter(debts::Column::Kind.eq(kind.as_str()));
        }
        if let Some(is_paid) = filter.is_paid {
            query = query.filter(debts::Column::IsPaid.eq(is_paid));
        }
        query
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Debt::try_from)
            .collect()
    }

    pub async fn update_debt(
        &self,
        user_id: &str,
        debt_id: &str,
        patch: Patch<DebtField>,
    ) -> ResultEngine<Debt> {
        let model = require_owned::<debts::Entity, _>(&self.database, debt_id, user_id).await?;
        let mut active: debts::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Debt::try_from(model)
    }

    /// Mark a debt as paid today. There is no way back to unpaid.
    pub async fn pay_debt(&self, user_id: &str, debt_id: &str) -> ResultEngine<Debt> {
        with_tx!(self, |db_tx| {
            let model = require_owned::<debts::Entity, _>(&db_tx, debt_id, user_id).await?;
            if model.is_paid {
                return Err(EngineError::InvalidState(format!(
                    "debt with {} is already paid",
                    model.person_name
                )));
            }
            let paid_date = today();
            // guarded on is_paid so two concurrent payments cannot both win
            let result = debts::Entity::update_many()
                .col_expr(debts::Column::IsPaid, Expr::value(true))
                .col_expr(debts::Column::PaidDate, Expr::value(Some(paid_date)))
                .filter(debts::Column::Id.eq(debt_id))
                .filter(debts::Column::UserId.eq(user_id))
                .filter(debts::Column::IsPaid.eq(false))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::InvalidState(format!(
                    "debt with {} is already paid",
                    model.person_name
                )));
            }
            tracing::info!(debt_id, "debt paid");
            Debt::try_from(debts::Model {
                is_paid: true,
                paid_date: Some(paid_date),
                ..model
            })
        })
    }

    pub async fn delete_debt(&self, user_id: &str, debt_id: &str) -> ResultEngine<()> {
        delete_owned::<debts::Entity, _>(&self.database, debt_id, user_id).await
    }
}
