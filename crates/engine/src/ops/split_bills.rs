use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{
    EngineError, ListOrder, Patch, ResultEngine, SortOrder, SplitBill, SplitBillCmd,
    SplitBillField,
    split_bills::{self, even_shares, participants},
    util::{
        ensure_non_negative, ensure_positive, new_id, normalize_optional_text,
        normalize_required_name, today,
    },
};

use super::{
    Engine,
    access::require_owned,
    with_tx,
};

async fn load_participants<C: ConnectionTrait>(
    db: &C,
    bill_id: &str,
) -> ResultEngine<Vec<participants::Model>> {
    Ok(participants::Entity::find()
        .filter(participants::Column::SplitBillId.eq(bill_id))
        .order_by_asc(participants::Column::Name)
        .all(db)
        .await?)
}

impl Engine {
    /// Store a bill together with its participants.
    ///
    /// With `split_evenly` the total is divided over the participants and any
    /// amounts they carry are ignored.
    pub async fn create_split_bill(&self, cmd: SplitBillCmd) -> ResultEngine<SplitBill> {
        let title = normalize_required_name(&cmd.title, "split bill")?;
        ensure_positive(cmd.total_amount, "total amount")?;
        if cmd.split_evenly && cmd.participants.is_empty() {
            return Err(EngineError::InvalidInput(
                "an even split needs at least one participant".to_string(),
            ));
        }

        let mut people = Vec::with_capacity(cmd.participants.len());
        for participant in &cmd.participants {
            let name = normalize_required_name(&participant.name, "participant")?;
            let amount = participant.amount.unwrap_or(0);
            ensure_non_negative(amount, "participant amount")?;
            people.push((name, amount));
        }
        if cmd.split_evenly {
            let shares = even_shares(cmd.total_amount, people.len());
            for ((_, amount), share) in people.iter_mut().zip(shares) {
                *amount = share;
            }
        }

        let bill = with_tx!(self, |db_tx| {
            let bill = split_bills::ActiveModel {
                id: ActiveValue::Set(new_id()),
                user_id: ActiveValue::Set(cmd.user_id.clone()),
                title: ActiveValue::Set(title.clone()),
                total_amount: ActiveValue::Set(cmd.total_amount),
                date: ActiveValue::Set(cmd.date.unwrap_or_else(today)),
                description: ActiveValue::Set(normalize_optional_text(
                    cmd.description.as_deref(),
                )),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            let mut rows = Vec::with_capacity(people.len());
            for (name, amount) in &people {
                let row = participants::ActiveModel {
                    id: ActiveValue::Set(new_id()),
                    split_bill_id: ActiveValue::Set(bill.id.clone()),
                    name: ActiveValue::Set(name.clone()),
                    amount: ActiveValue::Set(*amount),
                    is_paid: ActiveValue::Set(false),
                    paid_date: ActiveValue::Set(None),
                }
                .insert(&db_tx)
                .await?;
                rows.push(row);
            }
            Ok(SplitBill::from((bill, rows)))
        })?;

        tracing::info!(
            split_bill_id = %bill.id,
            participants = bill.participants.len(),
            "split bill created"
        );
        Ok(bill)
    }

    pub async fn split_bill(&self, user_id: &str, bill_id: &str) -> ResultEngine<SplitBill> {
        let bill =
            require_owned::<split_bills::Entity, _>(&self.database, bill_id, user_id).await?;
        let rows = load_participants(&self.database, &bill.id).await?;
        Ok(SplitBill::from((bill, rows)))
    }

    /// List bills with their participants, newest date first by default.
    pub async fn list_split_bills(
        &self,
        user_id: &str,
        order: &ListOrder,
    ) -> ResultEngine<Vec<SplitBill>> {
        let (column, direction) = split_bills::FIELDS
            .order_by(order, (split_bills::Column::Date, SortOrder::Desc))?;
        let bills = split_bills::Entity::find()
            .filter(split_bills::Column::UserId.eq(user_id))
            .order_by(column, direction)
            .order_by_desc(split_bills::Column::CreatedAt)
            .find_with_related(participants::Entity)
            .all(&self.database)
            .await?;
        Ok(bills.into_iter().map(SplitBill::from).collect())
    }

    /// Update the bill itself. Participants are changed one at a time
    /// through [`Engine::set_participant_paid`].
    pub async fn update_split_bill(
        &self,
        user_id: &str,
        bill_id: &str,
        patch: Patch<SplitBillField>,
    ) -> ResultEngine<SplitBill> {
        let model =
            require_owned::<split_bills::Entity, _>(&self.database, bill_id, user_id).await?;
        let mut active: split_bills::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let bill = active.update(&self.database).await?;
        let rows = load_participants(&self.database, &bill.id).await?;
        Ok(SplitBill::from((bill, rows)))
    }

    /// Flip the paid flag of one participant. Paying stamps today's date,
    /// unpaying clears it.
    pub async fn set_participant_paid(
        &self,
        user_id: &str,
        bill_id: &str,
        participant_id: &str,
        is_paid: bool,
    ) -> ResultEngine<SplitBill> {
        with_tx!(self, |db_tx| {
            let bill = require_owned::<split_bills::Entity, _>(&db_tx, bill_id, user_id).await?;
            let paid_date = is_paid.then(today);
            let result = participants::Entity::update_many()
                .col_expr(participants::Column::IsPaid, Expr::value(is_paid))
                .col_expr(participants::Column::PaidDate, Expr::value(paid_date))
                .filter(participants::Column::Id.eq(participant_id))
                .filter(participants::Column::SplitBillId.eq(bill_id))
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(
                    "participant not exists".to_string(),
                ));
            }
            let rows = load_participants(&db_tx, &bill.id).await?;
            Ok(SplitBill::from((bill, rows)))
        })
    }

    /// Delete a bill and every participant row.
    pub async fn delete_split_bill(&self, user_id: &str, bill_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let bill = require_owned::<split_bills::Entity, _>(&db_tx, bill_id, user_id).await?;
            participants::Entity::delete_many()
                .filter(participants::Column::SplitBillId.eq(bill.id.as_str()))
                .exec(&db_tx)
                .await?;
            split_bills::Entity::delete_by_id(bill.id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
