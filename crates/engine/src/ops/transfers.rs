//! Account transfers.
//!
//! A transfer writes three rows: the record, the debit and the credit. All
//! three happen inside one database transaction, so a failure at any step
//! leaves every balance and the transfer table as they were.

use chrono::Utc;
use sea_orm::{ActiveValue, Condition, DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, ListOrder, ResultEngine, SortOrder, Transfer, TransferCmd, accounts, transfers,
    util::{ensure_positive, new_id, normalize_optional_text, today},
};

use super::{
    Engine,
    access::{not_found, require_owned},
    balances::apply_account_delta,
    with_tx,
};

fn ensure_active(account: &accounts::Model) -> ResultEngine<()> {
    if !account.is_active {
        return Err(EngineError::InvalidState(format!(
            "account '{}' is inactive",
            account.name
        )));
    }
    Ok(())
}

impl Engine {
    /// Move `cmd.amount` from one account to another.
    ///
    /// Rejected before any write when both sides are the same account or the
    /// amount is not positive. Inside the transaction both accounts must be
    /// owned by the user, active and in the same currency.
    pub async fn create_transfer(&self, cmd: TransferCmd) -> ResultEngine<Transfer> {
        if cmd.from_account_id == cmd.to_account_id {
            return Err(EngineError::InvalidInput(
                "fromAccountId and toAccountId must differ".to_string(),
            ));
        }
        ensure_positive(cmd.amount, "transfer amount")?;

        let transfer = self.record_transfer(cmd).await?;
        tracing::info!(
            transfer_id = %transfer.id,
            from = %transfer.from_account_id,
            to = %transfer.to_account_id,
            amount = transfer.amount,
            "transfer committed"
        );
        Ok(transfer)
    }

    async fn record_transfer(&self, cmd: TransferCmd) -> ResultEngine<Transfer> {
        with_tx!(self, |db_tx| {
            let from =
                require_owned::<accounts::Entity, _>(&db_tx, &cmd.from_account_id, &cmd.user_id)
                    .await?;
            let to = require_owned::<accounts::Entity, _>(&db_tx, &cmd.to_account_id, &cmd.user_id)
                .await?;
            ensure_active(&from)?;
            ensure_active(&to)?;
            if from.currency != to.currency {
                return Err(EngineError::CurrencyMismatch(format!(
                    "cannot transfer from {} to {}",
                    from.currency, to.currency
                )));
            }

            let record = transfers::ActiveModel {
                id: ActiveValue::Set(new_id()),
                user_id: ActiveValue::Set(cmd.user_id.clone()),
                from_account_id: ActiveValue::Set(from.id.clone()),
                to_account_id: ActiveValue::Set(to.id.clone()),
                amount: ActiveValue::Set(cmd.amount),
                description: ActiveValue::Set(normalize_optional_text(
                    cmd.description.as_deref(),
                )),
                date: ActiveValue::Set(cmd.date.unwrap_or_else(today)),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;

            apply_account_delta(&db_tx, &cmd.user_id, &from.id, -cmd.amount).await?;
            apply_account_delta(&db_tx, &cmd.user_id, &to.id, cmd.amount).await?;

            Transfer::try_from(record)
        })
    }

    /// Reverse a transfer: credit the source, debit the destination and
    /// delete the record, all or nothing.
    pub async fn delete_transfer(&self, user_id: &str, transfer_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let record =
                require_owned::<transfers::Entity, _>(&db_tx, transfer_id, user_id).await?;
            reverse(&db_tx, user_id, &record).await?;
            tracing::info!(transfer_id, amount = record.amount, "transfer reversed");
            Ok(())
        })
    }

    pub async fn transfer(&self, user_id: &str, transfer_id: &str) -> ResultEngine<Transfer> {
        let model =
            require_owned::<transfers::Entity, _>(&self.database, transfer_id, user_id).await?;
        Transfer::try_from(model)
    }

    /// List transfers, optionally only those touching `account_id` on either
    /// side. Newest first by default.
    pub async fn list_transfers(
        &self,
        user_id: &str,
        account_id: Option<&str>,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Transfer>> {
        let (column, direction) = transfers::FIELDS
            .order_by(order, (transfers::Column::Date, SortOrder::Desc))?;
        let mut query = transfers::Entity::find().filter(transfers::Column::UserId.eq(user_id));
        if let Some(account_id) = account_id {
            query = query.filter(
                Condition::any()
                    .add(transfers::Column::FromAccountId.eq(account_id))
                    .add(transfers::Column::ToAccountId.eq(account_id)),
            );
        }
        query
            .order_by(column, direction)
            .order_by_desc(transfers::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transfer::try_from)
            .collect()
    }
}

async fn reverse(
    db_tx: &DatabaseTransaction,
    user_id: &str,
    record: &transfers::Model,
) -> ResultEngine<()> {
    apply_account_delta(db_tx, user_id, &record.to_account_id, -record.amount).await?;
    apply_account_delta(db_tx, user_id, &record.from_account_id, record.amount).await?;
    let result = transfers::Entity::delete_many()
        .filter(transfers::Column::Id.eq(record.id.as_str()))
        .filter(transfers::Column::UserId.eq(user_id))
        .exec(db_tx)
        .await?;
    if result.rows_affected == 0 {
        return Err(not_found::<transfers::Entity>());
    }
    Ok(())
}
