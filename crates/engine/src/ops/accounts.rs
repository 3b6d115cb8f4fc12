use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{
    Account, AccountCmd, AccountField, ListOrder, Patch, ResultEngine, SortOrder, accounts,
    palette,
    util::{new_id, normalize_optional_text, normalize_required_name},
};

use super::{
    Engine,
    access::{not_found, require_owned},
};

impl Engine {
    /// Open a new account for `cmd.user_id`.
    pub async fn create_account(&self, cmd: AccountCmd) -> ResultEngine<Account> {
        let name = normalize_required_name(&cmd.name, "account")?;
        let now = Utc::now();
        let color = normalize_optional_text(cmd.color.as_deref())
            .unwrap_or_else(|| palette::first_color().to_string());
        let icon = normalize_optional_text(cmd.icon.as_deref())
            .unwrap_or_else(|| palette::first_icon().to_string());

        let model = accounts::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            name: ActiveValue::Set(name),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            balance: ActiveValue::Set(cmd.balance),
            currency: ActiveValue::Set(cmd.currency.as_str().to_string()),
            color: ActiveValue::Set(Some(color)),
            icon: ActiveValue::Set(Some(icon)),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;

        tracing::info!(account_id = %model.id, user_id = %model.user_id, "account created");
        Account::try_from(model)
    }

    /// Return an account by id, active or not.
    pub async fn account(&self, user_id: &str, account_id: &str) -> ResultEngine<Account> {
        let model =
            require_owned::<accounts::Entity, _>(&self.database, account_id, user_id).await?;
        Account::try_from(model)
    }

    /// List the user's accounts. Inactive ones are skipped unless asked for.
    pub async fn list_accounts(
        &self,
        user_id: &str,
        include_inactive: bool,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Account>> {
        let (column, direction) = accounts::FIELDS
            .order_by(order, (accounts::Column::CreatedAt, SortOrder::Desc))?;
        let mut query = accounts::Entity::find().filter(accounts::Column::UserId.eq(user_id));
        if !include_inactive {
            query = query.filter(accounts::Column::IsActive.eq(true));
        }
        query
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    /// Apply a sparse update to an account.
    pub async fn update_account(
        &self,
        user_id: &str,
        account_id: &str,
        patch: Patch<AccountField>,
    ) -> ResultEngine<Account> {
        let model =
            require_owned::<accounts::Entity, _>(&self.database, account_id, user_id).await?;
        let mut active: accounts::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Account::try_from(model)
    }

    /// Soft delete: the row and its transfers stay, the account leaves the
    /// active list.
    pub async fn deactivate_account(&self, user_id: &str, account_id: &str) -> ResultEngine<()> {
        let result = accounts::Entity::update_many()
            .col_expr(accounts::Column::IsActive, Expr::value(false))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(account_id))
            .filter(accounts::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found::<accounts::Entity>());
        }
        tracing::info!(account_id, "account deactivated");
        Ok(())
    }
}
