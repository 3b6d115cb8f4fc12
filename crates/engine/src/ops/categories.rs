use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{
    Category, CategoryCmd, CategoryField, ListOrder, Patch, ResultEngine, SortOrder,
    TransactionType, budgets, categories, palette, recurring, transactions,
    util::{new_id, normalize_optional_text, normalize_required_name},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    with_tx,
};

impl Engine {
    /// Create a category. Missing color and icon come from the palette: the
    /// color cycles with the number of categories the user already has, the
    /// icon depends on the type.
    pub async fn create_category(&self, cmd: CategoryCmd) -> ResultEngine<Category> {
        let name = normalize_required_name(&cmd.name, "category")?;
        let owned = categories::Entity::find()
            .filter(categories::Column::UserId.eq(cmd.user_id.as_str()))
            .count(&self.database)
            .await?;
        let color = normalize_optional_text(cmd.color.as_deref())
            .unwrap_or_else(|| palette::color_at(owned).to_string());
        let icon = normalize_optional_text(cmd.icon.as_deref())
            .unwrap_or_else(|| palette::category_icon(cmd.kind).to_string());

        let model = categories::ActiveModel {
            id: ActiveValue::Set(new_id()),
            user_id: ActiveValue::Set(cmd.user_id),
            name: ActiveValue::Set(name),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            color: ActiveValue::Set(color),
            icon: ActiveValue::Set(icon),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        Category::try_from(model)
    }

    pub async fn category(&self, user_id: &str, category_id: &str) -> ResultEngine<Category> {
        let model =
            require_owned::<categories::Entity, _>(&self.database, category_id, user_id).await?;
        Category::try_from(model)
    }

    /// List categories by name.
    pub async fn list_categories(
        &self,
        user_id: &str,
        kind: Option<TransactionType>,
        order: &ListOrder,
    ) -> ResultEngine<Vec<Category>> {
        let (column, direction) = categories::FIELDS
            .order_by(order, (categories::Column::Name, SortOrder::Asc))?;
        let mut query = categories::Entity::find().filter(categories::Column::UserId.eq(user_id));
        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }
        query
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    pub async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        patch: Patch<CategoryField>,
    ) -> ResultEngine<Category> {
        let model =
            require_owned::<categories::Entity, _>(&self.database, category_id, user_id).await?;
        let mut active: categories::ActiveModel = model.into();
        patch.apply_to(&mut active)?;
        let model = active.update(&self.database).await?;
        Category::try_from(model)
    }

    /// Delete a category and detach it from every transaction, budget and
    /// recurring item that referenced it.
    pub async fn delete_category(&self, user_id: &str, category_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            require_owned::<categories::Entity, _>(&db_tx, category_id, user_id).await?;

            let detached = transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::CategoryId,
                    Expr::value(Option::<String>::None),
                )
                .filter(transactions::Column::UserId.eq(user_id))
                .filter(transactions::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?
                .rows_affected;
            budgets::Entity::update_many()
                .col_expr(budgets::Column::CategoryId, Expr::value(Option::<String>::None))
                .filter(budgets::Column::UserId.eq(user_id))
                .filter(budgets::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;
            recurring::Entity::update_many()
                .col_expr(
                    recurring::Column::CategoryId,
                    Expr::value(Option::<String>::None),
                )
                .filter(recurring::Column::UserId.eq(user_id))
                .filter(recurring::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;

            delete_owned::<categories::Entity, _>(&db_tx, category_id, user_id).await?;
            tracing::info!(category_id, detached, "category deleted");
            Ok(())
        })
    }
}
