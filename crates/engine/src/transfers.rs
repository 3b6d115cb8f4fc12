//! Records of money moved between two accounts of the same user.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

use crate::{EngineError, FieldTable, ResultEngine, ops::Owned};

/// A committed transfer. It exists iff both balance deltas were applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub id: String,
    pub user_id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "transfer",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("fromAccountId", "from_account_id", Column::FromAccountId),
        ("toAccountId", "to_account_id", Column::ToAccountId),
        ("amount", "amount", Column::Amount),
        ("description", "description", Column::Description),
        ("date", "date", Column::Date),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
    pub description: Option<String>,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::FromAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    FromAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ToAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ToAccount,
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "transfer";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Transfer {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        if model.amount <= 0 {
            return Err(EngineError::InvalidAmount(format!(
                "stored transfer {} has non-positive amount",
                model.id
            )));
        }
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            from_account_id: model.from_account_id,
            to_account_id: model.to_account_id,
            amount: model.amount,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
