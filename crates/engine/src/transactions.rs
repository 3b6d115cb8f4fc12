//! Income and expense records.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, PatchField, ResultEngine, TransactionType,
    ops::Owned,
    util::{ensure_positive, normalize_optional_text, parse_stored},
};

/// An income or an expense. Transactions do not move account balances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub kind: TransactionType,
    pub amount: i64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "transaction",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("categoryId", "category_id", Column::CategoryId),
        ("type", "type", Column::Kind),
        ("amount", "amount", Column::Amount),
        ("description", "description", Column::Description),
        ("date", "date", Column::Date),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub amount: i64,
    pub description: Option<String>,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "transaction";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            amount: model.amount,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransactionField {
    Kind(TransactionType),
    Amount(i64),
    CategoryId(Option<String>),
    Description(Option<String>),
    Date(NaiveDate),
}

impl PatchField<ActiveModel> for TransactionField {
    fn name(&self) -> &'static str {
        match self {
            Self::Kind(_) => "type",
            Self::Amount(_) => "amount",
            Self::CategoryId(_) => "categoryId",
            Self::Description(_) => "description",
            Self::Date(_) => "date",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Amount(amount) => ensure_positive(*amount, "transaction amount"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::Amount(amount) => model.amount = ActiveValue::Set(amount),
            Self::CategoryId(id) => model.category_id = ActiveValue::Set(id),
            Self::Description(text) => {
                model.description = ActiveValue::Set(normalize_optional_text(text.as_deref()))
            }
            Self::Date(date) => model.date = ActiveValue::Set(date),
        }
    }
}
