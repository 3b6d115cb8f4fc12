//! Money owed to or by the user.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    DebtType, EngineError, FieldTable, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_positive, normalize_optional_text, normalize_required_name, parse_stored},
};

/// A debt. Once paid it stays paid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debt {
    pub id: String,
    pub user_id: String,
    pub kind: DebtType,
    pub person_name: String,
    pub amount: i64,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "debt",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("type", "type", Column::Kind),
        ("personName", "person_name", Column::PersonName),
        ("amount", "amount", Column::Amount),
        ("description", "description", Column::Description),
        ("dueDate", "due_date", Column::DueDate),
        ("isPaid", "is_paid", Column::IsPaid),
        ("paidDate", "paid_date", Column::PaidDate),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub person_name: String,
    pub amount: i64,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub is_paid: bool,
    pub paid_date: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "debt";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Debt {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            id: model.id,
            user_id: model.user_id,
            person_name: model.person_name,
            amount: model.amount,
            description: model.description,
            due_date: model.due_date,
            is_paid: model.is_paid,
            paid_date: model.paid_date,
            created_at: model.created_at,
        })
    }
}

/// Updatable debt fields. The paid flag has its own one-way operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DebtField {
    Kind(DebtType),
    PersonName(String),
    Amount(i64),
    Description(Option<String>),
    DueDate(Option<NaiveDate>),
}

impl PatchField<ActiveModel> for DebtField {
    fn name(&self) -> &'static str {
        match self {
            Self::Kind(_) => "type",
            Self::PersonName(_) => "personName",
            Self::Amount(_) => "amount",
            Self::Description(_) => "description",
            Self::DueDate(_) => "dueDate",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::PersonName(name) => normalize_required_name(name, "person").map(|_| ()),
            Self::Amount(amount) => ensure_positive(*amount, "debt amount"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::PersonName(name) => model.person_name = ActiveValue::Set(name.trim().to_string()),
            Self::Amount(amount) => model.amount = ActiveValue::Set(amount),
            Self::Description(text) => {
                model.description = ActiveValue::Set(normalize_optional_text(text.as_deref()))
            }
            Self::DueDate(date) => model.due_date = ActiveValue::Set(date),
        }
    }
}
