//! Recurring income and expense templates.
//!
//! These are never materialized into transactions; they only feed the
//! monthly-equivalent summary.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, Frequency, PatchField, ResultEngine, TransactionType,
    ops::Owned,
    util::{ensure_positive, normalize_optional_text, parse_stored},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recurring {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub kind: TransactionType,
    pub amount: i64,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "recurring transaction",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("categoryId", "category_id", Column::CategoryId),
        ("type", "type", Column::Kind),
        ("amount", "amount", Column::Amount),
        ("description", "description", Column::Description),
        ("frequency", "frequency", Column::Frequency),
        ("startDate", "start_date", Column::StartDate),
        ("endDate", "end_date", Column::EndDate),
        ("isActive", "is_active", Column::IsActive),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub amount: i64,
    pub description: Option<String>,
    pub frequency: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "recurring transaction";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Recurring {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            frequency: parse_stored(&model.frequency)?,
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            amount: model.amount,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            is_active: model.is_active,
            created_at: model.created_at,
        })
    }
}

pub(crate) fn ensure_date_order(start: NaiveDate, end: Option<NaiveDate>) -> ResultEngine<()> {
    match end {
        Some(end) if end < start => Err(EngineError::InvalidInput(
            "endDate must not be before startDate".to_string(),
        )),
        _ => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecurringField {
    Kind(TransactionType),
    Amount(i64),
    Frequency(Frequency),
    StartDate(NaiveDate),
    EndDate(Option<NaiveDate>),
    CategoryId(Option<String>),
    Description(Option<String>),
    IsActive(bool),
}

impl PatchField<ActiveModel> for RecurringField {
    fn name(&self) -> &'static str {
        match self {
            Self::Kind(_) => "type",
            Self::Amount(_) => "amount",
            Self::Frequency(_) => "frequency",
            Self::StartDate(_) => "startDate",
            Self::EndDate(_) => "endDate",
            Self::CategoryId(_) => "categoryId",
            Self::Description(_) => "description",
            Self::IsActive(_) => "isActive",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Amount(amount) => ensure_positive(*amount, "recurring amount"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::Amount(amount) => model.amount = ActiveValue::Set(amount),
            Self::Frequency(frequency) => {
                model.frequency = ActiveValue::Set(frequency.as_str().to_string())
            }
            Self::StartDate(date) => model.start_date = ActiveValue::Set(date),
            Self::EndDate(date) => model.end_date = ActiveValue::Set(date),
            Self::CategoryId(id) => model.category_id = ActiveValue::Set(id),
            Self::Description(text) => {
                model.description = ActiveValue::Set(normalize_optional_text(text.as_deref()))
            }
            Self::IsActive(active) => model.is_active = ActiveValue::Set(active),
        }
    }
}
