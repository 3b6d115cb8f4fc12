//! Monthly spending limits.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_month, ensure_non_negative},
};

/// A budget for one month. `category_id: None` is the whole-month budget
/// used by the status computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: i64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "budget",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("categoryId", "category_id", Column::CategoryId),
        ("amount", "amount", Column::Amount),
        ("month", "month", Column::Month),
        ("year", "year", Column::Year),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub amount: i64,
    pub month: i32,
    pub year: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "budget";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let month = u32::try_from(model.month)
            .map_err(|_| EngineError::InvalidInput(format!("invalid stored month {}", model.month)))?;
        ensure_month(month)?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            amount: model.amount,
            month,
            year: model.year,
            created_at: model.created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BudgetField {
    Amount(i64),
    Month(u32),
    Year(i32),
    CategoryId(Option<String>),
}

impl PatchField<ActiveModel> for BudgetField {
    fn name(&self) -> &'static str {
        match self {
            Self::Amount(_) => "amount",
            Self::Month(_) => "month",
            Self::Year(_) => "year",
            Self::CategoryId(_) => "categoryId",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Amount(amount) => ensure_non_negative(*amount, "budget amount"),
            Self::Month(month) => ensure_month(*month),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Amount(amount) => model.amount = ActiveValue::Set(amount),
            // validated to 1..=12
            Self::Month(month) => model.month = ActiveValue::Set(month as i32),
            Self::Year(year) => model.year = ActiveValue::Set(year),
            Self::CategoryId(id) => model.category_id = ActiveValue::Set(id),
        }
    }
}
