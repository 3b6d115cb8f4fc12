//! Savings goals and their progress.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_non_negative, ensure_positive, normalize_required_name},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Option<NaiveDate>,
    pub color: String,
    pub icon: String,
    /// Follows `current_amount >= target_amount`.
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Percentage of the target reached, capped at 100.
    pub fn progress(&self) -> f64 {
        crate::reports::savings_progress(self.current_amount, self.target_amount)
    }
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "savings goal",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("name", "name", Column::Name),
        ("targetAmount", "target_amount", Column::TargetAmount),
        ("currentAmount", "current_amount", Column::CurrentAmount),
        ("deadline", "deadline", Column::Deadline),
        ("color", "color", Column::Color),
        ("icon", "icon", Column::Icon),
        ("isCompleted", "is_completed", Column::IsCompleted),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Option<Date>,
    pub color: String,
    pub icon: String,
    pub is_completed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "savings goal";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl From<Model> for SavingsGoal {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            deadline: model.deadline,
            color: model.color,
            icon: model.icon,
            is_completed: model.is_completed,
            created_at: model.created_at,
        }
    }
}

/// Updatable goal fields. `is_completed` is derived and recomputed after
/// every update.
#[derive(Clone, Debug, PartialEq)]
pub enum SavingsGoalField {
    Name(String),
    TargetAmount(i64),
    CurrentAmount(i64),
    Deadline(Option<NaiveDate>),
    Color(String),
    Icon(String),
}

impl PatchField<ActiveModel> for SavingsGoalField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::TargetAmount(_) => "targetAmount",
            Self::CurrentAmount(_) => "currentAmount",
            Self::Deadline(_) => "deadline",
            Self::Color(_) => "color",
            Self::Icon(_) => "icon",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Name(name) => normalize_required_name(name, "savings goal").map(|_| ()),
            Self::TargetAmount(amount) => ensure_positive(*amount, "target amount"),
            Self::CurrentAmount(amount) => ensure_non_negative(*amount, "current amount"),
            Self::Color(value) | Self::Icon(value) if value.trim().is_empty() => Err(
                EngineError::InvalidInput(format!("savings goal {} must not be empty", self.name())),
            ),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Name(name) => model.name = ActiveValue::Set(name.trim().to_string()),
            Self::TargetAmount(amount) => model.target_amount = ActiveValue::Set(amount),
            Self::CurrentAmount(amount) => model.current_amount = ActiveValue::Set(amount),
            Self::Deadline(date) => model.deadline = ActiveValue::Set(date),
            Self::Color(color) => model.color = ActiveValue::Set(color.trim().to_string()),
            Self::Icon(icon) => model.icon = ActiveValue::Set(icon.trim().to_string()),
        }
    }
}
