//! Bill and payment reminders.

use chrono::{DateTime, Days, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    FieldTable, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_positive, normalize_optional_text, normalize_required_name},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "reminder",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("title", "title", Column::Title),
        ("description", "description", Column::Description),
        ("amount", "amount", Column::Amount),
        ("dueDate", "due_date", Column::DueDate),
        ("isCompleted", "is_completed", Column::IsCompleted),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub due_date: Date,
    pub is_completed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "reminder";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl From<Model> for Reminder {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            amount: model.amount,
            due_date: model.due_date,
            is_completed: model.is_completed,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReminderField {
    Title(String),
    Description(Option<String>),
    Amount(Option<i64>),
    DueDate(NaiveDate),
    IsCompleted(bool),
}

impl PatchField<ActiveModel> for ReminderField {
    fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Description(_) => "description",
            Self::Amount(_) => "amount",
            Self::DueDate(_) => "dueDate",
            Self::IsCompleted(_) => "isCompleted",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Title(title) => normalize_required_name(title, "reminder").map(|_| ()),
            Self::Amount(Some(amount)) => ensure_positive(*amount, "reminder amount"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Title(title) => model.title = ActiveValue::Set(title.trim().to_string()),
            Self::Description(text) => {
                model.description = ActiveValue::Set(normalize_optional_text(text.as_deref()))
            }
            Self::Amount(amount) => model.amount = ActiveValue::Set(amount),
            Self::DueDate(date) => model.due_date = ActiveValue::Set(date),
            Self::IsCompleted(done) => model.is_completed = ActiveValue::Set(done),
        }
    }
}

/// Inclusive due-date window `[today, today + days]` of upcoming reminders.
pub(crate) fn upcoming_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let horizon = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);
    (today, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upcoming_window_spans_whole_days() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(
            upcoming_window(today, 7),
            (today, NaiveDate::from_ymd_opt(2026, 3, 17).unwrap())
        );
        assert_eq!(upcoming_window(today, 0), (today, today));
    }

    #[test]
    fn upcoming_window_saturates() {
        let (_, end) = upcoming_window(NaiveDate::MAX, 30);
        assert_eq!(end, NaiveDate::MAX);
    }
}
