//! Shared bills and the people who owe a part of them.
//!
//! A bill is stored with its participants in the same transaction. The sum
//! of participant amounts is not forced to match the bill total; the gap is
//! reported as the unallocated amount.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    FieldTable, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_positive, normalize_optional_text, normalize_required_name},
};

pub mod participants;

pub use participants::Participant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitBill {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub total_amount: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "split bill",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("title", "title", Column::Title),
        ("totalAmount", "total_amount", Column::TotalAmount),
        ("date", "date", Column::Date),
        ("description", "description", Column::Description),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "split_bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub total_amount: i64,
    pub date: Date,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "participants::Entity")]
    Participants,
}

impl Related<participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "split bill";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl From<(Model, Vec<participants::Model>)> for SplitBill {
    fn from((model, participants): (Model, Vec<participants::Model>)) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            total_amount: model.total_amount,
            date: model.date,
            description: model.description,
            created_at: model.created_at,
            participants: participants.into_iter().map(Participant::from).collect(),
        }
    }
}

/// Divide `total` into `count` shares. The remainder is spread one unit at a
/// time over the first participants, so the shares always sum to `total`.
pub(crate) fn even_shares(total: i64, count: usize) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let parts = count as i64;
    let base = total / parts;
    let remainder = total % parts;
    (0..parts)
        .map(|index| if index < remainder { base + 1 } else { base })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum SplitBillField {
    Title(String),
    TotalAmount(i64),
    Date(NaiveDate),
    Description(Option<String>),
}

impl PatchField<ActiveModel> for SplitBillField {
    fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::TotalAmount(_) => "totalAmount",
            Self::Date(_) => "date",
            Self::Description(_) => "description",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Title(title) => normalize_required_name(title, "split bill").map(|_| ()),
            Self::TotalAmount(amount) => ensure_positive(*amount, "total amount"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Title(title) => model.title = ActiveValue::Set(title.trim().to_string()),
            Self::TotalAmount(amount) => model.total_amount = ActiveValue::Set(amount),
            Self::Date(date) => model.date = ActiveValue::Set(date),
            Self::Description(text) => {
                model.description = ActiveValue::Set(normalize_optional_text(text.as_deref()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_gives_remainder_to_first_participants() {
        assert_eq!(even_shares(100, 3), vec![34, 33, 33]);
        assert_eq!(even_shares(101, 3), vec![34, 34, 33]);
        assert_eq!(even_shares(90, 3), vec![30, 30, 30]);
        assert_eq!(even_shares(90, 0), Vec::<i64>::new());
    }

    #[test]
    fn even_split_always_sums_to_total() {
        for total in [1_i64, 7, 99_999, 1_000_001] {
            for count in 1..=7 {
                assert_eq!(even_shares(total, count).iter().sum::<i64>(), total);
            }
        }
    }
}
