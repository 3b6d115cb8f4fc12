//! Free-form labels. Names are unique per user, ignoring case.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, PatchField, ResultEngine, ops::Owned, util::normalize_required_name,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "tag",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("name", "name", Column::Name),
        ("color", "color", Column::Color),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "tag";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl From<Model> for Tag {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            color: model.color,
            created_at: model.created_at,
        }
    }
}

/// Key used for the case-insensitive uniqueness check.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq)]
pub enum TagField {
    Name(String),
    Color(String),
}

impl PatchField<ActiveModel> for TagField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Color(_) => "color",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Name(name) => normalize_required_name(name, "tag").map(|_| ()),
            Self::Color(color) if color.trim().is_empty() => Err(EngineError::InvalidInput(
                "tag color must not be empty".to_string(),
            )),
            Self::Color(_) => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Name(name) => model.name = ActiveValue::Set(name.trim().to_string()),
            Self::Color(color) => model.color = ActiveValue::Set(color.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_key_ignores_case_and_padding() {
        assert_eq!(name_key(" Food "), name_key("FOOD"));
        assert_ne!(name_key("food"), name_key("foods"));
    }
}
