//! Category registry per user.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, PatchField, ResultEngine, TransactionType,
    ops::Owned,
    util::{normalize_required_name, parse_stored},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: TransactionType,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "category",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("name", "name", Column::Name),
        ("type", "type", Column::Kind),
        ("color", "color", Column::Color),
        ("icon", "icon", Column::Icon),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "category";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            color: model.color,
            icon: model.icon,
            created_at: model.created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CategoryField {
    Name(String),
    Kind(TransactionType),
    Color(String),
    Icon(String),
}

impl PatchField<ActiveModel> for CategoryField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Kind(_) => "type",
            Self::Color(_) => "color",
            Self::Icon(_) => "icon",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Name(name) => normalize_required_name(name, "category").map(|_| ()),
            Self::Color(value) | Self::Icon(value) if value.trim().is_empty() => Err(
                EngineError::InvalidInput(format!("category {} must not be empty", self.name())),
            ),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Name(name) => model.name = ActiveValue::Set(name.trim().to_string()),
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::Color(color) => model.color = ActiveValue::Set(color.trim().to_string()),
            Self::Icon(icon) => model.icon = ActiveValue::Set(icon.trim().to_string()),
        }
    }
}
