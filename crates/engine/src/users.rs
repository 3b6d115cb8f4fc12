//! Users table (profile entity).
//!
//! The id is the value of the identity header; a row exists only once the
//! profile has been saved.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{Currency, EngineError, FieldTable, ResultEngine, util::parse_stored};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "user",
    &[
        ("id", "id", Column::Id),
        ("name", "name", Column::Name),
        ("email", "email", Column::Email),
        ("currency", "currency", Column::Currency),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub currency: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Profile {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            currency: parse_stored(&model.currency)?,
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
        })
    }
}

/// Profile fields a user may change. Absent fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub currency: Option<Currency>,
}
