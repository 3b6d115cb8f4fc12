//! Investment positions.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    EngineError, FieldTable, InvestmentType, PatchField, ResultEngine,
    ops::Owned,
    util::{ensure_non_negative, normalize_optional_text, normalize_required_name, parse_stored},
};

/// A position: a fractional quantity bought at `buy_price` per unit and
/// currently valued at `current_price` per unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: InvestmentType,
    pub quantity: f64,
    pub buy_price: i64,
    pub current_price: i64,
    pub buy_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "investment",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("name", "name", Column::Name),
        ("type", "type", Column::Kind),
        ("quantity", "quantity", Column::Quantity),
        ("buyPrice", "buy_price", Column::BuyPrice),
        ("currentPrice", "current_price", Column::CurrentPrice),
        ("buyDate", "buy_date", Column::BuyDate),
        ("notes", "notes", Column::Notes),
        ("createdAt", "created_at", Column::CreatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub quantity: f64,
    pub buy_price: i64,
    pub current_price: i64,
    pub buy_date: Date,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "investment";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Investment {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            quantity: model.quantity,
            buy_price: model.buy_price,
            current_price: model.current_price,
            buy_date: model.buy_date,
            notes: model.notes,
            created_at: model.created_at,
        })
    }
}

/// Quantities must be finite and strictly positive.
pub(crate) fn ensure_quantity(quantity: f64) -> ResultEngine<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(EngineError::InvalidAmount(
            "investment quantity must be > 0".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub enum InvestmentField {
    Name(String),
    Kind(InvestmentType),
    Quantity(f64),
    BuyPrice(i64),
    CurrentPrice(i64),
    BuyDate(NaiveDate),
    Notes(Option<String>),
}

impl PatchField<ActiveModel> for InvestmentField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Kind(_) => "type",
            Self::Quantity(_) => "quantity",
            Self::BuyPrice(_) => "buyPrice",
            Self::CurrentPrice(_) => "currentPrice",
            Self::BuyDate(_) => "buyDate",
            Self::Notes(_) => "notes",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        match self {
            Self::Name(name) => normalize_required_name(name, "investment").map(|_| ()),
            Self::Quantity(quantity) => ensure_quantity(*quantity),
            Self::BuyPrice(price) => ensure_non_negative(*price, "buy price"),
            Self::CurrentPrice(price) => ensure_non_negative(*price, "current price"),
            _ => Ok(()),
        }
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Name(name) => model.name = ActiveValue::Set(name.trim().to_string()),
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::Quantity(quantity) => model.quantity = ActiveValue::Set(quantity),
            Self::BuyPrice(price) => model.buy_price = ActiveValue::Set(price),
            Self::CurrentPrice(price) => model.current_price = ActiveValue::Set(price),
            Self::BuyDate(date) => model.buy_date = ActiveValue::Set(date),
            Self::Notes(notes) => {
                model.notes = ActiveValue::Set(normalize_optional_text(notes.as_deref()))
            }
        }
    }
}
