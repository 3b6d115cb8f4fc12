//! The module contains the `Account` struct and its storage model.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{
    AccountType, Currency, EngineError, FieldTable, PatchField, ResultEngine, ops::Owned,
    util::{normalize_optional_text, normalize_required_name, parse_stored},
};

/// An account.
///
/// An account is where money is kept: cash, a bank account, an e-wallet or a
/// credit card. Its balance moves only through direct edits and transfers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub kind: AccountType,
    pub balance: i64,
    pub currency: Currency,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// `false` once the account has been (soft) deleted.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const FIELDS: FieldTable<Column> = FieldTable::new(
    "account",
    &[
        ("id", "id", Column::Id),
        ("userId", "user_id", Column::UserId),
        ("name", "name", Column::Name),
        ("type", "type", Column::Kind),
        ("balance", "balance", Column::Balance),
        ("currency", "currency", Column::Currency),
        ("color", "color", Column::Color),
        ("icon", "icon", Column::Icon),
        ("isActive", "is_active", Column::IsActive),
        ("createdAt", "created_at", Column::CreatedAt),
        ("updatedAt", "updated_at", Column::UpdatedAt),
    ],
);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub balance: i64,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Entity {
    const LABEL: &'static str = "account";

    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            kind: parse_stored(&model.kind)?,
            currency: parse_stored(&model.currency)?,
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            balance: model.balance,
            color: model.color,
            icon: model.icon,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Updatable account fields.
#[derive(Clone, Debug, PartialEq)]
pub enum AccountField {
    Name(String),
    Kind(AccountType),
    /// Direct balance edit.
    Balance(i64),
    Currency(Currency),
    Color(Option<String>),
    Icon(Option<String>),
    IsActive(bool),
}

impl PatchField<ActiveModel> for AccountField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Kind(_) => "type",
            Self::Balance(_) => "balance",
            Self::Currency(_) => "currency",
            Self::Color(_) => "color",
            Self::Icon(_) => "icon",
            Self::IsActive(_) => "isActive",
        }
    }

    fn validate(&self) -> ResultEngine<()> {
        if let Self::Name(name) = self {
            normalize_required_name(name, "account")?;
        }
        Ok(())
    }

    fn apply(self, model: &mut ActiveModel) {
        match self {
            Self::Name(name) => model.name = ActiveValue::Set(name.trim().to_string()),
            Self::Kind(kind) => model.kind = ActiveValue::Set(kind.as_str().to_string()),
            Self::Balance(balance) => model.balance = ActiveValue::Set(balance),
            Self::Currency(currency) => {
                model.currency = ActiveValue::Set(currency.as_str().to_string())
            }
            Self::Color(color) => {
                model.color = ActiveValue::Set(normalize_optional_text(color.as_deref()))
            }
            Self::Icon(icon) => {
                model.icon = ActiveValue::Set(normalize_optional_text(icon.as_deref()))
            }
            Self::IsActive(active) => model.is_active = ActiveValue::Set(active),
        }
        model.updated_at = ActiveValue::Set(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            name: "BCA".to_string(),
            kind: "e-wallet".to_string(),
            balance: 100_000,
            currency: "IDR".to_string(),
            color: None,
            icon: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn model_converts_into_typed_account() {
        let account = Account::try_from(model()).unwrap();
        assert_eq!(account.kind, AccountType::EWallet);
        assert_eq!(account.currency, Currency::Idr);
    }

    #[test]
    fn unknown_stored_type_is_rejected() {
        let mut bad = model();
        bad.kind = "brokerage".to_string();
        assert!(Account::try_from(bad).is_err());
    }

    #[test]
    fn patch_touches_only_supplied_columns() {
        let mut active = ActiveModel {
            id: ActiveValue::Unchanged("a1".to_string()),
            ..Default::default()
        };
        AccountField::Name("  Jago ".to_string()).apply(&mut active);
        assert_eq!(active.name, ActiveValue::Set("Jago".to_string()));
        assert_eq!(active.balance, ActiveValue::NotSet);
        assert!(matches!(active.updated_at, ActiveValue::Set(_)));
    }

    #[test]
    fn blank_name_fails_validation() {
        assert!(matches!(
            AccountField::Name(" ".to_string()).validate(),
            Err(EngineError::InvalidName(_))
        ));
    }
}
