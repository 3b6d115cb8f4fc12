//! JSON wire types shared by the server and its clients.
//!
//! Every struct serializes with camelCase field names; storage uses
//! snake_case and the engine owns the translation between the two.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a wire string does not name a known enum variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Declares a string-backed enum whose wire name and storage value agree.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string used both on the wire and in storage.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// ISO 4217 code of an account or profile currency.
    ///
    /// There is no conversion between currencies: aggregates that cross
    /// accounts only consider [`Currency::Idr`].
    Currency {
        Idr => "IDR",
        Usd => "USD",
        Eur => "EUR",
        Sgd => "SGD",
        Myr => "MYR",
        Jpy => "JPY",
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Idr
    }
}

impl Currency {
    /// Number of fraction digits carried by stored amounts.
    ///
    /// Rupiah and yen are tracked in whole units, so `100000` IDR is stored
    /// as `100000`.
    pub const fn minor_units(self) -> u8 {
        match self {
            Self::Idr | Self::Jpy => 0,
            Self::Usd | Self::Eur | Self::Sgd | Self::Myr => 2,
        }
    }
}

wire_enum! {
    AccountType {
        Cash => "cash",
        Bank => "bank",
        EWallet => "e-wallet",
        CreditCard => "credit-card",
    }
}

wire_enum! {
    TransactionType {
        Income => "income",
        Expense => "expense",
    }
}

wire_enum! {
    /// Direction of a debt: `Receivable` is owed to the user, `Payable` is
    /// owed by the user.
    DebtType {
        Receivable => "receivable",
        Payable => "payable",
    }
}

wire_enum! {
    InvestmentType {
        Stock => "stock",
        MutualFund => "mutual-fund",
        Bond => "bond",
        Crypto => "crypto",
        Gold => "gold",
        Property => "property",
        Other => "other",
    }
}

wire_enum! {
    Frequency {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
    }
}

wire_enum! {
    BudgetState {
        Safe => "safe",
        NearLimit => "near-limit",
        OverBudget => "over-budget",
    }
}

wire_enum! {
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

/// Deserializes a field that distinguishes "absent" from `null`.
///
/// Use with `#[serde(default, deserialize_with = "crate::double_option")]`:
/// an absent field stays `None`, an explicit `null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string shared by list endpoints that accept a sort override.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortQuery {
    /// camelCase name of the field to sort by.
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

/// `?userId=` on single-row routes whose owner is claimed by the caller.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountNew {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: AccountType,
        pub balance: Option<i64>,
        pub currency: Option<Currency>,
        pub color: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountUpdate {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<AccountType>,
        /// Direct balance edit.
        pub balance: Option<i64>,
        pub currency: Option<Currency>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub color: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub icon: Option<Option<String>>,
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountListQuery {
        pub include_inactive: Option<bool>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: AccountType,
        pub balance: i64,
        pub currency: Currency,
        pub color: Option<String>,
        pub icon: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod transfer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferNew {
        pub from_account_id: String,
        pub to_account_id: String,
        pub amount: i64,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferListQuery {
        /// Restricts the list to transfers where this account is either side.
        pub account_id: Option<String>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferView {
        pub id: String,
        pub user_id: String,
        pub from_account_id: String,
        pub to_account_id: String,
        pub amount: i64,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionNew {
        /// Owner claimed by the caller; required.
        pub user_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: i64,
        pub category_id: Option<String>,
        pub description: Option<String>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionUpdate {
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub amount: Option<i64>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub category_id: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListQuery {
        pub user_id: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub category_id: Option<String>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        pub user_id: String,
        pub category_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: i64,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryNew {
        pub user_id: Option<String>,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub color: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub color: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryListQuery {
        pub user_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub color: String,
        pub icon: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetNew {
        pub user_id: Option<String>,
        pub amount: i64,
        pub month: u32,
        pub year: i32,
        pub category_id: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetUpdate {
        pub amount: Option<i64>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub category_id: Option<Option<String>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetListQuery {
        pub user_id: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetView {
        pub id: String,
        pub user_id: String,
        pub category_id: Option<String>,
        pub amount: i64,
        pub month: u32,
        pub year: i32,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetStatusView {
        pub month: u32,
        pub year: i32,
        pub budget: i64,
        pub spent: i64,
        pub remaining: i64,
        pub percentage: f64,
        pub state: BudgetState,
    }
}

pub mod debt {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtNew {
        #[serde(rename = "type")]
        pub kind: DebtType,
        pub person_name: String,
        pub amount: i64,
        pub description: Option<String>,
        pub due_date: Option<NaiveDate>,
    }

    /// Paid state is not updatable here; use the pay endpoint.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtUpdate {
        #[serde(rename = "type")]
        pub kind: Option<DebtType>,
        pub person_name: Option<String>,
        pub amount: Option<i64>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub due_date: Option<Option<NaiveDate>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtListQuery {
        #[serde(rename = "type")]
        pub kind: Option<DebtType>,
        pub is_paid: Option<bool>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtView {
        pub id: String,
        pub user_id: String,
        #[serde(rename = "type")]
        pub kind: DebtType,
        pub person_name: String,
        pub amount: i64,
        pub description: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub is_paid: bool,
        pub paid_date: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtSummaryView {
        pub total_receivable: i64,
        pub total_payable: i64,
        pub net: i64,
    }
}

pub mod investment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentNew {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: InvestmentType,
        pub quantity: f64,
        pub buy_price: i64,
        pub current_price: Option<i64>,
        pub buy_date: Option<NaiveDate>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentUpdate {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<InvestmentType>,
        pub quantity: Option<f64>,
        pub buy_price: Option<i64>,
        pub current_price: Option<i64>,
        pub buy_date: Option<NaiveDate>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub notes: Option<Option<String>>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvestmentView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: InvestmentType,
        pub quantity: f64,
        pub buy_price: i64,
        pub current_price: i64,
        pub buy_date: NaiveDate,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PositionView {
        pub id: String,
        pub name: String,
        pub current_value: i64,
        pub gain: i64,
        pub return_percentage: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PortfolioView {
        pub positions: Vec<PositionView>,
        pub total_value: i64,
        pub total_gain: i64,
        pub return_percentage: f64,
    }
}

pub mod reminder {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderNew {
        pub title: String,
        pub due_date: NaiveDate,
        pub description: Option<String>,
        pub amount: Option<i64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderUpdate {
        pub title: Option<String>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub amount: Option<Option<i64>>,
        pub due_date: Option<NaiveDate>,
        pub is_completed: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderListQuery {
        /// Only incomplete reminders due within this many days from today.
        pub upcoming: Option<u32>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderView {
        pub id: String,
        pub user_id: String,
        pub title: String,
        pub description: Option<String>,
        pub amount: Option<i64>,
        pub due_date: NaiveDate,
        pub is_completed: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod savings_goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingsGoalNew {
        pub name: String,
        pub target_amount: i64,
        pub current_amount: Option<i64>,
        pub deadline: Option<NaiveDate>,
        pub color: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingsGoalUpdate {
        pub name: Option<String>,
        pub target_amount: Option<i64>,
        pub current_amount: Option<i64>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub deadline: Option<Option<NaiveDate>>,
        pub color: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Contribution {
        /// Signed: negative values withdraw from the goal.
        pub amount: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SavingsGoalView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        pub target_amount: i64,
        pub current_amount: i64,
        pub deadline: Option<NaiveDate>,
        pub color: String,
        pub icon: String,
        pub is_completed: bool,
        pub progress: f64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringNew {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: i64,
        pub frequency: Frequency,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub category_id: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringUpdate {
        #[serde(rename = "type")]
        pub kind: Option<TransactionType>,
        pub amount: Option<i64>,
        pub frequency: Option<Frequency>,
        pub start_date: Option<NaiveDate>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub end_date: Option<Option<NaiveDate>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub category_id: Option<Option<String>>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
        pub is_active: Option<bool>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringListQuery {
        pub active_only: Option<bool>,
        pub sort: Option<String>,
        pub order: Option<SortOrder>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringView {
        pub id: String,
        pub user_id: String,
        pub category_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: i64,
        pub description: Option<String>,
        pub frequency: Frequency,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecurringSummaryView {
        pub monthly_income: i64,
        pub monthly_expense: i64,
        pub monthly_net: i64,
    }
}

pub mod split_bill {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParticipantNew {
        pub name: String,
        /// Ignored when the bill is split evenly.
        pub amount: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitBillNew {
        pub title: String,
        pub total_amount: i64,
        pub date: Option<NaiveDate>,
        pub description: Option<String>,
        #[serde(default)]
        pub participants: Vec<ParticipantNew>,
        #[serde(default)]
        pub split_evenly: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitBillUpdate {
        pub title: Option<String>,
        pub total_amount: Option<i64>,
        pub date: Option<NaiveDate>,
        #[serde(
            default,
            deserialize_with = "crate::double_option",
            skip_serializing_if = "Option::is_none"
        )]
        pub description: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParticipantPayment {
        pub is_paid: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ParticipantView {
        pub id: String,
        pub split_bill_id: String,
        pub name: String,
        pub amount: i64,
        pub is_paid: bool,
        pub paid_date: Option<NaiveDate>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitBillView {
        pub id: String,
        pub user_id: String,
        pub title: String,
        pub total_amount: i64,
        pub date: NaiveDate,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub participants: Vec<ParticipantView>,
        pub allocated_amount: i64,
        pub unallocated_amount: i64,
        pub paid_amount: i64,
        pub outstanding_amount: i64,
    }
}

pub mod tag {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagNew {
        pub name: String,
        pub color: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagUpdate {
        pub name: Option<String>,
        pub color: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagView {
        pub id: String,
        pub user_id: String,
        pub name: String,
        pub color: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileUpdate {
        pub name: Option<String>,
        pub email: Option<String>,
        pub currency: Option<Currency>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileView {
        pub id: String,
        pub name: Option<String>,
        pub email: Option<String>,
        pub currency: Currency,
        pub created_at: DateTime<Utc>,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PeriodQuery {
        /// Owner for the caller-claimed endpoints; ignored elsewhere.
        pub user_id: Option<String>,
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryTotalView {
        pub category_id: Option<String>,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub total: i64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyReportView {
        pub month: u32,
        pub year: i32,
        pub income: i64,
        pub expense: i64,
        pub net: i64,
        pub by_category: Vec<CategoryTotalView>,
        pub budget: super::budget::BudgetStatusView,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NetWorthView {
        pub accounts: i64,
        pub investments: i64,
        pub receivables: i64,
        pub payables: i64,
        pub net_worth: i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_uses_hyphenated_wire_names() {
        assert_eq!(AccountType::EWallet.as_str(), "e-wallet");
        assert_eq!("credit-card".parse::<AccountType>(), Ok(AccountType::CreditCard));
        assert_eq!(
            serde_json::to_string(&AccountType::EWallet).unwrap(),
            "\"e-wallet\""
        );
    }

    #[test]
    fn unknown_variant_reports_kind_and_value() {
        let err = "savings".parse::<AccountType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown AccountType: 'savings'");
    }

    #[test]
    fn currency_defaults_to_rupiah() {
        assert_eq!(Currency::default(), Currency::Idr);
        assert_eq!(Currency::Idr.minor_units(), 0);
        assert_eq!(Currency::Usd.minor_units(), 2);
    }

    #[test]
    fn double_option_distinguishes_absent_from_null() {
        let absent: transaction::TransactionUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.category_id, None);

        let cleared: transaction::TransactionUpdate =
            serde_json::from_str(r#"{"categoryId": null}"#).unwrap();
        assert_eq!(cleared.category_id, Some(None));

        let set: transaction::TransactionUpdate =
            serde_json::from_str(r#"{"categoryId": "c1"}"#).unwrap();
        assert_eq!(set.category_id, Some(Some("c1".to_string())));
    }

    #[test]
    fn type_field_is_renamed_on_the_wire() {
        let new: account::AccountNew =
            serde_json::from_str(r#"{"name": "BCA", "type": "bank"}"#).unwrap();
        assert_eq!(new.kind, AccountType::Bank);
        assert_eq!(new.balance, None);
    }
}
