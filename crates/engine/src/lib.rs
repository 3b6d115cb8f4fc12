//! Domain engine of the finance tracker.
//!
//! Entities live in `sea-orm` models and are exposed as typed domain structs.
//! Every operation is a method on [`Engine`], scoped to the calling user.
//! Multi-row writes (transfers, category deletion, split bills) run in a
//! single database transaction.

pub use api_types::{
    AccountType, BudgetState, Currency, DebtType, Frequency, InvestmentType, SortOrder,
    TransactionType,
};

pub use accounts::{Account, AccountField};
pub use budgets::{Budget, BudgetField};
pub use categories::{Category, CategoryField};
pub use commands::{
    AccountCmd, BudgetCmd, CategoryCmd, DebtCmd, InvestmentCmd, ParticipantCmd, RecurringCmd,
    ReminderCmd, SavingsGoalCmd, SplitBillCmd, TagCmd, TransactionCmd, TransferCmd,
};
pub use debts::{Debt, DebtField};
pub use error::EngineError;
pub use investments::{Investment, InvestmentField};
pub use naming::{FieldTable, ListOrder};
pub use ops::{
    BudgetFilter, DebtFilter, Engine, EngineBuilder, MAX_BALANCE_RETRIES, MAX_TX_ATTEMPTS,
    TransactionFilter,
};
pub use patch::{Patch, PatchField};
pub use recurring::{Recurring, RecurringField};
pub use reminders::{Reminder, ReminderField};
pub use savings_goals::{SavingsGoal, SavingsGoalField};
pub use split_bills::{Participant, SplitBill, SplitBillField};
pub use tags::{Tag, TagField};
pub use transactions::{Transaction, TransactionField};
pub use transfers::Transfer;
pub use users::{Profile, ProfileChanges};

pub mod palette;
pub mod reports;

mod accounts;
mod budgets;
mod categories;
mod commands;
mod debts;
mod error;
mod investments;
mod naming;
mod ops;
mod patch;
mod recurring;
mod reminders;
mod savings_goals;
mod split_bills;
mod tags;
mod transactions;
mod transfers;
mod users;
mod util;

/// Field-name tables, one per entity, for callers that render or sort by
/// wire names.
pub mod fields {
    pub use crate::accounts::FIELDS as ACCOUNT;
    pub use crate::budgets::FIELDS as BUDGET;
    pub use crate::categories::FIELDS as CATEGORY;
    pub use crate::debts::FIELDS as DEBT;
    pub use crate::investments::FIELDS as INVESTMENT;
    pub use crate::recurring::FIELDS as RECURRING;
    pub use crate::reminders::FIELDS as REMINDER;
    pub use crate::savings_goals::FIELDS as SAVINGS_GOAL;
    pub use crate::split_bills::FIELDS as SPLIT_BILL;
    pub use crate::split_bills::participants::FIELDS as PARTICIPANT;
    pub use crate::tags::FIELDS as TAG;
    pub use crate::transactions::FIELDS as TRANSACTION;
    pub use crate::transfers::FIELDS as TRANSFER;
    pub use crate::users::FIELDS as USER;
}

pub(crate) type ResultEngine<T> = Result<T, EngineError>;
