//! Command structs for engine operations.
//!
//! These types group parameters for create operations, keeping call sites
//! readable and avoiding long argument lists. Required values go through
//! `new`, optional ones through builder-style setters.

use chrono::NaiveDate;

use crate::{AccountType, Currency, DebtType, Frequency, InvestmentType, TransactionType};

/// Open a new account.
#[derive(Clone, Debug)]
pub struct AccountCmd {
    pub user_id: String,
    pub name: String,
    pub kind: AccountType,
    pub balance: i64,
    pub currency: Currency,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl AccountCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, kind: AccountType) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            kind,
            balance: 0,
            currency: Currency::default(),
            color: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

/// Move money between two accounts of the same user.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub user_id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: i64,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransferCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
            description: None,
            date: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }
}

/// Record an income or expense.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub user_id: String,
    pub kind: TransactionType,
    pub amount: i64,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, kind: TransactionType, amount: i64) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            amount,
            category_id: None,
            description: None,
            date: None,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }
}

#[derive(Clone, Debug)]
pub struct CategoryCmd {
    pub user_id: String,
    pub name: String,
    pub kind: TransactionType,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, kind: TransactionType) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            kind,
            color: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

/// Spending limit for a month; `category_id: None` is the overall budget.
#[derive(Clone, Debug)]
pub struct BudgetCmd {
    pub user_id: String,
    pub amount: i64,
    pub month: u32,
    pub year: i32,
    pub category_id: Option<String>,
}

impl BudgetCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, amount: i64, month: u32, year: i32) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            month,
            year,
            category_id: None,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }
}

#[derive(Clone, Debug)]
pub struct DebtCmd {
    pub user_id: String,
    pub kind: DebtType,
    pub person_name: String,
    pub amount: i64,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl DebtCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        kind: DebtType,
        person_name: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            person_name: person_name.into(),
            amount,
            description: None,
            due_date: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }
}

#[derive(Clone, Debug)]
pub struct InvestmentCmd {
    pub user_id: String,
    pub name: String,
    pub kind: InvestmentType,
    pub quantity: f64,
    pub buy_price: i64,
    /// Defaults to `buy_price`.
    pub current_price: Option<i64>,
    /// Defaults to today.
    pub buy_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl InvestmentCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        kind: InvestmentType,
        quantity: f64,
        buy_price: i64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            kind,
            quantity,
            buy_price,
            current_price: None,
            buy_date: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn current_price(mut self, current_price: Option<i64>) -> Self {
        self.current_price = current_price;
        self
    }

    #[must_use]
    pub fn buy_date(mut self, buy_date: Option<NaiveDate>) -> Self {
        self.buy_date = buy_date;
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ReminderCmd {
    pub user_id: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Option<i64>,
}

impl ReminderCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            due_date,
            description: None,
            amount: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Option<i64>) -> Self {
        self.amount = amount;
        self
    }
}

#[derive(Clone, Debug)]
pub struct SavingsGoalCmd {
    pub user_id: String,
    pub name: String,
    pub target_amount: i64,
    pub current_amount: i64,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl SavingsGoalCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, target_amount: i64) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            target_amount,
            current_amount: 0,
            deadline: None,
            color: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn current_amount(mut self, current_amount: i64) -> Self {
        self.current_amount = current_amount;
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }
}

#[derive(Clone, Debug)]
pub struct RecurringCmd {
    pub user_id: String,
    pub kind: TransactionType,
    pub amount: i64,
    pub frequency: Frequency,
    /// Defaults to today.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<String>,
    pub description: Option<String>,
}

impl RecurringCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        kind: TransactionType,
        amount: i64,
        frequency: Frequency,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            amount,
            frequency,
            start_date: None,
            end_date: None,
            category_id: None,
            description: None,
        }
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self
    }

    #[must_use]
    pub fn end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantCmd {
    pub name: String,
    /// Ignored when the bill is split evenly.
    pub amount: Option<i64>,
}

impl ParticipantCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Option<i64>) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Create a shared bill together with its participants.
#[derive(Clone, Debug)]
pub struct SplitBillCmd {
    pub user_id: String,
    pub title: String,
    pub total_amount: i64,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub participants: Vec<ParticipantCmd>,
    pub split_evenly: bool,
}

impl SplitBillCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, title: impl Into<String>, total_amount: i64) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            total_amount,
            date: None,
            description: None,
            participants: Vec::new(),
            split_evenly: false,
        }
    }

    #[must_use]
    pub fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn participant(mut self, participant: ParticipantCmd) -> Self {
        self.participants.push(participant);
        self
    }

    #[must_use]
    pub fn split_evenly(mut self, split_evenly: bool) -> Self {
        self.split_evenly = split_evenly;
        self
    }
}

#[derive(Clone, Debug)]
pub struct TagCmd {
    pub user_id: String,
    pub name: String,
    pub color: Option<String>,
}

impl TagCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}
