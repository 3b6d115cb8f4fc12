//! Loads rows for the pure functions in [`crate::reports`].

use sea_orm::{QueryFilter, prelude::*};

use crate::{
    Account, Budget, Debt, Investment, Recurring, ResultEngine, Transaction, accounts, budgets,
    debts, investments, recurring,
    reports::{
        self, BudgetStatus, DebtSummary, MonthlyReport, NetWorth, Portfolio, RecurringSummary,
    },
    transactions,
    util::{month_bounds, resolve_period},
};

use super::Engine;

impl Engine {
    async fn month_transactions(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> ResultEngine<Vec<Transaction>> {
        let (start, next) = month_bounds(month, year)?;
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lt(next))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn month_budgets(&self, user_id: &str, month: u32, year: i32) -> ResultEngine<Vec<Budget>> {
        budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::Month.eq(month as i32))
            .filter(budgets::Column::Year.eq(year))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    async fn all_debts(&self, user_id: &str) -> ResultEngine<Vec<Debt>> {
        debts::Entity::find()
            .filter(debts::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Debt::try_from)
            .collect()
    }

    async fn all_investments(&self, user_id: &str) -> ResultEngine<Vec<Investment>> {
        investments::Entity::find()
            .filter(investments::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Investment::try_from)
            .collect()
    }

    /// Whole-month budget status; month and year default to the current
    /// period.
    pub async fn budget_status(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ResultEngine<BudgetStatus> {
        let (month, year) = resolve_period(month, year)?;
        let transactions = self.month_transactions(user_id, month, year).await?;
        let budgets = self.month_budgets(user_id, month, year).await?;
        reports::budget_status(&transactions, &budgets, month, year)
    }

    pub async fn monthly_report(
        &self,
        user_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ResultEngine<MonthlyReport> {
        let (month, year) = resolve_period(month, year)?;
        let transactions = self.month_transactions(user_id, month, year).await?;
        let budgets = self.month_budgets(user_id, month, year).await?;
        Ok(MonthlyReport {
            stats: reports::monthly_stats(&transactions, month, year)?,
            budget: reports::budget_status(&transactions, &budgets, month, year)?,
        })
    }

    pub async fn net_worth(&self, user_id: &str) -> ResultEngine<NetWorth> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::IsActive.eq(true))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        let investments = self.all_investments(user_id).await?;
        let debts = self.all_debts(user_id).await?;
        reports::net_worth(&accounts, &investments, &debts)
    }

    pub async fn debt_summary(&self, user_id: &str) -> ResultEngine<DebtSummary> {
        let debts = self.all_debts(user_id).await?;
        reports::debt_summary(&debts)
    }

    pub async fn portfolio(&self, user_id: &str) -> ResultEngine<Portfolio> {
        let investments = self.all_investments(user_id).await?;
        reports::portfolio(&investments)
    }

    pub async fn recurring_summary(&self, user_id: &str) -> ResultEngine<RecurringSummary> {
        let items = recurring::Entity::find()
            .filter(recurring::Column::UserId.eq(user_id))
            .filter(recurring::Column::IsActive.eq(true))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Recurring::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        reports::recurring_summary(&items)
    }
}
