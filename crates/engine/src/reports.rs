//! Pure aggregation functions.
//!
//! Nothing here touches the database: operations load the rows and hand them
//! over, which keeps every formula unit-testable. Totals use checked
//! arithmetic; a total that does not fit in an `i64` is
//! [`EngineError::InvalidAmount`].

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::{
    Account, Budget, BudgetState, Currency, Debt, DebtType, EngineError, Frequency, Investment,
    Recurring, ResultEngine, SplitBill, Transaction, TransactionType,
};

/// Percentage at which a budget turns `near-limit`.
pub const NEAR_LIMIT_PERCENTAGE: f64 = 80.0;
/// Percentage at which a budget turns `over-budget`.
pub const OVER_BUDGET_PERCENTAGE: f64 = 100.0;

fn out_of_range(label: &str) -> EngineError {
    EngineError::InvalidAmount(format!("{label} is out of range"))
}

fn add(a: i64, b: i64, label: &str) -> ResultEngine<i64> {
    a.checked_add(b).ok_or_else(|| out_of_range(label))
}

fn sub(a: i64, b: i64, label: &str) -> ResultEngine<i64> {
    a.checked_sub(b).ok_or_else(|| out_of_range(label))
}

fn total<I>(amounts: I, label: &str) -> ResultEngine<i64>
where
    I: IntoIterator<Item = i64>,
{
    amounts
        .into_iter()
        .try_fold(0_i64, |sum, amount| add(sum, amount, label))
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetStatus {
    pub month: u32,
    pub year: i32,
    pub budget: i64,
    pub spent: i64,
    pub remaining: i64,
    pub percentage: f64,
    pub state: BudgetState,
}

/// `spent` as a percentage of `budget`; 0 when there is no budget.
pub fn budget_percentage(spent: i64, budget: i64) -> f64 {
    if budget == 0 {
        return 0.0;
    }
    (spent as f64 * 100.0) / budget as f64
}

pub fn budget_state(percentage: f64) -> BudgetState {
    if percentage >= OVER_BUDGET_PERCENTAGE {
        BudgetState::OverBudget
    } else if percentage >= NEAR_LIMIT_PERCENTAGE {
        BudgetState::NearLimit
    } else {
        BudgetState::Safe
    }
}

fn in_period(transaction: &Transaction, month: u32, year: i32) -> bool {
    transaction.date.month() == month && transaction.date.year() == year
}

/// Status of the whole-month budget (the one without a category).
pub fn budget_status(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: u32,
    year: i32,
) -> ResultEngine<BudgetStatus> {
    let budget = budgets
        .iter()
        .find(|b| b.category_id.is_none() && b.month == month && b.year == year)
        .map_or(0, |b| b.amount);
    let spent = total(
        transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense && in_period(t, month, year))
            .map(|t| t.amount),
        "monthly spending",
    )?;
    let percentage = budget_percentage(spent, budget);
    Ok(BudgetStatus {
        month,
        year,
        budget,
        spent,
        remaining: sub(budget, spent, "remaining budget")?,
        percentage,
        state: budget_state(percentage),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: Option<String>,
    pub kind: TransactionType,
    pub total: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyStats {
    pub month: u32,
    pub year: i32,
    pub income: i64,
    pub expense: i64,
    pub net: i64,
    /// Sorted by total, largest first.
    pub by_category: Vec<CategoryTotal>,
}

pub fn monthly_stats(
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> ResultEngine<MonthlyStats> {
    let mut income = 0;
    let mut expense = 0;
    let mut totals: BTreeMap<(Option<&str>, &'static str), (TransactionType, i64)> =
        BTreeMap::new();

    for transaction in transactions.iter().filter(|t| in_period(t, month, year)) {
        match transaction.kind {
            TransactionType::Income => income = add(income, transaction.amount, "monthly income")?,
            TransactionType::Expense => {
                expense = add(expense, transaction.amount, "monthly expense")?
            }
        }
        let key = (
            transaction.category_id.as_deref(),
            transaction.kind.as_str(),
        );
        let entry = totals.entry(key).or_insert((transaction.kind, 0));
        entry.1 = add(entry.1, transaction.amount, "category total")?;
    }

    let mut by_category: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|((category_id, _), (kind, total))| CategoryTotal {
            category_id: category_id.map(ToString::to_string),
            kind,
            total,
        })
        .collect();
    by_category.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(MonthlyStats {
        month,
        year,
        income,
        expense,
        net: sub(income, expense, "monthly net")?,
        by_category,
    })
}

/// Monthly stats together with the whole-month budget status.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyReport {
    pub stats: MonthlyStats,
    pub budget: BudgetStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub current_value: i64,
    pub gain: i64,
    pub return_percentage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Portfolio {
    pub positions: Vec<Position>,
    pub total_value: i64,
    pub total_gain: i64,
    pub return_percentage: f64,
}

/// `gain / (value - gain) × 100`, 0 when the basis is 0.
pub fn return_percentage(current_value: i64, gain: i64) -> f64 {
    let basis = current_value as f64 - gain as f64;
    if basis == 0.0 {
        return 0.0;
    }
    gain as f64 / basis * 100.0
}

/// Rounded `price × quantity`. Values past the `i64` range are rejected.
fn rounded_amount(value: f64, label: &str) -> ResultEngine<i64> {
    let value = value.round();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !value.is_finite() || value >= i64::MAX as f64 || value < i64::MIN as f64 {
        return Err(out_of_range(label));
    }
    Ok(value as i64)
}

pub fn current_value(investment: &Investment) -> ResultEngine<i64> {
    rounded_amount(
        investment.current_price as f64 * investment.quantity,
        "investment value",
    )
}

pub fn position(investment: &Investment) -> ResultEngine<Position> {
    let current_value = current_value(investment)?;
    let gain = rounded_amount(
        (investment.current_price as f64 - investment.buy_price as f64) * investment.quantity,
        "investment gain",
    )?;
    Ok(Position {
        id: investment.id.clone(),
        name: investment.name.clone(),
        current_value,
        gain,
        return_percentage: return_percentage(current_value, gain),
    })
}

pub fn portfolio(investments: &[Investment]) -> ResultEngine<Portfolio> {
    let positions = investments
        .iter()
        .map(position)
        .collect::<ResultEngine<Vec<_>>>()?;
    let total_value = total(positions.iter().map(|p| p.current_value), "portfolio value")?;
    let total_gain = total(positions.iter().map(|p| p.gain), "portfolio gain")?;
    Ok(Portfolio {
        positions,
        total_value,
        total_gain,
        return_percentage: return_percentage(total_value, total_gain),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebtSummary {
    pub total_receivable: i64,
    pub total_payable: i64,
    pub net: i64,
}

/// Totals of the unpaid debts.
pub fn debt_summary(debts: &[Debt]) -> ResultEngine<DebtSummary> {
    let unpaid = |kind: DebtType| {
        debts
            .iter()
            .filter(move |d| !d.is_paid && d.kind == kind)
            .map(|d| d.amount)
    };
    let total_receivable = total(unpaid(DebtType::Receivable), "receivable total")?;
    let total_payable = total(unpaid(DebtType::Payable), "payable total")?;
    Ok(DebtSummary {
        total_receivable,
        total_payable,
        net: sub(total_receivable, total_payable, "net debt")?,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetWorth {
    pub accounts: i64,
    pub investments: i64,
    pub receivables: i64,
    pub payables: i64,
    pub net_worth: i64,
}

/// Active rupiah accounts plus investments plus unpaid receivables, minus
/// unpaid payables. Accounts in other currencies are left out.
pub fn net_worth(
    accounts: &[Account],
    investments: &[Investment],
    debts: &[Debt],
) -> ResultEngine<NetWorth> {
    let account_total = total(
        accounts
            .iter()
            .filter(|a| a.is_active && a.currency == Currency::Idr)
            .map(|a| a.balance),
        "account total",
    )?;
    let investment_total = total(
        investments
            .iter()
            .map(current_value)
            .collect::<ResultEngine<Vec<_>>>()?,
        "investment total",
    )?;
    let debts = debt_summary(debts)?;
    let assets = total([account_total, investment_total, debts.total_receivable], "net worth")?;
    Ok(NetWorth {
        accounts: account_total,
        investments: investment_total,
        receivables: debts.total_receivable,
        payables: debts.total_payable,
        net_worth: sub(assets, debts.total_payable, "net worth")?,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecurringSummary {
    pub monthly_income: i64,
    pub monthly_expense: i64,
    pub monthly_net: i64,
}

/// Amount per month for an item repeating at `frequency`.
pub fn monthly_equivalent(amount: i64, frequency: Frequency) -> ResultEngine<i64> {
    let amount = amount as f64;
    let monthly = match frequency {
        Frequency::Daily => amount * 365.0 / 12.0,
        Frequency::Weekly => amount * 52.0 / 12.0,
        Frequency::Monthly => amount,
        Frequency::Yearly => amount / 12.0,
    };
    rounded_amount(monthly, "monthly equivalent")
}

/// Monthly equivalents of the active items.
pub fn recurring_summary(items: &[Recurring]) -> ResultEngine<RecurringSummary> {
    let mut summary = RecurringSummary::default();
    for item in items.iter().filter(|i| i.is_active) {
        let monthly = monthly_equivalent(item.amount, item.frequency)?;
        match item.kind {
            TransactionType::Income => {
                summary.monthly_income = add(summary.monthly_income, monthly, "recurring income")?
            }
            TransactionType::Expense => {
                summary.monthly_expense =
                    add(summary.monthly_expense, monthly, "recurring expense")?
            }
        }
    }
    summary.monthly_net = sub(
        summary.monthly_income,
        summary.monthly_expense,
        "recurring net",
    )?;
    Ok(summary)
}

/// `current / target × 100`, capped at 100.
pub fn savings_progress(current: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    ((current as f64 * 100.0) / target as f64).clamp(0.0, 100.0)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub allocated: i64,
    pub paid: i64,
    pub outstanding: i64,
    pub unallocated: i64,
}

pub fn split_summary(bill: &SplitBill) -> ResultEngine<SplitSummary> {
    let allocated = total(bill.participants.iter().map(|p| p.amount), "allocated amount")?;
    let paid = total(
        bill.participants
            .iter()
            .filter(|p| p.is_paid)
            .map(|p| p.amount),
        "paid amount",
    )?;
    Ok(SplitSummary {
        allocated,
        paid,
        outstanding: sub(allocated, paid, "outstanding amount")?,
        unallocated: sub(bill.total_amount, allocated, "unallocated amount")?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::{AccountType, InvestmentType, split_bills::Participant};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(kind: TransactionType, amount: i64, on: NaiveDate, category: Option<&str>) -> Transaction {
        Transaction {
            id: format!("t-{amount}"),
            user_id: "u1".to_string(),
            category_id: category.map(ToString::to_string),
            kind,
            amount,
            description: None,
            date: on,
            created_at: Utc::now(),
        }
    }

    fn budget(amount: i64, category: Option<&str>) -> Budget {
        Budget {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            category_id: category.map(ToString::to_string),
            amount,
            month: 3,
            year: 2026,
            created_at: Utc::now(),
        }
    }

    fn investment(quantity: f64, buy: i64, current: i64) -> Investment {
        Investment {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            name: "BBCA".to_string(),
            kind: InvestmentType::Stock,
            quantity,
            buy_price: buy,
            current_price: current,
            buy_date: date(2025, 1, 2),
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn debt(kind: DebtType, amount: i64, paid: bool) -> Debt {
        Debt {
            id: "d1".to_string(),
            user_id: "u1".to_string(),
            kind,
            person_name: "Budi".to_string(),
            amount,
            description: None,
            due_date: None,
            is_paid: paid,
            paid_date: None,
            created_at: Utc::now(),
        }
    }

    fn account(balance: i64, currency: Currency, active: bool) -> Account {
        Account {
            id: "a1".to_string(),
            user_id: "u1".to_string(),
            name: "BCA".to_string(),
            kind: AccountType::Bank,
            balance,
            currency,
            color: None,
            icon: None,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn participant(name: &str, amount: i64, paid: bool) -> Participant {
        Participant {
            id: name.to_string(),
            split_bill_id: "s1".to_string(),
            name: name.to_string(),
            amount,
            is_paid: paid,
            paid_date: None,
        }
    }

    fn split_bill(total_amount: i64, participants: Vec<Participant>) -> SplitBill {
        SplitBill {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            title: "Dinner".to_string(),
            total_amount,
            date: date(2026, 3, 1),
            description: None,
            created_at: Utc::now(),
            participants,
        }
    }

    fn rejected<T>(result: ResultEngine<T>) -> bool {
        matches!(result, Err(EngineError::InvalidAmount(_)))
    }

    #[test]
    fn eighty_percent_is_near_limit() {
        let txs = [tx(TransactionType::Expense, 800, date(2026, 3, 5), None)];
        let status = budget_status(&txs, &[budget(1000, None)], 3, 2026).unwrap();
        assert_eq!(status.percentage, 80.0);
        assert_eq!(status.state, BudgetState::NearLimit);
        assert_eq!(status.remaining, 200);
    }

    #[test]
    fn spending_past_the_budget_is_over_budget() {
        let txs = [tx(TransactionType::Expense, 1001, date(2026, 3, 5), None)];
        let status = budget_status(&txs, &[budget(1000, None)], 3, 2026).unwrap();
        assert_eq!(status.state, BudgetState::OverBudget);
        assert_eq!(status.remaining, -1);
    }

    #[test]
    fn zero_budget_reports_zero_percent() {
        let txs = [tx(TransactionType::Expense, 500, date(2026, 3, 5), None)];
        let status = budget_status(&txs, &[budget(0, None)], 3, 2026).unwrap();
        assert_eq!(status.percentage, 0.0);
        assert!(status.percentage.is_finite());
        assert_eq!(status.state, BudgetState::Safe);

        let missing = budget_status(&txs, &[], 3, 2026).unwrap();
        assert_eq!(missing.budget, 0);
        assert_eq!(missing.percentage, 0.0);
    }

    #[test]
    fn status_ignores_income_other_months_and_category_budgets() {
        let txs = [
            tx(TransactionType::Expense, 300, date(2026, 3, 31), None),
            tx(TransactionType::Income, 5_000, date(2026, 3, 1), None),
            tx(TransactionType::Expense, 900, date(2026, 4, 1), None),
        ];
        let budgets = [budget(200, Some("food")), budget(1000, None)];
        let status = budget_status(&txs, &budgets, 3, 2026).unwrap();
        assert_eq!(status.budget, 1000);
        assert_eq!(status.spent, 300);
        assert_eq!(status.state, BudgetState::Safe);
    }

    #[test]
    fn monthly_stats_group_by_category() {
        let txs = [
            tx(TransactionType::Expense, 100, date(2026, 3, 2), Some("food")),
            tx(TransactionType::Expense, 250, date(2026, 3, 9), Some("food")),
            tx(TransactionType::Income, 1_000, date(2026, 3, 1), Some("salary")),
            tx(TransactionType::Expense, 40, date(2026, 3, 3), None),
            tx(TransactionType::Expense, 999, date(2026, 2, 28), Some("food")),
        ];
        let stats = monthly_stats(&txs, 3, 2026).unwrap();
        assert_eq!(stats.income, 1_000);
        assert_eq!(stats.expense, 390);
        assert_eq!(stats.net, 610);
        assert_eq!(
            stats.by_category,
            vec![
                CategoryTotal {
                    category_id: Some("salary".to_string()),
                    kind: TransactionType::Income,
                    total: 1_000
                },
                CategoryTotal {
                    category_id: Some("food".to_string()),
                    kind: TransactionType::Expense,
                    total: 350
                },
                CategoryTotal {
                    category_id: None,
                    kind: TransactionType::Expense,
                    total: 40
                },
            ]
        );
    }

    #[test]
    fn position_gain_and_return() {
        let p = position(&investment(10.0, 1_000, 1_500)).unwrap();
        assert_eq!(p.current_value, 15_000);
        assert_eq!(p.gain, 5_000);
        assert_eq!(p.return_percentage, 50.0);
    }

    #[test]
    fn fractional_quantity_is_rounded() {
        let p = position(&investment(0.5, 1_001, 2_001)).unwrap();
        assert_eq!(p.current_value, 1_001);
        assert_eq!(p.gain, 500);
    }

    #[test]
    fn zero_basis_has_zero_return() {
        let p = position(&investment(2.0, 0, 0)).unwrap();
        assert_eq!(p.return_percentage, 0.0);
        assert_eq!(portfolio(&[]).unwrap().return_percentage, 0.0);
    }

    #[test]
    fn debt_summary_counts_unpaid_only() {
        let debts = [
            debt(DebtType::Receivable, 500, false),
            debt(DebtType::Receivable, 700, true),
            debt(DebtType::Payable, 200, false),
        ];
        assert_eq!(
            debt_summary(&debts).unwrap(),
            DebtSummary {
                total_receivable: 500,
                total_payable: 200,
                net: 300
            }
        );
    }

    #[test]
    fn net_worth_uses_active_rupiah_accounts() {
        let accounts = [
            account(1_000_000, Currency::Idr, true),
            account(50_000, Currency::Idr, false),
            account(10_000, Currency::Usd, true),
        ];
        let investments = [investment(10.0, 1_000, 1_500)];
        let debts = [
            debt(DebtType::Receivable, 500, false),
            debt(DebtType::Payable, 2_000, false),
        ];
        let worth = net_worth(&accounts, &investments, &debts).unwrap();
        assert_eq!(worth.accounts, 1_000_000);
        assert_eq!(worth.investments, 15_000);
        assert_eq!(worth.net_worth, 1_000_000 + 15_000 + 500 - 2_000);
    }

    #[test]
    fn monthly_equivalents() {
        assert_eq!(monthly_equivalent(12_000, Frequency::Daily).unwrap(), 365_000);
        assert_eq!(monthly_equivalent(12_000, Frequency::Weekly).unwrap(), 52_000);
        assert_eq!(monthly_equivalent(12_000, Frequency::Monthly).unwrap(), 12_000);
        assert_eq!(monthly_equivalent(12_000, Frequency::Yearly).unwrap(), 1_000);
        assert_eq!(monthly_equivalent(100, Frequency::Yearly).unwrap(), 8);
    }

    #[test]
    fn recurring_summary_skips_inactive() {
        let base = Recurring {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            category_id: None,
            kind: TransactionType::Income,
            amount: 10_000_000,
            description: None,
            frequency: Frequency::Monthly,
            start_date: date(2026, 1, 1),
            end_date: None,
            is_active: true,
            created_at: Utc::now(),
        };
        let rent = Recurring {
            kind: TransactionType::Expense,
            amount: 3_000_000,
            ..base.clone()
        };
        let paused = Recurring {
            kind: TransactionType::Expense,
            amount: 99,
            is_active: false,
            ..base.clone()
        };
        let summary = recurring_summary(&[base, rent, paused]).unwrap();
        assert_eq!(summary.monthly_income, 10_000_000);
        assert_eq!(summary.monthly_expense, 3_000_000);
        assert_eq!(summary.monthly_net, 7_000_000);
    }

    #[test]
    fn savings_progress_is_capped() {
        assert_eq!(savings_progress(250, 1_000), 25.0);
        assert_eq!(savings_progress(1_500, 1_000), 100.0);
        assert_eq!(savings_progress(10, 0), 0.0);
    }

    #[test]
    fn split_summary_tracks_allocation_and_payment() {
        let bill = split_bill(
            300_000,
            vec![
                participant("Ani", 100_000, true),
                participant("Budi", 100_000, false),
            ],
        );
        assert_eq!(
            split_summary(&bill).unwrap(),
            SplitSummary {
                allocated: 200_000,
                paid: 100_000,
                outstanding: 100_000,
                unallocated: 100_000
            }
        );
    }

    #[test]
    fn huge_spending_is_rejected_not_wrapped() {
        let txs = [
            tx(TransactionType::Expense, i64::MAX, date(2026, 3, 1), None),
            tx(TransactionType::Expense, i64::MAX, date(2026, 3, 2), None),
        ];
        assert!(rejected(budget_status(&txs, &[budget(1000, None)], 3, 2026)));
        assert!(rejected(monthly_stats(&txs, 3, 2026)));

        // each side fits, the difference does not
        let txs = [
            tx(TransactionType::Income, i64::MAX, date(2026, 3, 1), None),
            tx(TransactionType::Expense, i64::MAX, date(2026, 3, 2), Some("x")),
        ];
        let stats = monthly_stats(&txs, 3, 2026).unwrap();
        assert_eq!(stats.net, 0);
        let single = [tx(TransactionType::Expense, i64::MAX, date(2026, 3, 1), None)];
        assert!(rejected(budget_status(&single, &[budget(-2, None)], 3, 2026)));
    }

    #[test]
    fn huge_positions_are_rejected() {
        assert!(rejected(position(&investment(4.0, 1, i64::MAX))));
        let big = investment(1.0, 0, i64::MAX / 2 + 1);
        assert!(position(&big).is_ok());
        assert!(rejected(portfolio(&[big.clone(), big])));

        // the price difference alone does not fit in an i64
        let p = position(&investment(0.5, -(1 << 62), 1 << 62)).unwrap();
        assert_eq!(p.current_value, 1 << 61);
        assert_eq!(p.gain, 1 << 62);
    }

    #[test]
    fn huge_debts_are_rejected() {
        let receivables = [
            debt(DebtType::Receivable, i64::MAX, false),
            debt(DebtType::Receivable, 1, false),
        ];
        assert!(rejected(debt_summary(&receivables)));

        // a fully paid huge debt does not count
        let paid = [
            debt(DebtType::Payable, i64::MAX, true),
            debt(DebtType::Payable, i64::MAX, false),
        ];
        assert_eq!(debt_summary(&paid).unwrap().total_payable, i64::MAX);
    }

    #[test]
    fn huge_net_worth_is_rejected() {
        let accounts = [
            account(i64::MAX - 10, Currency::Idr, true),
            account(1_000, Currency::Idr, true),
        ];
        assert!(rejected(net_worth(&accounts, &[], &[])));

        let accounts = [account(i64::MAX - 10, Currency::Idr, true)];
        let debts = [debt(DebtType::Receivable, 1_000, false)];
        assert!(rejected(net_worth(&accounts, &[], &debts)));

        let accounts = [account(i64::MIN + 10, Currency::Idr, true)];
        let debts = [debt(DebtType::Payable, 1_000, false)];
        assert!(rejected(net_worth(&accounts, &[], &debts)));

        // inactive and foreign accounts never reach the sum
        let accounts = [
            account(i64::MAX, Currency::Idr, false),
            account(i64::MAX, Currency::Usd, true),
            account(5, Currency::Idr, true),
        ];
        assert_eq!(net_worth(&accounts, &[], &[]).unwrap().net_worth, 5);
    }

    #[test]
    fn huge_recurring_items_are_rejected() {
        assert!(rejected(monthly_equivalent(i64::MAX, Frequency::Daily)));
        let item = Recurring {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            category_id: None,
            kind: TransactionType::Expense,
            amount: i64::MAX / 2,
            description: None,
            frequency: Frequency::Weekly,
            start_date: date(2026, 1, 1),
            end_date: None,
            is_active: true,
            created_at: Utc::now(),
        };
        assert!(rejected(recurring_summary(&[item])));
    }

    #[test]
    fn huge_split_allocations_are_rejected() {
        let bill = split_bill(
            100,
            vec![
                participant("Ani", i64::MAX, true),
                participant("Budi", 1, true),
            ],
        );
        assert!(rejected(split_summary(&bill)));

        let bill = split_bill(i64::MIN + 1, vec![participant("Ani", 10, false)]);
        assert!(rejected(split_summary(&bill)));
    }
}
