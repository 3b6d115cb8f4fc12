//! Report endpoints: monthly statistics and net worth.

use api_types::report::{CategoryTotalView, MonthlyReportView, NetWorthView, PeriodQuery};
use axum::{Extension, Json, extract::State};

use crate::{
    ApiQuery, ServerError,
    budgets::map_budget_status,
    server::{CurrentUser, ServerState},
};

/// Income, expense and per-category totals for one month, with the
/// month's budget status. Missing month or year default to today.
pub async fn monthly(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<Json<MonthlyReportView>, ServerError> {
    let report = state
        .engine
        .monthly_report(&user_id, query.month, query.year)
        .await?;
    let stats = report.stats;
    Ok(Json(MonthlyReportView {
        month: stats.month,
        year: stats.year,
        income: stats.income,
        expense: stats.expense,
        net: stats.net,
        by_category: stats
            .by_category
            .into_iter()
            .map(|total| CategoryTotalView {
                category_id: total.category_id,
                kind: total.kind,
                total: total.total,
            })
            .collect(),
        budget: map_budget_status(report.budget),
    }))
}

pub async fn net_worth(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<NetWorthView>, ServerError> {
    let worth = state.engine.net_worth(&user_id).await?;
    Ok(Json(NetWorthView {
        accounts: worth.accounts,
        investments: worth.investments,
        receivables: worth.receivables,
        payables: worth.payables,
        net_worth: worth.net_worth,
    }))
}
