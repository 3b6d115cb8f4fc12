//! Budgets API endpoints.

use api_types::{
    OwnerQuery,
    budget::{BudgetListQuery, BudgetNew, BudgetStatusView, BudgetUpdate, BudgetView},
    report::PeriodQuery,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{BudgetCmd, BudgetField, BudgetFilter, ListOrder, Patch, reports::BudgetStatus};

use crate::{
    ApiJson, ApiQuery, ServerError, claimed_user, listed_owner, server::ServerState,
};

fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        user_id: budget.user_id,
        category_id: budget.category_id,
        amount: budget.amount,
        month: budget.month,
        year: budget.year,
        created_at: budget.created_at,
    }
}

pub(crate) fn map_budget_status(status: BudgetStatus) -> BudgetStatusView {
    BudgetStatusView {
        month: status.month,
        year: status.year,
        budget: status.budget,
        spent: status.spent,
        remaining: status.remaining,
        percentage: status.percentage,
        state: status.state,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<BudgetListQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let Some(user_id) = listed_owner(query.user_id) else {
        return Ok(Json(Vec::new()));
    };
    let filter = BudgetFilter {
        month: query.month,
        year: query.year,
    };
    let budgets = state
        .engine
        .list_budgets(&user_id, &filter, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_budget)
        .collect();
    Ok(Json(budgets))
}

/// Status of the whole-month budget; defaults to the current month.
pub async fn status(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<PeriodQuery>,
) -> Result<Json<BudgetStatusView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let status = state
        .engine
        .budget_status(&user_id, query.month, query.year)
        .await?;
    Ok(Json(map_budget_status(status)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<Json<BudgetView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let budget = state.engine.budget(&user_id, &budget_id).await?;
    Ok(Json(map_budget(budget)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<BudgetNew>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let user_id = claimed_user(payload.user_id)?;
    let cmd = BudgetCmd::new(user_id, payload.amount, payload.month, payload.year)
        .category_id(payload.category_id);
    let budget = state.engine.create_budget(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_budget(budget))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
    ApiJson(payload): ApiJson<BudgetUpdate>,
) -> Result<Json<BudgetView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let patch = Patch::new()
        .maybe(payload.amount.map(BudgetField::Amount))
        .maybe(payload.month.map(BudgetField::Month))
        .maybe(payload.year.map(BudgetField::Year))
        .maybe(payload.category_id.map(BudgetField::CategoryId));
    let budget = state
        .engine
        .update_budget(&user_id, &budget_id, patch)
        .await?;
    Ok(Json(map_budget(budget)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(budget_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<StatusCode, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    state.engine.delete_budget(&user_id, &budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
