//! Debts API endpoints.

use api_types::debt::{DebtListQuery, DebtNew, DebtSummaryView, DebtUpdate, DebtView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{DebtCmd, DebtField, DebtFilter, ListOrder, Patch};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_debt(debt: engine::Debt) -> DebtView {
    DebtView {
        id: debt.id,
        user_id: debt.user_id,
        kind: debt.kind,
        person_name: debt.person_name,
        amount: debt.amount,
        description: debt.description,
        due_date: debt.due_date,
        is_paid: debt.is_paid,
        paid_date: debt.paid_date,
        created_at: debt.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<DebtListQuery>,
) -> Result<Json<Vec<DebtView>>, ServerError> {
    let filter = DebtFilter {
        kind: query.kind,
        is_paid: query.is_paid,
    };
    let debts = state
        .engine
        .list_debts(&user_id, &filter, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_debt)
        .collect();
    Ok(Json(debts))
}

pub async fn summary(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<DebtSummaryView>, ServerError> {
    let summary = state.engine.debt_summary(&user_id).await?;
    Ok(Json(DebtSummaryView {
        total_receivable: summary.total_receivable,
        total_payable: summary.total_payable,
        net: summary.net,
    }))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(debt_id): Path<String>,
) -> Result<Json<DebtView>, ServerError> {
    let debt = state.engine.debt(&user_id, &debt_id).await?;
    Ok(Json(map_debt(debt)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DebtNew>,
) -> Result<(StatusCode, Json<DebtView>), ServerError> {
    let cmd = DebtCmd::new(user_id, payload.kind, payload.person_name, payload.amount)
        .description(payload.description)
        .due_date(payload.due_date);
    let debt = state.engine.create_debt(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_debt(debt))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(debt_id): Path<String>,
    ApiJson(payload): ApiJson<DebtUpdate>,
) -> Result<Json<DebtView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.kind.map(DebtField::Kind))
        .maybe(payload.person_name.map(DebtField::PersonName))
        .maybe(payload.amount.map(DebtField::Amount))
        .maybe(payload.description.map(DebtField::Description))
        .maybe(payload.due_date.map(DebtField::DueDate));
    let debt = state.engine.update_debt(&user_id, &debt_id, patch).await?;
    Ok(Json(map_debt(debt)))
}

/// Paying twice is a conflict.
pub async fn pay(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(debt_id): Path<String>,
) -> Result<Json<DebtView>, ServerError> {
    let debt = state.engine.pay_debt(&user_id, &debt_id).await?;
    Ok(Json(map_debt(debt)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(debt_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_debt(&user_id, &debt_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
