//! Recurring transactions API endpoints.

use api_types::recurring::{
    RecurringListQuery, RecurringNew, RecurringSummaryView, RecurringUpdate, RecurringView,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, Patch, RecurringCmd, RecurringField};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_recurring(recurring: engine::Recurring) -> RecurringView {
    RecurringView {
        id: recurring.id,
        user_id: recurring.user_id,
        category_id: recurring.category_id,
        kind: recurring.kind,
        amount: recurring.amount,
        description: recurring.description,
        frequency: recurring.frequency,
        start_date: recurring.start_date,
        end_date: recurring.end_date,
        is_active: recurring.is_active,
        created_at: recurring.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<RecurringListQuery>,
) -> Result<Json<Vec<RecurringView>>, ServerError> {
    let items = state
        .engine
        .list_recurring(
            &user_id,
            query.active_only.unwrap_or(false),
            &ListOrder::new(query.sort, query.order),
        )
        .await?
        .into_iter()
        .map(map_recurring)
        .collect();
    Ok(Json(items))
}

/// Monthly equivalents of the active items.
pub async fn summary(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<RecurringSummaryView>, ServerError> {
    let summary = state.engine.recurring_summary(&user_id).await?;
    Ok(Json(RecurringSummaryView {
        monthly_income: summary.monthly_income,
        monthly_expense: summary.monthly_expense,
        monthly_net: summary.monthly_net,
    }))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(recurring_id): Path<String>,
) -> Result<Json<RecurringView>, ServerError> {
    let recurring = state.engine.recurring(&user_id, &recurring_id).await?;
    Ok(Json(map_recurring(recurring)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<RecurringNew>,
) -> Result<(StatusCode, Json<RecurringView>), ServerError> {
    let cmd = RecurringCmd::new(user_id, payload.kind, payload.amount, payload.frequency)
        .start_date(payload.start_date)
        .end_date(payload.end_date)
        .category_id(payload.category_id)
        .description(payload.description);
    let recurring = state.engine.create_recurring(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_recurring(recurring))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(recurring_id): Path<String>,
    ApiJson(payload): ApiJson<RecurringUpdate>,
) -> Result<Json<RecurringView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.kind.map(RecurringField::Kind))
        .maybe(payload.amount.map(RecurringField::Amount))
        .maybe(payload.frequency.map(RecurringField::Frequency))
        .maybe(payload.start_date.map(RecurringField::StartDate))
        .maybe(payload.end_date.map(RecurringField::EndDate))
        .maybe(payload.category_id.map(RecurringField::CategoryId))
        .maybe(payload.description.map(RecurringField::Description))
        .maybe(payload.is_active.map(RecurringField::IsActive));
    let recurring = state
        .engine
        .update_recurring(&user_id, &recurring_id, patch)
        .await?;
    Ok(Json(map_recurring(recurring)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(recurring_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_recurring(&user_id, &recurring_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
