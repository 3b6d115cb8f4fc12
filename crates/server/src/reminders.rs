//! Reminders API endpoints.

use api_types::reminder::{ReminderListQuery, ReminderNew, ReminderUpdate, ReminderView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, Patch, ReminderCmd, ReminderField};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_reminder(reminder: engine::Reminder) -> ReminderView {
    ReminderView {
        id: reminder.id,
        user_id: reminder.user_id,
        title: reminder.title,
        description: reminder.description,
        amount: reminder.amount,
        due_date: reminder.due_date,
        is_completed: reminder.is_completed,
        created_at: reminder.created_at,
    }
}

/// `upcoming=N` keeps incomplete reminders due within the next N days.
pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<ReminderListQuery>,
) -> Result<Json<Vec<ReminderView>>, ServerError> {
    let reminders = state
        .engine
        .list_reminders(
            &user_id,
            query.upcoming,
            &ListOrder::new(query.sort, query.order),
        )
        .await?
        .into_iter()
        .map(map_reminder)
        .collect();
    Ok(Json(reminders))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(reminder_id): Path<String>,
) -> Result<Json<ReminderView>, ServerError> {
    let reminder = state.engine.reminder(&user_id, &reminder_id).await?;
    Ok(Json(map_reminder(reminder)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ReminderNew>,
) -> Result<(StatusCode, Json<ReminderView>), ServerError> {
    let cmd = ReminderCmd::new(user_id, payload.title, payload.due_date)
        .description(payload.description)
        .amount(payload.amount);
    let reminder = state.engine.create_reminder(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_reminder(reminder))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(reminder_id): Path<String>,
    ApiJson(payload): ApiJson<ReminderUpdate>,
) -> Result<Json<ReminderView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.title.map(ReminderField::Title))
        .maybe(payload.description.map(ReminderField::Description))
        .maybe(payload.amount.map(ReminderField::Amount))
        .maybe(payload.due_date.map(ReminderField::DueDate))
        .maybe(payload.is_completed.map(ReminderField::IsCompleted));
    let reminder = state
        .engine
        .update_reminder(&user_id, &reminder_id, patch)
        .await?;
    Ok(Json(map_reminder(reminder)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(reminder_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_reminder(&user_id, &reminder_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
