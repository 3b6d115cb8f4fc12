//! Savings goals API endpoints.

use api_types::{
    SortQuery,
    savings_goal::{Contribution, SavingsGoalNew, SavingsGoalUpdate, SavingsGoalView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, Patch, SavingsGoalCmd, SavingsGoalField};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_goal(goal: engine::SavingsGoal) -> SavingsGoalView {
    let progress = goal.progress();
    SavingsGoalView {
        id: goal.id,
        user_id: goal.user_id,
        name: goal.name,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        deadline: goal.deadline,
        color: goal.color,
        icon: goal.icon,
        is_completed: goal.is_completed,
        progress,
        created_at: goal.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Result<Json<Vec<SavingsGoalView>>, ServerError> {
    let goals = state
        .engine
        .list_savings_goals(&user_id, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_goal)
        .collect();
    Ok(Json(goals))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(goal_id): Path<String>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let goal = state.engine.savings_goal(&user_id, &goal_id).await?;
    Ok(Json(map_goal(goal)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<SavingsGoalNew>,
) -> Result<(StatusCode, Json<SavingsGoalView>), ServerError> {
    let cmd = SavingsGoalCmd::new(user_id, payload.name, payload.target_amount)
        .current_amount(payload.current_amount.unwrap_or(0))
        .deadline(payload.deadline)
        .color(payload.color)
        .icon(payload.icon);
    let goal = state.engine.create_savings_goal(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_goal(goal))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(goal_id): Path<String>,
    ApiJson(payload): ApiJson<SavingsGoalUpdate>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.name.map(SavingsGoalField::Name))
        .maybe(payload.target_amount.map(SavingsGoalField::TargetAmount))
        .maybe(payload.current_amount.map(SavingsGoalField::CurrentAmount))
        .maybe(payload.deadline.map(SavingsGoalField::Deadline))
        .maybe(payload.color.map(SavingsGoalField::Color))
        .maybe(payload.icon.map(SavingsGoalField::Icon));
    let goal = state
        .engine
        .update_savings_goal(&user_id, &goal_id, patch)
        .await?;
    Ok(Json(map_goal(goal)))
}

/// Adds to the saved amount; reaching the target completes the goal.
pub async fn contribute(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(goal_id): Path<String>,
    ApiJson(payload): ApiJson<Contribution>,
) -> Result<Json<SavingsGoalView>, ServerError> {
    let goal = state
        .engine
        .contribute_to_goal(&user_id, &goal_id, payload.amount)
        .await?;
    Ok(Json(map_goal(goal)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(goal_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_savings_goal(&user_id, &goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
