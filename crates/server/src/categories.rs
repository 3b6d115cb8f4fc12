//! Categories API endpoints.

use api_types::{
    OwnerQuery,
    category::{CategoryListQuery, CategoryNew, CategoryUpdate, CategoryView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{CategoryCmd, CategoryField, ListOrder, Patch};

use crate::{
    ApiJson, ApiQuery, ServerError, claimed_user, listed_owner, server::ServerState,
};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        user_id: category.user_id,
        name: category.name,
        kind: category.kind,
        color: category.color,
        icon: category.icon,
        created_at: category.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<CategoryListQuery>,
) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let Some(user_id) = listed_owner(query.user_id) else {
        return Ok(Json(Vec::new()));
    };
    let categories = state
        .engine
        .list_categories(&user_id, query.kind, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(categories))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<Json<CategoryView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let category = state.engine.category(&user_id, &category_id).await?;
    Ok(Json(map_category(category)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let user_id = claimed_user(payload.user_id)?;
    let cmd = CategoryCmd::new(user_id, payload.name, payload.kind)
        .color(payload.color)
        .icon(payload.icon);
    let category = state.engine.create_category(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
    ApiJson(payload): ApiJson<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let patch = Patch::new()
        .maybe(payload.name.map(CategoryField::Name))
        .maybe(payload.kind.map(CategoryField::Kind))
        .maybe(payload.color.map(CategoryField::Color))
        .maybe(payload.icon.map(CategoryField::Icon));
    let category = state
        .engine
        .update_category(&user_id, &category_id, patch)
        .await?;
    Ok(Json(map_category(category)))
}

/// Transactions, budgets and recurring items keep existing without the
/// category.
pub async fn delete(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<StatusCode, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    state.engine.delete_category(&user_id, &category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
