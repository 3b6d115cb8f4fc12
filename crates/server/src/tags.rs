//! Tags API endpoints.

use api_types::{
    SortQuery,
    tag::{TagNew, TagUpdate, TagView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, Patch, TagCmd, TagField};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_tag(tag: engine::Tag) -> TagView {
    TagView {
        id: tag.id,
        user_id: tag.user_id,
        name: tag.name,
        color: tag.color,
        created_at: tag.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Result<Json<Vec<TagView>>, ServerError> {
    let tags = state
        .engine
        .list_tags(&user_id, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_tag)
        .collect();
    Ok(Json(tags))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(tag_id): Path<String>,
) -> Result<Json<TagView>, ServerError> {
    let tag = state.engine.tag(&user_id, &tag_id).await?;
    Ok(Json(map_tag(tag)))
}

/// Names are unique per user regardless of case.
pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<TagNew>,
) -> Result<(StatusCode, Json<TagView>), ServerError> {
    let cmd = TagCmd::new(user_id, payload.name).color(payload.color);
    let tag = state.engine.create_tag(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_tag(tag))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(tag_id): Path<String>,
    ApiJson(payload): ApiJson<TagUpdate>,
) -> Result<Json<TagView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.name.map(TagField::Name))
        .maybe(payload.color.map(TagField::Color));
    let tag = state.engine.update_tag(&user_id, &tag_id, patch).await?;
    Ok(Json(map_tag(tag)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(tag_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_tag(&user_id, &tag_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
