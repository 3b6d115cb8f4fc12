//! Profile of the calling user.

use api_types::user::{ProfileUpdate, ProfileView};
use axum::{Extension, Json, extract::State};
use engine::ProfileChanges;

use crate::{
    ApiJson, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_profile(profile: engine::Profile) -> ProfileView {
    ProfileView {
        id: profile.id,
        name: profile.name,
        email: profile.email,
        currency: profile.currency,
        created_at: profile.created_at,
    }
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<ProfileView>, ServerError> {
    let profile = state.engine.profile(&user_id).await?;
    Ok(Json(map_profile(profile)))
}

/// Creates the profile on first save.
pub async fn save(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ProfileUpdate>,
) -> Result<Json<ProfileView>, ServerError> {
    let changes = ProfileChanges {
        name: payload.name,
        email: payload.email,
        currency: payload.currency,
    };
    let profile = state.engine.save_profile(&user_id, changes).await?;
    Ok(Json(map_profile(profile)))
}
