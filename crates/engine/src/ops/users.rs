use chrono::Utc;
use sea_orm::{ActiveValue, prelude::*};

use crate::{
    EngineError, Profile, ProfileChanges, ResultEngine, users,
    util::normalize_optional_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// The stored profile of `user_id`.
    pub async fn profile(&self, user_id: &str) -> ResultEngine<Profile> {
        let model = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
        Profile::try_from(model)
    }

    /// Create the profile on first save, otherwise change only the supplied
    /// fields.
    pub async fn save_profile(
        &self,
        user_id: &str,
        changes: ProfileChanges,
    ) -> ResultEngine<Profile> {
        let name = changes.name.as_deref().map(|name| normalize_optional_text(Some(name)));
        let email = changes
            .email
            .as_deref()
            .map(|email| normalize_optional_text(Some(email)));

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find_by_id(user_id).one(&db_tx).await?;
            let model = match existing {
                Some(model) if changes == ProfileChanges::default() => model,
                Some(model) => {
                    let mut active: users::ActiveModel = model.into();
                    if let Some(name) = name.clone() {
                        active.name = ActiveValue::Set(name);
                    }
                    if let Some(email) = email.clone() {
                        active.email = ActiveValue::Set(email);
                    }
                    if let Some(currency) = changes.currency {
                        active.currency = ActiveValue::Set(currency.as_str().to_string());
                    }
                    active.update(&db_tx).await?
                }
                None => {
                    tracing::info!(user_id, "creating profile");
                    users::ActiveModel {
                        id: ActiveValue::Set(user_id.to_string()),
                        name: ActiveValue::Set(name.clone().flatten()),
                        email: ActiveValue::Set(email.clone().flatten()),
                        currency: ActiveValue::Set(
                            changes.currency.unwrap_or_default().as_str().to_string(),
                        ),
                        created_at: ActiveValue::Set(Utc::now()),
                    }
                    .insert(&db_tx)
                    .await?
                }
            };
            Profile::try_from(model)
        })
    }
}
