use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, ListOrder, Patch, ResultEngine, SortOrder, Tag, TagCmd, TagField, palette,
    tags::{self, name_key},
    util::{new_id, normalize_optional_text, normalize_required_name},
};

use super::{
    Engine,
    access::{delete_owned, require_owned},
    with_tx,
};

/// Tag names are unique per user regardless of case. `except` skips the tag
/// being renamed.
async fn ensure_unique_name<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    name: &str,
    except: Option<&str>,
) -> ResultEngine<()> {
    let key = name_key(name);
    let taken = tags::Entity::find()
        .filter(tags::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .any(|tag| Some(tag.id.as_str()) != except && name_key(&tag.name) == key);
    if taken {
        return Err(EngineError::ExistingKey(format!("tag '{}'", name.trim())));
    }
    Ok(())
}

impl Engine {
    pub async fn create_tag(&self, cmd: TagCmd) -> ResultEngine<Tag> {
        let name = normalize_required_name(&cmd.name, "tag")?;
        let color = normalize_optional_text(cmd.color.as_deref())
            .unwrap_or_else(|| palette::first_color().to_string());

        with_tx!(self, |db_tx| {
            ensure_unique_name(&db_tx, &cmd.user_id, &name, None).await?;
            let model = tags::ActiveModel {
                id: ActiveValue::Set(new_id()),
                user_id: ActiveValue::Set(cmd.user_id.clone()),
                name: ActiveValue::Set(name.clone()),
                color: ActiveValue::Set(color.clone()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            Ok(Tag::from(model))
        })
    }

    pub async fn tag(&self, user_id: &str, tag_id: &str) -> ResultEngine<Tag> {
        let model = require_owned::<tags::Entity, _>(&self.database, tag_id, user_id).await?;
        Ok(Tag::from(model))
    }

    pub async fn list_tags(&self, user_id: &str, order: &ListOrder) -> ResultEngine<Vec<Tag>> {
        let (column, direction) =
            tags::FIELDS.order_by(order, (tags::Column::Name, SortOrder::Asc))?;
        Ok(tags::Entity::find()
            .filter(tags::Column::UserId.eq(user_id))
            .order_by(column, direction)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Tag::from)
            .collect())
    }

    pub async fn update_tag(
        &self,
        user_id: &str,
        tag_id: &str,
        patch: Patch<TagField>,
    ) -> ResultEngine<Tag> {
        with_tx!(self, |db_tx| {
            let model = require_owned::<tags::Entity, _>(&db_tx, tag_id, user_id).await?;
            for field in patch.fields() {
                if let TagField::Name(name) = field {
                    ensure_unique_name(&db_tx, user_id, name, Some(tag_id)).await?;
                }
            }
            let mut active: tags::ActiveModel = model.into();
            patch.clone().apply_to(&mut active)?;
            let model = active.update(&db_tx).await?;
            Ok(Tag::from(model))
        })
    }

    pub async fn delete_tag(&self, user_id: &str, tag_id: &str) -> ResultEngine<()> {
        delete_owned::<tags::Entity, _>(&self.database, tag_id, user_id).await
    }
}
