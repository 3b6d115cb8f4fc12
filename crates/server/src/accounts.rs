//! Accounts API endpoints.

use api_types::account::{AccountListQuery, AccountNew, AccountUpdate, AccountView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{AccountCmd, AccountField, ListOrder, Patch};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_account(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        user_id: account.user_id,
        name: account.name,
        kind: account.kind,
        balance: account.balance,
        currency: account.currency,
        color: account.color,
        icon: account.icon,
        is_active: account.is_active,
        created_at: account.created_at,
        updated_at: account.updated_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<AccountListQuery>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state
        .engine
        .list_accounts(
            &user_id,
            query.include_inactive.unwrap_or(false),
            &ListOrder::new(query.sort, query.order),
        )
        .await?
        .into_iter()
        .map(map_account)
        .collect();
    Ok(Json(accounts))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(account_id): Path<String>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state.engine.account(&user_id, &account_id).await?;
    Ok(Json(map_account(account)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let mut cmd = AccountCmd::new(user_id, payload.name, payload.kind)
        .balance(payload.balance.unwrap_or(0))
        .color(payload.color)
        .icon(payload.icon);
    if let Some(currency) = payload.currency {
        cmd = cmd.currency(currency);
    }
    let account = state.engine.create_account(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_account(account))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(account_id): Path<String>,
    ApiJson(payload): ApiJson<AccountUpdate>,
) -> Result<Json<AccountView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.name.map(AccountField::Name))
        .maybe(payload.kind.map(AccountField::Kind))
        .maybe(payload.balance.map(AccountField::Balance))
        .maybe(payload.currency.map(AccountField::Currency))
        .maybe(payload.color.map(AccountField::Color))
        .maybe(payload.icon.map(AccountField::Icon))
        .maybe(payload.is_active.map(AccountField::IsActive));
    let account = state
        .engine
        .update_account(&user_id, &account_id, patch)
        .await?;
    Ok(Json(map_account(account)))
}

/// Soft delete: the account stays readable but is hidden from lists.
pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(account_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .deactivate_account(&user_id, &account_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
