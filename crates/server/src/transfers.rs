//! Account transfer endpoints.

use api_types::transfer::{TransferListQuery, TransferNew, TransferView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, TransferCmd};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_transfer(transfer: engine::Transfer) -> TransferView {
    TransferView {
        id: transfer.id,
        user_id: transfer.user_id,
        from_account_id: transfer.from_account_id,
        to_account_id: transfer.to_account_id,
        amount: transfer.amount,
        description: transfer.description,
        date: transfer.date,
        created_at: transfer.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<TransferListQuery>,
) -> Result<Json<Vec<TransferView>>, ServerError> {
    let transfers = state
        .engine
        .list_transfers(
            &user_id,
            query.account_id.as_deref(),
            &ListOrder::new(query.sort, query.order),
        )
        .await?
        .into_iter()
        .map(map_transfer)
        .collect();
    Ok(Json(transfers))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(transfer_id): Path<String>,
) -> Result<Json<TransferView>, ServerError> {
    let transfer = state.engine.transfer(&user_id, &transfer_id).await?;
    Ok(Json(map_transfer(transfer)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<TransferNew>,
) -> Result<(StatusCode, Json<TransferView>), ServerError> {
    let cmd = TransferCmd::new(
        user_id,
        payload.from_account_id,
        payload.to_account_id,
        payload.amount,
    )
    .description(payload.description)
    .date(payload.date);
    let transfer = state.engine.create_transfer(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_transfer(transfer))))
}

/// Reverses the transfer before removing it.
pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(transfer_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transfer(&user_id, &transfer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
