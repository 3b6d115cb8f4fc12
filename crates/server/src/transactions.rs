//! Transactions API endpoints.
//!
//! The owner is claimed by the caller: `userId` in the body on create and in
//! the query string everywhere else.

use api_types::{
    OwnerQuery,
    transaction::{TransactionListQuery, TransactionNew, TransactionUpdate, TransactionView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, Patch, TransactionCmd, TransactionField, TransactionFilter};

use crate::{
    ApiJson, ApiQuery, ServerError, claimed_user, listed_owner, server::ServerState,
};

fn map_transaction(transaction: engine::Transaction) -> TransactionView {
    TransactionView {
        id: transaction.id,
        user_id: transaction.user_id,
        category_id: transaction.category_id,
        kind: transaction.kind,
        amount: transaction.amount,
        description: transaction.description,
        date: transaction.date,
        created_at: transaction.created_at,
    }
}

/// Without a non-blank `userId` the list is empty.
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<TransactionListQuery>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let Some(user_id) = listed_owner(query.user_id) else {
        return Ok(Json(Vec::new()));
    };
    let filter = TransactionFilter {
        month: query.month,
        year: query.year,
        kind: query.kind,
        category_id: query.category_id,
    };
    let transactions = state
        .engine
        .list_transactions(&user_id, &filter, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();
    Ok(Json(transactions))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(transaction_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<Json<TransactionView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let transaction = state.engine.transaction(&user_id, &transaction_id).await?;
    Ok(Json(map_transaction(transaction)))
}

pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let user_id = claimed_user(payload.user_id)?;
    let cmd = TransactionCmd::new(user_id, payload.kind, payload.amount)
        .category_id(payload.category_id)
        .description(payload.description)
        .date(payload.date);
    let transaction = state.engine.create_transaction(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_transaction(transaction))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(transaction_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
    ApiJson(payload): ApiJson<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    let patch = Patch::new()
        .maybe(payload.kind.map(TransactionField::Kind))
        .maybe(payload.amount.map(TransactionField::Amount))
        .maybe(payload.category_id.map(TransactionField::CategoryId))
        .maybe(payload.description.map(TransactionField::Description))
        .maybe(payload.date.map(TransactionField::Date));
    let transaction = state
        .engine
        .update_transaction(&user_id, &transaction_id, patch)
        .await?;
    Ok(Json(map_transaction(transaction)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(transaction_id): Path<String>,
    ApiQuery(query): ApiQuery<OwnerQuery>,
) -> Result<StatusCode, ServerError> {
    let user_id = claimed_user(query.user_id)?;
    state
        .engine
        .delete_transaction(&user_id, &transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
