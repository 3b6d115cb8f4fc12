//! Split bills API endpoints.

use api_types::{
    SortQuery,
    split_bill::{
        ParticipantPayment, ParticipantView, SplitBillNew, SplitBillUpdate, SplitBillView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ListOrder, ParticipantCmd, Patch, SplitBillCmd, SplitBillField, reports};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_split_bill(bill: engine::SplitBill) -> Result<SplitBillView, ServerError> {
    let summary = reports::split_summary(&bill)?;
    Ok(SplitBillView {
        id: bill.id,
        user_id: bill.user_id,
        title: bill.title,
        total_amount: bill.total_amount,
        date: bill.date,
        description: bill.description,
        created_at: bill.created_at,
        participants: bill
            .participants
            .into_iter()
            .map(|participant| ParticipantView {
                id: participant.id,
                split_bill_id: participant.split_bill_id,
                name: participant.name,
                amount: participant.amount,
                is_paid: participant.is_paid,
                paid_date: participant.paid_date,
            })
            .collect(),
        allocated_amount: summary.allocated,
        unallocated_amount: summary.unallocated,
        paid_amount: summary.paid,
        outstanding_amount: summary.outstanding,
    })
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Result<Json<Vec<SplitBillView>>, ServerError> {
    let bills = state
        .engine
        .list_split_bills(&user_id, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_split_bill)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(bills))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(bill_id): Path<String>,
) -> Result<Json<SplitBillView>, ServerError> {
    let bill = state.engine.split_bill(&user_id, &bill_id).await?;
    Ok(Json(map_split_bill(bill)?))
}

/// With `splitEvenly` the total is divided across the participants and
/// any amounts they carry are ignored.
pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<SplitBillNew>,
) -> Result<(StatusCode, Json<SplitBillView>), ServerError> {
    let mut cmd = SplitBillCmd::new(user_id, payload.title, payload.total_amount)
        .date(payload.date)
        .description(payload.description)
        .split_evenly(payload.split_evenly);
    for participant in payload.participants {
        cmd = cmd.participant(ParticipantCmd::new(participant.name, participant.amount));
    }
    let bill = state.engine.create_split_bill(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_split_bill(bill)?)))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(bill_id): Path<String>,
    ApiJson(payload): ApiJson<SplitBillUpdate>,
) -> Result<Json<SplitBillView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.title.map(SplitBillField::Title))
        .maybe(payload.total_amount.map(SplitBillField::TotalAmount))
        .maybe(payload.date.map(SplitBillField::Date))
        .maybe(payload.description.map(SplitBillField::Description));
    let bill = state
        .engine
        .update_split_bill(&user_id, &bill_id, patch)
        .await?;
    Ok(Json(map_split_bill(bill)?))
}

pub async fn set_paid(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path((bill_id, participant_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<ParticipantPayment>,
) -> Result<Json<SplitBillView>, ServerError> {
    let bill = state
        .engine
        .set_participant_paid(&user_id, &bill_id, &participant_id, payload.is_paid)
        .await?;
    Ok(Json(map_split_bill(bill)?))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(bill_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_split_bill(&user_id, &bill_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
