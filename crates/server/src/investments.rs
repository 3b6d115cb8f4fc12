//! Investments API endpoints.

use api_types::{
    SortQuery,
    investment::{InvestmentNew, InvestmentUpdate, InvestmentView, PortfolioView, PositionView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{InvestmentCmd, InvestmentField, ListOrder, Patch};

use crate::{
    ApiJson, ApiQuery, ServerError,
    server::{CurrentUser, ServerState},
};

fn map_investment(investment: engine::Investment) -> InvestmentView {
    InvestmentView {
        id: investment.id,
        user_id: investment.user_id,
        name: investment.name,
        kind: investment.kind,
        quantity: investment.quantity,
        buy_price: investment.buy_price,
        current_price: investment.current_price,
        buy_date: investment.buy_date,
        notes: investment.notes,
        created_at: investment.created_at,
    }
}

pub async fn list(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Result<Json<Vec<InvestmentView>>, ServerError> {
    let investments = state
        .engine
        .list_investments(&user_id, &ListOrder::new(query.sort, query.order))
        .await?
        .into_iter()
        .map(map_investment)
        .collect();
    Ok(Json(investments))
}

/// Value and gain of every position plus portfolio totals.
pub async fn summary(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
) -> Result<Json<PortfolioView>, ServerError> {
    let portfolio = state.engine.portfolio(&user_id).await?;
    Ok(Json(PortfolioView {
        positions: portfolio
            .positions
            .into_iter()
            .map(|position| PositionView {
                id: position.id,
                name: position.name,
                current_value: position.current_value,
                gain: position.gain,
                return_percentage: position.return_percentage,
            })
            .collect(),
        total_value: portfolio.total_value,
        total_gain: portfolio.total_gain,
        return_percentage: portfolio.return_percentage,
    }))
}

pub async fn get(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(investment_id): Path<String>,
) -> Result<Json<InvestmentView>, ServerError> {
    let investment = state.engine.investment(&user_id, &investment_id).await?;
    Ok(Json(map_investment(investment)))
}

pub async fn create(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<InvestmentNew>,
) -> Result<(StatusCode, Json<InvestmentView>), ServerError> {
    let cmd = InvestmentCmd::new(
        user_id,
        payload.name,
        payload.kind,
        payload.quantity,
        payload.buy_price,
    )
    .current_price(payload.current_price)
    .buy_date(payload.buy_date)
    .notes(payload.notes);
    let investment = state.engine.create_investment(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_investment(investment))))
}

pub async fn update(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(investment_id): Path<String>,
    ApiJson(payload): ApiJson<InvestmentUpdate>,
) -> Result<Json<InvestmentView>, ServerError> {
    let patch = Patch::new()
        .maybe(payload.name.map(InvestmentField::Name))
        .maybe(payload.kind.map(InvestmentField::Kind))
        .maybe(payload.quantity.map(InvestmentField::Quantity))
        .maybe(payload.buy_price.map(InvestmentField::BuyPrice))
        .maybe(payload.current_price.map(InvestmentField::CurrentPrice))
        .maybe(payload.buy_date.map(InvestmentField::BuyDate))
        .maybe(payload.notes.map(InvestmentField::Notes));
    let investment = state
        .engine
        .update_investment(&user_id, &investment_id, patch)
        .await?;
    Ok(Json(map_investment(investment)))
}

pub async fn delete(
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Path(investment_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_investment(&user_id, &investment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
