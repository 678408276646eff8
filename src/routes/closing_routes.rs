//! Rotas HTTP do fechamento financeiro

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::closing_dto::{
    CloseRouteRequest, ClosingResponse, DenominationResponse, ExpenseRequest, ExpenseResponse,
};
use crate::dto::ApiResponse;
use crate::services::closing_calculator::ClosingCalculator;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_closing_router() -> Router<AppState> {
    Router::new()
        .route("/:id/fechamento", post(close_route))
        .route("/:id/fechamento", get(get_closing))
        .route("/:id/fechamento/cedulas", get(list_denominations))
        .route("/:id/despesas", post(add_expense))
        .route("/:id/despesas", get(list_expenses))
}

async fn close_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseRouteRequest>,
) -> Result<Json<ApiResponse<ClosingResponse>>, AppError> {
    let calculator = ClosingCalculator::new(state.pool.clone(), state.config.clone());
    let closing = calculator.close(id, request).await?;

    Ok(Json(ApiResponse::success_with_message(
        closing.into(),
        "Fechamento registrado com sucesso".to_string(),
    )))
}

async fn get_closing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClosingResponse>, AppError> {
    let calculator = ClosingCalculator::new(state.pool.clone(), state.config.clone());
    let closing = calculator.get(id).await?;

    Ok(Json(closing.into()))
}

async fn list_denominations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DenominationResponse>>, AppError> {
    let calculator = ClosingCalculator::new(state.pool.clone(), state.config.clone());
    let denominations = calculator.list_denominations(id).await?;

    Ok(Json(
        denominations
            .into_iter()
            .map(DenominationResponse::from)
            .collect(),
    ))
}

async fn add_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, AppError> {
    let calculator = ClosingCalculator::new(state.pool.clone(), state.config.clone());
    let expense = calculator.add_expense(id, request).await?;

    Ok(Json(ApiResponse::success_with_message(
        expense.into(),
        "Despesa registrada com sucesso".to_string(),
    )))
}

async fn list_expenses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let calculator = ClosingCalculator::new(state.pool.clone(), state.config.clone());
    let expenses = calculator.list_expenses(id).await?;

    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}
