//! Rotas HTTP de lançamentos PDC

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::receivable_dto::{
    ReceivableResponse, RecordPaymentRequest, TotalCollectedResponse,
};
use crate::dto::ApiResponse;
use crate::services::receivable_tracker::ReceivableTracker;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_receivable_router() -> Router<AppState> {
    Router::new()
        .route("/:id/pagamentos", get(list_receivables))
        .route("/:id/pagamentos/total", get(total_collected))
        .route("/:id/pagamentos/:item_id", put(record_payment))
}

async fn record_payment(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<ReceivableResponse>>, AppError> {
    let tracker = ReceivableTracker::new(state.pool.clone());
    let receivable = tracker.record_payment(id, item_id, request).await?;

    Ok(Json(ApiResponse::success_with_message(
        receivable.into(),
        "Pagamento registrado com sucesso".to_string(),
    )))
}

async fn list_receivables(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReceivableResponse>>, AppError> {
    let tracker = ReceivableTracker::new(state.pool.clone());
    let receivables = tracker.list(id).await?;

    Ok(Json(
        receivables.into_iter().map(ReceivableResponse::from).collect(),
    ))
}

async fn total_collected(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TotalCollectedResponse>, AppError> {
    let tracker = ReceivableTracker::new(state.pool.clone());
    let total = tracker.total_collected(id).await?;

    Ok(Json(TotalCollectedResponse::new(id, total)))
}
