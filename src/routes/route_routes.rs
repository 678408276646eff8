//! Rotas HTTP de programação e alocação de itens

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::route_dto::{
    AllocateItemRequest, CreateRouteRequest, RouteItemResponse, RouteResponse, TransitionRequest,
};
use crate::dto::ApiResponse;
use crate::repositories::route_repository::RouteRepository;
use crate::services::item_allocator::ItemAllocator;
use crate::services::route_lifecycle::RouteLifecycle;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route))
        .route("/", get(list_routes))
        .route("/:id", get(get_route))
        .route("/:id/status", post(transition_route))
        .route("/:id/itens", post(allocate_item))
        .route("/:id/itens", get(list_items))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let repository = RouteRepository::new(state.pool.clone());
    let route = repository
        .create(
            request.data_programada,
            request.motorista_id,
            request.veiculo_id,
            request.equipe_id,
        )
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        route.into(),
        "Programação criada com sucesso".to_string(),
    )))
}

async fn list_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let repository = RouteRepository::new(state.pool.clone());
    let routes = repository.list().await?;

    Ok(Json(routes.into_iter().map(RouteResponse::from).collect()))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResponse>, AppError> {
    let repository = RouteRepository::new(state.pool.clone());
    let route = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Route", &id.to_string()))?;

    Ok(Json(route.into()))
}

async fn transition_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let lifecycle = RouteLifecycle::new(state.pool.clone());
    let route = lifecycle.transition(id, &request.status).await?;

    Ok(Json(ApiResponse::success_with_message(
        route.into(),
        "Status atualizado com sucesso".to_string(),
    )))
}

async fn allocate_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AllocateItemRequest>,
) -> Result<Json<ApiResponse<RouteItemResponse>>, AppError> {
    let allocator = ItemAllocator::new(state.pool.clone());
    let item = allocator.allocate(id, request).await?;

    Ok(Json(ApiResponse::success_with_message(
        item.into(),
        "Pedido alocado com sucesso".to_string(),
    )))
}

async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RouteItemResponse>>, AppError> {
    let allocator = ItemAllocator::new(state.pool.clone());
    let items = allocator.list_items(id).await?;

    Ok(Json(items.into_iter().map(RouteItemResponse::from).collect()))
}
