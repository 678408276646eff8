//! Routers da API

pub mod closing_routes;
pub mod receivable_routes;
pub mod route_routes;

use axum::Router;

use crate::state::AppState;

/// Router agregado de /api/rota
pub fn create_rota_router() -> Router<AppState> {
    route_routes::create_route_router()
        .merge(receivable_routes::create_receivable_router())
        .merge(closing_routes::create_closing_router())
}
