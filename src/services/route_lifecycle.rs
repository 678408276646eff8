//! Ciclo de vida da rota
//!
//! Conduz a programação pela máquina de estados
//! AGUARDANDO_NF → CARREGADA → EM_TRANSITO → FECHAMENTO → FECHADA,
//! sempre um passo por vez. FECHAMENTO → FECHADA só é legal depois que o
//! registro de fechamento existe.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Route, RouteStatus};
use crate::repositories::closing_repository::ClosingRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct RouteLifecycle {
    pool: PgPool,
    routes: RouteRepository,
    closings: ClosingRepository,
}

impl RouteLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            closings: ClosingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Avançar o status da rota para `target`
    ///
    /// O status corrente é relido sob lock da linha, de modo que duas
    /// transições concorrentes se serializam e a segunda falha como
    /// transição ilegal.
    pub async fn transition(&self, route_id: Uuid, target: &str) -> Result<Route, AppError> {
        let target = RouteStatus::parse(target)
            .ok_or_else(|| validation_error("status", "unknown route status"))?;

        let mut tx = self.pool.begin().await?;

        let mut route = self
            .routes
            .find_by_id_for_update(&mut tx, route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let current = route
            .parsed_status()
            .ok_or_else(|| AppError::Internal(format!("unknown route status '{}'", route.status)))?;

        if !current.can_transition(target) {
            return Err(AppError::InvalidTransition(format!(
                "route '{}' cannot move from '{}' to '{}'",
                route.codigo,
                current.as_str(),
                target.as_str()
            )));
        }

        // O fechamento é pré-requisito do estado terminal
        if target == RouteStatus::Closed && !self.closings.exists_tx(&mut tx, route.id).await? {
            return Err(AppError::InvalidTransition(format!(
                "route '{}' has no closing record yet",
                route.codigo
            )));
        }

        self.routes
            .update_status_tx(&mut tx, route.id, target.as_str())
            .await?;

        tx.commit().await?;

        route.status = target.as_str().to_string();
        Ok(route)
    }
}
