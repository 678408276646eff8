//! Alocação de pedidos importados em rotas
//!
//! Anexa itens de venda a uma programação enquanto ela ainda aguarda a
//! nota fiscal, mantendo os agregados da rota (total de caixas e peso
//! estimado) na mesma transação.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::AllocateItemRequest;
use crate::models::{RouteItem, RouteStatus};
use crate::repositories::route_item_repository::RouteItemRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::sale_order_repository::SaleOrderRepository;
use crate::utils::errors::{invalid_state_error, not_found_error, validation_error, AppError};
use crate::utils::validation;

pub struct ItemAllocator {
    pool: PgPool,
    routes: RouteRepository,
    items: RouteItemRepository,
    orders: SaleOrderRepository,
}

impl ItemAllocator {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            items: RouteItemRepository::new(pool.clone()),
            orders: SaleOrderRepository::new(pool.clone()),
            pool,
        }
    }

    /// Alocar um pedido na rota
    ///
    /// Permitido apenas enquanto a rota está em AGUARDANDO_NF. Caixas,
    /// preço e peso do cliente são congelados no item no momento da
    /// alocação; mudanças posteriores no pedido não se propagam.
    pub async fn allocate(
        &self,
        route_id: Uuid,
        request: AllocateItemRequest,
    ) -> Result<RouteItem, AppError> {
        request.validate()?;
        validation::validate_non_negative(request.preco_unitario)
            .map_err(|_| validation_error("preco_unitario", "price must be non-negative"))?;
        validation::validate_non_negative(request.kg_cliente)
            .map_err(|_| validation_error("kg_cliente", "weight must be non-negative"))?;

        let mut tx = self.pool.begin().await?;

        let route = self
            .routes
            .find_by_id_for_update(&mut tx, route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let status = route
            .parsed_status()
            .ok_or_else(|| AppError::Internal(format!("unknown route status '{}'", route.status)))?;
        if status != RouteStatus::AwaitingInvoice {
            return Err(invalid_state_error("allocate items", &route.status));
        }

        let order = self
            .orders
            .find_by_id_tx(&mut tx, request.pedido_id)
            .await?
            .ok_or_else(|| not_found_error("Sale order", &request.pedido_id.to_string()))?;

        let item = self
            .items
            .insert_tx(
                &mut tx,
                route.id,
                order.id,
                request.caixas,
                request.preco_unitario,
                request.kg_cliente,
            )
            .await?;

        // Agregados recalculados dentro da mesma transação
        let kg_estimado = self.items.sum_kg_tx(&mut tx, route.id).await?;
        self.routes
            .apply_allocation_tx(&mut tx, route.id, request.caixas, kg_estimado)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    /// Listar itens da rota na ordem de inserção
    pub async fn list_items(&self, route_id: Uuid) -> Result<Vec<RouteItem>, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.items.list_by_route(route_id).await
    }
}
