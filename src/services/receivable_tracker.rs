//! Rastreamento de recebíveis (PDC) por rota
//!
//! Um lançamento por par (rota, item alocado). O registro é um upsert:
//! eventos de cobrança posteriores atualizam o mesmo lançamento
//! (last-write-wins), nunca criam duplicata.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::receivable_dto::RecordPaymentRequest;
use crate::models::{PaymentMethod, Receivable};
use crate::repositories::closing_repository::ClosingRepository;
use crate::repositories::receivable_repository::ReceivableRepository;
use crate::repositories::route_item_repository::RouteItemRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{invalid_state_error, not_found_error, validation_error, AppError};
use crate::utils::validation;

pub struct ReceivableTracker {
    pool: PgPool,
    routes: RouteRepository,
    items: RouteItemRepository,
    receivables: ReceivableRepository,
    closings: ClosingRepository,
}

impl ReceivableTracker {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            items: RouteItemRepository::new(pool.clone()),
            receivables: ReceivableRepository::new(pool.clone()),
            closings: ClosingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Registrar (ou atualizar) o pagamento de um item da rota
    pub async fn record_payment(
        &self,
        route_id: Uuid,
        item_id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<Receivable, AppError> {
        // Forma de pagamento é enumeração fechada; valor livre só em observacao
        let method = PaymentMethod::parse(&request.forma_pagamento)
            .ok_or_else(|| validation_error("forma_pagamento", "unknown payment method"))?;
        validation::validate_non_negative(request.valor_pago)
            .map_err(|_| validation_error("valor_pago", "amount must be non-negative"))?;

        let mut tx = self.pool.begin().await?;

        let route = self
            .routes
            .find_by_id_for_update(&mut tx, route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let status = route
            .parsed_status()
            .ok_or_else(|| AppError::Internal(format!("unknown route status '{}'", route.status)))?;
        if status.is_terminal() {
            return Err(invalid_state_error("record payments", &route.status));
        }
        // Depois que o fechamento existe, o saldo está congelado
        if self.closings.exists_tx(&mut tx, route.id).await? {
            return Err(AppError::AlreadyClosed(format!(
                "route '{}' already has a closing record",
                route.id
            )));
        }

        let item = self
            .items
            .find_by_id_tx(&mut tx, item_id)
            .await?
            .filter(|item| item.programacao_id == route.id)
            .ok_or_else(|| not_found_error("Route item", &item_id.to_string()))?;

        let receivable = self
            .receivables
            .upsert_tx(
                &mut tx,
                route.id,
                item.id,
                request.pago,
                request.valor_pago,
                method.as_str(),
                request.nota_fiscal,
                request.observacao,
            )
            .await?;

        tx.commit().await?;

        Ok(receivable)
    }

    /// Soma dos valores pagos da rota (baseline de caixa do fechamento)
    pub async fn total_collected(&self, route_id: Uuid) -> Result<Decimal, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.receivables.total_collected(route_id).await
    }

    /// Listar lançamentos da rota
    pub async fn list(&self, route_id: Uuid) -> Result<Vec<Receivable>, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.receivables.list_by_route(route_id).await
    }
}
