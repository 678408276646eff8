//! Modelo de RouteItem
//!
//! Item de pedido alocado a uma rota. Mapeia a tabela `programacao_item`.
//! Caixas, preço e peso do cliente são snapshots do momento da alocação;
//! o pedido original pode mudar depois sem afetar a rota.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Item alocado - mapeia exatamente a tabela `programacao_item`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RouteItem {
    pub id: Uuid,
    pub programacao_id: Uuid,
    pub pedido_id: Uuid,
    pub caixas: i32,
    pub preco_unitario: Decimal,
    pub kg_cliente: Decimal,
    pub criado_em: DateTime<Utc>,
}
