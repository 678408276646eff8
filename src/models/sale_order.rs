//! Modelo de SaleOrder (pedido importado)
//!
//! Colaborador externo somente-leitura: os pedidos são importados por um
//! processo separado e o motor apenas consulta por id na alocação.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pedido de venda - mapeia a tabela `pedido`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleOrder {
    pub id: Uuid,
    pub numero: String,
    pub cliente: String,
    pub caixas: i32,
    pub kg: Decimal,
    pub preco_unitario: Decimal,
    pub importado_em: DateTime<Utc>,
}
