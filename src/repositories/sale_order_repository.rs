//! Repositório de pedidos importados (tabela `pedido`)
//!
//! Somente leitura: a importação de pedidos é um colaborador externo.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::SaleOrder;
use crate::utils::errors::AppError;

pub struct SaleOrderRepository {
    pool: PgPool,
}

impl SaleOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SaleOrder>, AppError> {
        let order = sqlx::query_as::<_, SaleOrder>("SELECT * FROM pedido WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Buscar um pedido dentro da transação corrente
    pub async fn find_by_id_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<SaleOrder>, AppError> {
        let order = sqlx::query_as::<_, SaleOrder>("SELECT * FROM pedido WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(order)
    }
}
