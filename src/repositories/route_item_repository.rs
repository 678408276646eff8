//! Repositório de itens alocados (tabela `programacao_item`)

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::RouteItem;
use crate::utils::errors::AppError;

pub struct RouteItemRepository {
    pool: PgPool,
}

impl RouteItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserir um item dentro da transação corrente
    pub async fn insert_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
        pedido_id: Uuid,
        caixas: i32,
        preco_unitario: Decimal,
        kg_cliente: Decimal,
    ) -> Result<RouteItem, AppError> {
        let item = sqlx::query_as::<_, RouteItem>(
            r#"
            INSERT INTO programacao_item
                (id, programacao_id, pedido_id, caixas, preco_unitario, kg_cliente, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(programacao_id)
        .bind(pedido_id)
        .bind(caixas)
        .bind(preco_unitario)
        .bind(kg_cliente)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(item)
    }

    /// Listar itens na ordem de inserção
    pub async fn list_by_route(&self, programacao_id: Uuid) -> Result<Vec<RouteItem>, AppError> {
        let items = sqlx::query_as::<_, RouteItem>(
            "SELECT * FROM programacao_item WHERE programacao_id = $1 ORDER BY criado_em, id",
        )
        .bind(programacao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Buscar um item dentro da transação corrente
    pub async fn find_by_id_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<RouteItem>, AppError> {
        let item = sqlx::query_as::<_, RouteItem>("SELECT * FROM programacao_item WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(item)
    }

    /// Soma dos pesos de cliente alocados, dentro da transação corrente
    pub async fn sum_kg_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(kg_cliente), 0) FROM programacao_item WHERE programacao_id = $1",
        )
        .bind(programacao_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(total)
    }
}
