//! Repositório de lançamentos PDC (tabela `pdc_lancamento`)
//!
//! O par (programacao_id, programacao_item_id) tem índice único; toda
//! escrita é um upsert, de modo que escritores concorrentes no mesmo par
//! nunca criam duplicata.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Receivable;
use crate::utils::errors::AppError;

pub struct ReceivableRepository {
    pool: PgPool,
}

impl ReceivableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert do lançamento do par (rota, item) dentro da transação corrente
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
        programacao_item_id: Uuid,
        pago: bool,
        valor_pago: Decimal,
        forma_pagamento: &str,
        nota_fiscal: Option<String>,
        observacao: Option<String>,
    ) -> Result<Receivable, AppError> {
        let receivable = sqlx::query_as::<_, Receivable>(
            r#"
            INSERT INTO pdc_lancamento
                (id, programacao_id, programacao_item_id, pago, valor_pago,
                 forma_pagamento, nota_fiscal, observacao, atualizado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (programacao_id, programacao_item_id)
            DO UPDATE SET
                pago = EXCLUDED.pago,
                valor_pago = EXCLUDED.valor_pago,
                forma_pagamento = EXCLUDED.forma_pagamento,
                nota_fiscal = EXCLUDED.nota_fiscal,
                observacao = EXCLUDED.observacao,
                atualizado_em = EXCLUDED.atualizado_em
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(programacao_id)
        .bind(programacao_item_id)
        .bind(pago)
        .bind(valor_pago)
        .bind(forma_pagamento)
        .bind(nota_fiscal)
        .bind(observacao)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(receivable)
    }

    pub async fn list_by_route(&self, programacao_id: Uuid) -> Result<Vec<Receivable>, AppError> {
        let receivables = sqlx::query_as::<_, Receivable>(
            "SELECT * FROM pdc_lancamento WHERE programacao_id = $1 ORDER BY atualizado_em, id",
        )
        .bind(programacao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(receivables)
    }

    /// Soma dos valores pagos da rota
    pub async fn total_collected(&self, programacao_id: Uuid) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(valor_pago), 0)
            FROM pdc_lancamento
            WHERE programacao_id = $1 AND pago = TRUE
            "#,
        )
        .bind(programacao_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Soma dos valores pagos, dentro da transação corrente
    pub async fn total_collected_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(valor_pago), 0)
            FROM pdc_lancamento
            WHERE programacao_id = $1 AND pago = TRUE
            "#,
        )
        .bind(programacao_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(total)
    }
}
