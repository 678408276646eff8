//! Repositório do fechamento (tabelas `fechamento_rota`,
//! `fechamento_despesa` e `fechamento_cedula`)
//!
//! O índice único em `fechamento_rota.programacao_id` é quem decide a
//! corrida entre fechadores concorrentes: exatamente um INSERT vence e o
//! perdedor recebe a violação 23505, mapeada para `AlreadyClosed`.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{CashDenomination, Closing, Expense};
use crate::utils::errors::AppError;

/// Campos de um fechamento pronto para persistir
#[derive(Debug, Clone)]
pub struct NewClosing {
    pub programacao_id: Uuid,
    pub km_saida: Decimal,
    pub km_chegada: Decimal,
    pub litros: Decimal,
    pub media: Decimal,
    pub custo_total: Decimal,
    pub cx_carregada: i32,
    pub kg_nf: Decimal,
    pub aves_por_caixa: i32,
    pub kg_carregado: Decimal,
    pub adiantamento: Decimal,
    pub devolver: Decimal,
    pub cheque: Decimal,
    pub valor_caixa: Decimal,
    pub total_dinheiro: Decimal,
    pub saldo: Decimal,
}

pub struct ClosingRepository {
    pool: PgPool,
}

impl ClosingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_route(&self, programacao_id: Uuid) -> Result<Option<Closing>, AppError> {
        let closing =
            sqlx::query_as::<_, Closing>("SELECT * FROM fechamento_rota WHERE programacao_id = $1")
                .bind(programacao_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(closing)
    }

    /// Existe fechamento para a rota? (dentro da transação corrente)
    pub async fn exists_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM fechamento_rota WHERE programacao_id = $1)",
        )
        .bind(programacao_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists.0)
    }

    /// Inserir o fechamento dentro da transação corrente
    ///
    /// A violação do índice único vira `AlreadyClosed` tipado; o fechamento
    /// vencedor permanece intacto.
    pub async fn insert_tx(
        &self,
        conn: &mut PgConnection,
        new: NewClosing,
    ) -> Result<Closing, AppError> {
        let result = sqlx::query_as::<_, Closing>(
            r#"
            INSERT INTO fechamento_rota
                (id, programacao_id, km_saida, km_chegada, litros, media, custo_total,
                 cx_carregada, kg_nf, aves_por_caixa, kg_carregado, adiantamento,
                 devolver, cheque, valor_caixa, total_dinheiro, saldo, criado_em)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.programacao_id)
        .bind(new.km_saida)
        .bind(new.km_chegada)
        .bind(new.litros)
        .bind(new.media)
        .bind(new.custo_total)
        .bind(new.cx_carregada)
        .bind(new.kg_nf)
        .bind(new.aves_por_caixa)
        .bind(new.kg_carregado)
        .bind(new.adiantamento)
        .bind(new.devolver)
        .bind(new.cheque)
        .bind(new.valor_caixa)
        .bind(new.total_dinheiro)
        .bind(new.saldo)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await;

        match result {
            Ok(closing) => Ok(closing),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
                Err(AppError::AlreadyClosed(format!(
                    "route '{}' already has a closing record",
                    new.programacao_id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Upsert de uma cédula dentro da transação corrente
    ///
    /// No máximo uma linha por (rota, valor de face); o upsert sobrescreve
    /// a quantidade e recalcula o subtotal.
    pub async fn upsert_denomination_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
        valor_cedula: Decimal,
        quantidade: i32,
    ) -> Result<CashDenomination, AppError> {
        let denomination = sqlx::query_as::<_, CashDenomination>(
            r#"
            INSERT INTO fechamento_cedula (programacao_id, valor_cedula, quantidade, subtotal)
            VALUES ($1, $2, $3, $2 * $3)
            ON CONFLICT (programacao_id, valor_cedula)
            DO UPDATE SET
                quantidade = EXCLUDED.quantidade,
                subtotal = EXCLUDED.subtotal
            RETURNING *
            "#,
        )
        .bind(programacao_id)
        .bind(valor_cedula)
        .bind(quantidade)
        .fetch_one(&mut *conn)
        .await?;

        Ok(denomination)
    }

    pub async fn list_denominations(
        &self,
        programacao_id: Uuid,
    ) -> Result<Vec<CashDenomination>, AppError> {
        let denominations = sqlx::query_as::<_, CashDenomination>(
            r#"
            SELECT * FROM fechamento_cedula
            WHERE programacao_id = $1
            ORDER BY valor_cedula DESC
            "#,
        )
        .bind(programacao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(denominations)
    }

    /// Inserir uma despesa dentro da transação corrente
    pub async fn insert_expense_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
        descricao: &str,
        valor: Decimal,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO fechamento_despesa (id, programacao_id, descricao, valor, criado_em)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(programacao_id)
        .bind(descricao)
        .bind(valor)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(expense)
    }

    pub async fn list_expenses(&self, programacao_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM fechamento_despesa
            WHERE programacao_id = $1
            ORDER BY criado_em, id
            "#,
        )
        .bind(programacao_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Soma das despesas da rota, dentro da transação corrente
    pub async fn sum_expenses_tx(
        &self,
        conn: &mut PgConnection,
        programacao_id: Uuid,
    ) -> Result<Decimal, AppError> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(valor), 0) FROM fechamento_despesa WHERE programacao_id = $1",
        )
        .bind(programacao_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(total)
    }
}
