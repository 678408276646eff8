//! Repositório de rotas (tabela `programacao`)

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Route;
use crate::utils::errors::AppError;
use crate::utils::route_code;

/// Tentativas de geração de código antes de desistir
const MAX_CODE_ATTEMPTS: usize = 10;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Criar uma programação nova com código gerado
    ///
    /// O código é único de forma case-insensitive; colisões com escritores
    /// concorrentes caem no índice único e geram nova tentativa.
    pub async fn create(
        &self,
        data_programada: NaiveDate,
        motorista_id: Uuid,
        veiculo_id: Uuid,
        equipe_id: Option<Uuid>,
    ) -> Result<Route, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let codigo = route_code::generate_code();
            if self.codigo_exists(&codigo).await? {
                continue;
            }

            let result = sqlx::query_as::<_, Route>(
                r#"
                INSERT INTO programacao
                    (id, codigo, data_programada, motorista_id, veiculo_id, equipe_id,
                     total_caixas, kg_estimado, kg_real, status, criado_em)
                VALUES ($1, $2, $3, $4, $5, $6, 0, 0, NULL, 'AGUARDANDO_NF', $7)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&codigo)
            .bind(data_programada)
            .bind(motorista_id)
            .bind(veiculo_id)
            .bind(equipe_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(route) => return Ok(route),
                Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Internal(
            "could not generate a unique route code".to_string(),
        ))
    }

    pub async fn codigo_exists(&self, codigo: &str) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM programacao WHERE upper(codigo) = upper($1))",
        )
        .bind(codigo)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Route>, AppError> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM programacao WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn list(&self) -> Result<Vec<Route>, AppError> {
        let routes =
            sqlx::query_as::<_, Route>("SELECT * FROM programacao ORDER BY criado_em DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(routes)
    }

    /// Buscar a rota travando a linha (FOR UPDATE)
    ///
    /// A linha da rota é a granularidade de lock do motor: toda mutação de
    /// filhos (itens, lançamentos, despesas, cédulas, fechamento) passa por
    /// aqui dentro da mesma transação.
    pub async fn find_by_id_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Route>, AppError> {
        let route =
            sqlx::query_as::<_, Route>("SELECT * FROM programacao WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(route)
    }

    /// Atualizar o status dentro da transação corrente
    pub async fn update_status_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        status: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE programacao SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Registrar o peso real apurado pelo fechamento
    pub async fn update_kg_real_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        kg_real: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE programacao SET kg_real = $2 WHERE id = $1")
            .bind(id)
            .bind(kg_real)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Aplicar os agregados de alocação dentro da transação corrente
    pub async fn apply_allocation_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        caixas_delta: i32,
        kg_estimado: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE programacao
            SET total_caixas = total_caixas + $2, kg_estimado = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(caixas_delta)
        .bind(kg_estimado)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
