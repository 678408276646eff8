//! Fechamento financeiro da rota
//!
//! Produz exatamente um fechamento imutável por rota, conciliando quatro
//! totais independentes: a soma das cédulas contra o dinheiro declarado,
//! o saldo contra os lançamentos e despesas, a média de combustível e as
//! estatísticas de caixa/peso. A aritmética é pura e separada da
//! persistência; o `close` amarra as duas dentro de uma transação única.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::closing_dto::{CloseRouteRequest, DenominationEntry, ExpenseRequest};
use crate::models::{CashDenomination, Closing, Expense, RouteStatus};
use crate::repositories::closing_repository::{ClosingRepository, NewClosing};
use crate::repositories::receivable_repository::ReceivableRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::utils::errors::{invalid_state_error, not_found_error, validation_error, AppError};
use crate::utils::validation;

/// Entradas da conciliação, já agregadas
#[derive(Debug, Clone)]
pub struct ClosingInputs {
    pub km_saida: Decimal,
    pub km_chegada: Decimal,
    pub litros: Decimal,
    pub custo_total: Decimal,
    pub cx_carregada: i32,
    pub kg_nf: Decimal,
    pub kg_carregado: Decimal,
    pub adiantamento: Decimal,
    pub devolver: Decimal,
    pub cheque: Decimal,
    pub total_dinheiro: Decimal,
    pub total_recebido: Decimal,
    pub total_despesas: Decimal,
    pub soma_cedulas: Decimal,
}

/// Valores derivados da conciliação
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingFigures {
    pub media: Decimal,
    pub valor_caixa: Decimal,
    pub saldo: Decimal,
}

impl ClosingInputs {
    /// Validar as entradas e derivar média, valor por caixa e saldo
    ///
    /// Divisores zerados (litros, caixas) normalizam o resultado para
    /// zero: o domínio tolera viagem sem dado de combustível. Qualquer
    /// divergência entre cédulas e total declarado além do epsilon é erro
    /// de digitação e rejeita o fechamento.
    pub fn compute(&self, epsilon: Decimal) -> Result<ClosingFigures, AppError> {
        let required = [
            ("km_saida", self.km_saida),
            ("km_chegada", self.km_chegada),
            ("litros", self.litros),
            ("custo_total", self.custo_total),
            ("kg_nf", self.kg_nf),
            ("kg_carregado", self.kg_carregado),
            ("adiantamento", self.adiantamento),
            ("devolver", self.devolver),
            ("cheque", self.cheque),
            ("total_dinheiro", self.total_dinheiro),
        ];
        for (name, value) in required {
            if value < Decimal::ZERO {
                return Err(AppError::IncompleteData(format!(
                    "field '{}' must be present and non-negative",
                    name
                )));
            }
        }
        if self.cx_carregada < 0 {
            return Err(AppError::IncompleteData(
                "field 'cx_carregada' must be present and non-negative".to_string(),
            ));
        }
        if self.km_chegada < self.km_saida {
            return Err(AppError::IncompleteData(
                "arrival odometer is behind the departure odometer".to_string(),
            ));
        }

        // Conciliação de cédulas contra o total declarado
        let desvio = (self.soma_cedulas - self.total_dinheiro).abs();
        if desvio > epsilon {
            return Err(validation_error(
                "cedulas",
                "cash breakdown does not match the declared total",
            ));
        }

        let media = if self.litros.is_zero() {
            Decimal::ZERO
        } else {
            (self.km_chegada - self.km_saida) / self.litros
        };

        let valor_caixa = if self.cx_carregada == 0 {
            Decimal::ZERO
        } else {
            self.kg_nf / Decimal::from(self.cx_carregada)
        };

        // Fórmula autoritativa do saldo; nunca ajustada
        let saldo = self.total_recebido - self.total_despesas - self.adiantamento
            + self.devolver
            + self.cheque;

        Ok(ClosingFigures {
            media,
            valor_caixa,
            saldo,
        })
    }
}

/// Colapsar valores de face repetidos (o último vence) e somar subtotais
pub fn merge_denominations(
    entries: &[DenominationEntry],
) -> Result<(Vec<(Decimal, i32)>, Decimal), AppError> {
    let mut merged: BTreeMap<Decimal, i32> = BTreeMap::new();
    for entry in entries {
        if entry.valor_cedula <= Decimal::ZERO {
            return Err(validation_error(
                "cedulas",
                "denomination face value must be positive",
            ));
        }
        if entry.quantidade < 0 {
            return Err(validation_error(
                "cedulas",
                "denomination quantity must be non-negative",
            ));
        }
        merged.insert(entry.valor_cedula, entry.quantidade);
    }

    let total = merged
        .iter()
        .map(|(face, qty)| *face * Decimal::from(*qty))
        .sum();

    Ok((merged.into_iter().collect(), total))
}

pub struct ClosingCalculator {
    pool: PgPool,
    config: EnvironmentConfig,
    routes: RouteRepository,
    receivables: ReceivableRepository,
    closings: ClosingRepository,
}

impl ClosingCalculator {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            receivables: ReceivableRepository::new(pool.clone()),
            closings: ClosingRepository::new(pool.clone()),
            pool,
            config,
        }
    }

    /// Fechar a rota
    ///
    /// Toda a validação acontece antes de qualquer escrita; o fechamento e
    /// suas cédulas são persistidos na mesma transação, tudo-ou-nada.
    /// Fechadores concorrentes disputam o índice único e o perdedor recebe
    /// `AlreadyClosed` com o primeiro fechamento intacto.
    pub async fn close(
        &self,
        route_id: Uuid,
        request: CloseRouteRequest,
    ) -> Result<Closing, AppError> {
        request.validate()?;
        let (cedulas, soma_cedulas) = merge_denominations(&request.cedulas)?;

        let mut tx = self.pool.begin().await?;

        let route = self
            .routes
            .find_by_id_for_update(&mut tx, route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        let status = route
            .parsed_status()
            .ok_or_else(|| AppError::Internal(format!("unknown route status '{}'", route.status)))?;
        if status != RouteStatus::Closing {
            return Err(invalid_state_error("close the route", &route.status));
        }

        if self.closings.exists_tx(&mut tx, route.id).await? {
            return Err(AppError::AlreadyClosed(format!(
                "route '{}' already has a closing record",
                route.codigo
            )));
        }

        // Agregados lidos sob o mesmo lock que serializa os escritores filhos
        let total_recebido = self.receivables.total_collected_tx(&mut tx, route.id).await?;
        let total_despesas = self.closings.sum_expenses_tx(&mut tx, route.id).await?;

        let aves_por_caixa = request
            .aves_por_caixa
            .unwrap_or(self.config.aves_por_caixa_padrao);

        let inputs = ClosingInputs {
            km_saida: request.km_saida,
            km_chegada: request.km_chegada,
            litros: request.litros,
            custo_total: request.custo_total,
            cx_carregada: request.cx_carregada,
            kg_nf: request.kg_nf,
            kg_carregado: request.kg_carregado,
            adiantamento: request.adiantamento,
            devolver: request.devolver,
            cheque: request.cheque,
            total_dinheiro: request.total_dinheiro,
            total_recebido,
            total_despesas,
            soma_cedulas,
        };
        let figures = inputs.compute(self.config.epsilon_conciliacao)?;

        let closing = self
            .closings
            .insert_tx(
                &mut tx,
                NewClosing {
                    programacao_id: route.id,
                    km_saida: request.km_saida,
                    km_chegada: request.km_chegada,
                    litros: request.litros,
                    media: figures.media,
                    custo_total: request.custo_total,
                    cx_carregada: request.cx_carregada,
                    kg_nf: request.kg_nf,
                    aves_por_caixa,
                    kg_carregado: request.kg_carregado,
                    adiantamento: request.adiantamento,
                    devolver: request.devolver,
                    cheque: request.cheque,
                    valor_caixa: figures.valor_caixa,
                    total_dinheiro: request.total_dinheiro,
                    saldo: figures.saldo,
                },
            )
            .await?;

        for (valor_cedula, quantidade) in cedulas {
            self.closings
                .upsert_denomination_tx(&mut tx, route.id, valor_cedula, quantidade)
                .await?;
        }

        // O peso real da rota é apurado no fechamento
        self.routes
            .update_kg_real_tx(&mut tx, route.id, request.kg_carregado)
            .await?;

        tx.commit().await?;

        Ok(closing)
    }

    /// Buscar o fechamento persistido da rota
    pub async fn get(&self, route_id: Uuid) -> Result<Closing, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.closings
            .find_by_route(route_id)
            .await?
            .ok_or_else(|| not_found_error("Closing", &route_id.to_string()))
    }

    /// Listar as cédulas contadas no fechamento
    pub async fn list_denominations(
        &self,
        route_id: Uuid,
    ) -> Result<Vec<CashDenomination>, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.closings.list_denominations(route_id).await
    }

    /// Registrar uma despesa avulsa da rota
    ///
    /// Despesas ficam imutáveis assim que o fechamento existe; depois
    /// disso o saldo gravado deixaria de ser reproduzível.
    pub async fn add_expense(
        &self,
        route_id: Uuid,
        request: ExpenseRequest,
    ) -> Result<Expense, AppError> {
        request.validate()?;
        validation::validate_non_negative(request.valor)
            .map_err(|_| validation_error("valor", "amount must be non-negative"))?;

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
            return Err(invalid_state_error("add expenses", &route.status));
        }
        if self.closings.exists_tx(&mut tx, route.id).await? {
            return Err(AppError::AlreadyClosed(format!(
                "route '{}' already has a closing record",
                route.codigo
            )));
        }

        let expense = self
            .closings
            .insert_expense_tx(&mut tx, route.id, request.descricao.trim(), request.valor)
            .await?;

        tx.commit().await?;

        Ok(expense)
    }

    /// Listar despesas da rota na ordem de inserção
    pub async fn list_expenses(&self, route_id: Uuid) -> Result<Vec<Expense>, AppError> {
        self.routes
            .find_by_id(route_id)
            .await?
            .ok_or_else(|| not_found_error("Route", &route_id.to_string()))?;

        self.closings.list_expenses(route_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn epsilon() -> Decimal {
        dec("0.01")
    }

    fn base_inputs() -> ClosingInputs {
        ClosingInputs {
            km_saida: dec("1000"),
            km_chegada: dec("1300"),
            litros: dec("50"),
            custo_total: dec("250.00"),
            cx_carregada: 200,
            kg_nf: dec("1200"),
            kg_carregado: dec("1180"),
            adiantamento: dec("200.00"),
            devolver: dec("50.00"),
            cheque: dec("300.00"),
            total_dinheiro: dec("930.00"),
            total_recebido: dec("1000.00"),
            total_despesas: dec("150.00"),
            soma_cedulas: dec("930.00"),
        }
    }

    #[test]
    fn test_media_combustivel() {
        let figures = base_inputs().compute(epsilon()).unwrap();
        assert_eq!(figures.media, dec("6"));
    }

    #[test]
    fn test_media_sem_combustivel_normaliza_para_zero() {
        let mut inputs = base_inputs();
        inputs.litros = Decimal::ZERO;
        let figures = inputs.compute(epsilon()).unwrap();
        assert_eq!(figures.media, Decimal::ZERO);
    }

    #[test]
    fn test_valor_caixa() {
        let figures = base_inputs().compute(epsilon()).unwrap();
        assert_eq!(figures.valor_caixa, dec("6"));
    }

    #[test]
    fn test_valor_caixa_sem_caixas_normaliza_para_zero() {
        let mut inputs = base_inputs();
        inputs.cx_carregada = 0;
        let figures = inputs.compute(epsilon()).unwrap();
        assert_eq!(figures.valor_caixa, Decimal::ZERO);
    }

    #[test]
    fn test_saldo_formula_autoritativa() {
        // 1000.00 - 150.00 - 200.00 + 50.00 + 300.00
        let figures = base_inputs().compute(epsilon()).unwrap();
        assert_eq!(figures.saldo, dec("1000.00"));
    }

    #[test]
    fn test_recomputo_e_idempotente() {
        let inputs = base_inputs();
        let first = inputs.compute(epsilon()).unwrap();
        let second = inputs.compute(epsilon()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_conciliacao_aceita_dentro_do_epsilon() {
        let mut inputs = base_inputs();
        inputs.soma_cedulas = dec("929.99");
        assert!(inputs.compute(epsilon()).is_ok());
    }

    #[test]
    fn test_conciliacao_rejeita_fora_do_epsilon() {
        let mut inputs = base_inputs();
        inputs.soma_cedulas = dec("929.97");
        let err = inputs.compute(epsilon()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_campo_negativo_e_dado_incompleto() {
        let mut inputs = base_inputs();
        inputs.litros = dec("-1");
        let err = inputs.compute(epsilon()).unwrap_err();
        assert!(matches!(err, AppError::IncompleteData(_)));
    }

    #[test]
    fn test_odometro_regressivo_e_dado_incompleto() {
        let mut inputs = base_inputs();
        inputs.km_chegada = dec("999");
        let err = inputs.compute(epsilon()).unwrap_err();
        assert!(matches!(err, AppError::IncompleteData(_)));
    }

    #[test]
    fn test_merge_colapsa_valores_repetidos() {
        let entries = vec![
            DenominationEntry {
                valor_cedula: dec("50"),
                quantidade: 3,
            },
            DenominationEntry {
                valor_cedula: dec("50"),
                quantidade: 5,
            },
            DenominationEntry {
                valor_cedula: dec("20"),
                quantidade: 2,
            },
        ];
        let (merged, total) = merge_denominations(&entries).unwrap();
        assert_eq!(merged.len(), 2);
        // O segundo lançamento de 50 sobrescreve o primeiro
        assert!(merged.contains(&(dec("50"), 5)));
        assert_eq!(total, dec("290"));
    }

    #[test]
    fn test_merge_rejeita_face_invalida() {
        let entries = vec![DenominationEntry {
            valor_cedula: Decimal::ZERO,
            quantidade: 1,
        }];
        assert!(matches!(
            merge_denominations(&entries).unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_merge_rejeita_quantidade_negativa() {
        let entries = vec![DenominationEntry {
            valor_cedula: dec("10"),
            quantidade: -2,
        }];
        assert!(matches!(
            merge_denominations(&entries).unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
