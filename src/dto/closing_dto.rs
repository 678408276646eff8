//! DTOs do fechamento financeiro

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CashDenomination, Closing, Expense};

/// Uma cédula/moeda contada no fechamento
#[derive(Debug, Clone, Deserialize)]
pub struct DenominationEntry {
    pub valor_cedula: Decimal,
    pub quantidade: i32,
}

/// Request para fechar a rota
///
/// As cédulas viajam junto e são persistidas na mesma transação do
/// fechamento. Valores de face repetidos colapsam (o último vence).
#[derive(Debug, Deserialize, Validate)]
pub struct CloseRouteRequest {
    pub km_saida: Decimal,
    pub km_chegada: Decimal,
    pub litros: Decimal,
    pub custo_total: Decimal,

    #[validate(range(min = 0))]
    pub cx_carregada: i32,

    pub kg_nf: Decimal,

    #[validate(range(min = 1))]
    pub aves_por_caixa: Option<i32>,

    pub kg_carregado: Decimal,
    pub adiantamento: Decimal,
    pub devolver: Decimal,
    pub cheque: Decimal,
    pub total_dinheiro: Decimal,

    pub cedulas: Vec<DenominationEntry>,
}

/// Request para registrar uma despesa avulsa da rota
#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseRequest {
    #[validate(length(min = 1, max = 200))]
    pub descricao: String,

    pub valor: Decimal,
}

/// Response de fechamento
#[derive(Debug, Serialize)]
pub struct ClosingResponse {
    pub id: String,
    pub programacao_id: String,
    pub km_saida: String,
    pub km_chegada: String,
    pub litros: String,
    pub media: String,
    pub custo_total: String,
    pub cx_carregada: i32,
    pub kg_nf: String,
    pub aves_por_caixa: i32,
    pub kg_carregado: String,
    pub adiantamento: String,
    pub devolver: String,
    pub cheque: String,
    pub valor_caixa: String,
    pub total_dinheiro: String,
    pub saldo: String,
    pub criado_em: String,
}

impl From<Closing> for ClosingResponse {
    fn from(c: Closing) -> Self {
        Self {
            id: c.id.to_string(),
            programacao_id: c.programacao_id.to_string(),
            km_saida: c.km_saida.to_string(),
            km_chegada: c.km_chegada.to_string(),
            litros: c.litros.to_string(),
            media: c.media.to_string(),
            custo_total: c.custo_total.to_string(),
            cx_carregada: c.cx_carregada,
            kg_nf: c.kg_nf.to_string(),
            aves_por_caixa: c.aves_por_caixa,
            kg_carregado: c.kg_carregado.to_string(),
            adiantamento: c.adiantamento.to_string(),
            devolver: c.devolver.to_string(),
            cheque: c.cheque.to_string(),
            valor_caixa: c.valor_caixa.to_string(),
            total_dinheiro: c.total_dinheiro.to_string(),
            saldo: c.saldo.to_string(),
            criado_em: c.criado_em.to_rfc3339(),
        }
    }
}

/// Response de despesa
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub programacao_id: String,
    pub descricao: String,
    pub valor: String,
    pub criado_em: String,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id.to_string(),
            programacao_id: e.programacao_id.to_string(),
            descricao: e.descricao,
            valor: e.valor.to_string(),
            criado_em: e.criado_em.to_rfc3339(),
        }
    }
}

/// Response de cédula contada
#[derive(Debug, Serialize)]
pub struct DenominationResponse {
    pub programacao_id: String,
    pub valor_cedula: String,
    pub quantidade: i32,
    pub subtotal: String,
}

impl From<CashDenomination> for DenominationResponse {
    fn from(d: CashDenomination) -> Self {
        Self {
            programacao_id: d.programacao_id.to_string(),
            valor_cedula: d.valor_cedula.to_string(),
            quantidade: d.quantidade,
            subtotal: d.subtotal.to_string(),
        }
    }
}
