//! Modelos do fechamento financeiro
//!
//! Fechamento, despesas e cédulas de uma rota. Mapeiam as tabelas
//! `fechamento_rota`, `fechamento_despesa` e `fechamento_cedula`.
//! O fechamento é criado uma única vez por rota (índice único em
//! `programacao_id`) e é somente-leitura depois disso.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fechamento da rota - mapeia exatamente a tabela `fechamento_rota`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Closing {
    pub id: Uuid,
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
    pub criado_em: DateTime<Utc>,
}

/// Despesa avulsa de uma rota - mapeia a tabela `fechamento_despesa`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub programacao_id: Uuid,
    pub descricao: String,
    pub valor: Decimal,
    pub criado_em: DateTime<Utc>,
}

/// Cédula/moeda contada no fechamento - mapeia a tabela `fechamento_cedula`
///
/// No máximo uma linha por (programacao_id, valor_cedula); o subtotal é
/// sempre quantidade × valor de face.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CashDenomination {
    pub programacao_id: Uuid,
    pub valor_cedula: Decimal,
    pub quantidade: i32,
    pub subtotal: Decimal,
}
