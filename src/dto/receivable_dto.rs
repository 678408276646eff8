//! DTOs de lançamentos PDC (recebíveis)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Receivable;

/// Request para registrar (ou atualizar) o pagamento de um item
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub pago: bool,
    pub valor_pago: Decimal,
    pub forma_pagamento: String,
    pub nota_fiscal: Option<String>,
    pub observacao: Option<String>,
}

/// Response de lançamento PDC
#[derive(Debug, Serialize)]
pub struct ReceivableResponse {
    pub id: String,
    pub programacao_id: String,
    pub programacao_item_id: String,
    pub pago: bool,
    pub valor_pago: String,
    pub forma_pagamento: String,
    pub nota_fiscal: Option<String>,
    pub observacao: Option<String>,
    pub atualizado_em: String,
}

impl From<Receivable> for ReceivableResponse {
    fn from(r: Receivable) -> Self {
        Self {
            id: r.id.to_string(),
            programacao_id: r.programacao_id.to_string(),
            programacao_item_id: r.programacao_item_id.to_string(),
            pago: r.pago,
            valor_pago: r.valor_pago.to_string(),
            forma_pagamento: r.forma_pagamento,
            nota_fiscal: r.nota_fiscal,
            observacao: r.observacao,
            atualizado_em: r.atualizado_em.to_rfc3339(),
        }
    }
}

/// Total recebido de uma rota (baseline de caixa do fechamento)
#[derive(Debug, Serialize)]
pub struct TotalCollectedResponse {
    pub programacao_id: String,
    pub total_recebido: String,
}

impl TotalCollectedResponse {
    pub fn new(programacao_id: uuid::Uuid, total: Decimal) -> Self {
        Self {
            programacao_id: programacao_id.to_string(),
            total_recebido: total.to_string(),
        }
    }
}
