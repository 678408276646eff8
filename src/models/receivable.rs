//! Modelo de Receivable (lançamento PDC)
//!
//! Um lançamento por par (rota, item alocado). Mapeia a tabela
//! `pdc_lancamento`, com índice único em (programacao_id,
//! programacao_item_id). Registros nunca são apagados, apenas
//! atualizados (last-write-wins).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Forma de pagamento - enumeração fechada
///
/// Valores desconhecidos falham na borda com erro de validação;
/// nunca são gravados como texto livre fora do campo `observacao`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Dinheiro,
    Prazo,
    Cheque,
    Pix,
    Boleto,
}

impl PaymentMethod {
    /// Representação persistida no banco
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "DINHEIRO",
            PaymentMethod::Prazo => "PRAZO",
            PaymentMethod::Cheque => "CHEQUE",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "BOLETO",
        }
    }

    /// Converter a representação textual; `None` para valores fora do enum
    pub fn parse(value: &str) -> Option<PaymentMethod> {
        match value.trim().to_uppercase().as_str() {
            "DINHEIRO" => Some(PaymentMethod::Dinheiro),
            "PRAZO" => Some(PaymentMethod::Prazo),
            "CHEQUE" => Some(PaymentMethod::Cheque),
            "PIX" => Some(PaymentMethod::Pix),
            "BOLETO" => Some(PaymentMethod::Boleto),
            _ => None,
        }
    }
}

/// Lançamento PDC - mapeia exatamente a tabela `pdc_lancamento`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Receivable {
    pub id: Uuid,
    pub programacao_id: Uuid,
    pub programacao_item_id: Uuid,
    pub pago: bool,
    pub valor_pago: Decimal,
    pub forma_pagamento: String,
    pub nota_fiscal: Option<String>,
    pub observacao: Option<String>,
    pub atualizado_em: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        assert_eq!(PaymentMethod::parse("DINHEIRO"), Some(PaymentMethod::Dinheiro));
        assert_eq!(PaymentMethod::parse("prazo"), Some(PaymentMethod::Prazo));
        assert_eq!(PaymentMethod::parse(" cheque "), Some(PaymentMethod::Cheque));
        assert_eq!(PaymentMethod::parse("PIX"), Some(PaymentMethod::Pix));
        assert_eq!(PaymentMethod::parse("Boleto"), Some(PaymentMethod::Boleto));
    }

    #[test]
    fn test_parse_unknown_method() {
        assert_eq!(PaymentMethod::parse("VALE"), None);
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn test_method_roundtrip() {
        for method in [
            PaymentMethod::Dinheiro,
            PaymentMethod::Prazo,
            PaymentMethod::Cheque,
            PaymentMethod::Pix,
            PaymentMethod::Boleto,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
    }
}
