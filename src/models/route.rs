//! Modelo de Route (programação de entrega)
//!
//! Este módulo contém o struct Route e o ciclo de vida de status.
//! Mapeia exatamente a tabela `programacao` do schema legado.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status da rota - persistido como TEXT na coluna `status`
///
/// O ciclo de vida é estritamente progressivo:
/// AGUARDANDO_NF → CARREGADA → EM_TRANSITO → FECHAMENTO → FECHADA
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RouteStatus {
    AwaitingInvoice,
    Loaded,
    InTransit,
    Closing,
    Closed,
}

impl RouteStatus {
    /// Representação persistida no banco
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::AwaitingInvoice => "AGUARDANDO_NF",
            RouteStatus::Loaded => "CARREGADA",
            RouteStatus::InTransit => "EM_TRANSITO",
            RouteStatus::Closing => "FECHAMENTO",
            RouteStatus::Closed => "FECHADA",
        }
    }

    /// Converter a representação do banco de volta para o enum
    pub fn parse(value: &str) -> Option<RouteStatus> {
        match value {
            "AGUARDANDO_NF" => Some(RouteStatus::AwaitingInvoice),
            "CARREGADA" => Some(RouteStatus::Loaded),
            "EM_TRANSITO" => Some(RouteStatus::InTransit),
            "FECHAMENTO" => Some(RouteStatus::Closing),
            "FECHADA" => Some(RouteStatus::Closed),
            _ => None,
        }
    }

    /// Próximo estado legal, se houver
    pub fn next(&self) -> Option<RouteStatus> {
        match self {
            RouteStatus::AwaitingInvoice => Some(RouteStatus::Loaded),
            RouteStatus::Loaded => Some(RouteStatus::InTransit),
            RouteStatus::InTransit => Some(RouteStatus::Closing),
            RouteStatus::Closing => Some(RouteStatus::Closed),
            RouteStatus::Closed => None,
        }
    }

    /// Uma transição é legal apenas para o passo imediatamente seguinte
    pub fn can_transition(&self, target: RouteStatus) -> bool {
        self.next() == Some(target)
    }

    /// Estado terminal: nenhuma mutação filha é permitida
    pub fn is_terminal(&self) -> bool {
        matches!(self, RouteStatus::Closed)
    }
}

/// Route principal - mapeia exatamente a tabela `programacao`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub codigo: String,
    pub data_programada: NaiveDate,
    pub motorista_id: Uuid,
    pub veiculo_id: Uuid,
    pub equipe_id: Option<Uuid>,
    pub total_caixas: i32,
    pub kg_estimado: Decimal,
    pub kg_real: Option<Decimal>,
    pub status: String,
    pub criado_em: DateTime<Utc>,
}

impl Route {
    /// Status tipado; `None` indica linha corrompida no banco
    pub fn parsed_status(&self) -> Option<RouteStatus> {
        RouteStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            RouteStatus::AwaitingInvoice,
            RouteStatus::Loaded,
            RouteStatus::InTransit,
            RouteStatus::Closing,
            RouteStatus::Closed,
        ] {
            assert_eq!(RouteStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RouteStatus::parse("CANCELADA"), None);
    }

    #[test]
    fn test_forward_steps_are_legal() {
        assert!(RouteStatus::AwaitingInvoice.can_transition(RouteStatus::Loaded));
        assert!(RouteStatus::Loaded.can_transition(RouteStatus::InTransit));
        assert!(RouteStatus::InTransit.can_transition(RouteStatus::Closing));
        assert!(RouteStatus::Closing.can_transition(RouteStatus::Closed));
    }

    #[test]
    fn test_skipping_is_illegal() {
        assert!(!RouteStatus::AwaitingInvoice.can_transition(RouteStatus::InTransit));
        assert!(!RouteStatus::AwaitingInvoice.can_transition(RouteStatus::Closed));
        assert!(!RouteStatus::InTransit.can_transition(RouteStatus::Closed));
    }

    #[test]
    fn test_backward_is_illegal() {
        assert!(!RouteStatus::Loaded.can_transition(RouteStatus::AwaitingInvoice));
        assert!(!RouteStatus::Closing.can_transition(RouteStatus::InTransit));
        assert!(!RouteStatus::Closed.can_transition(RouteStatus::Closing));
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(RouteStatus::Closed.is_terminal());
        assert_eq!(RouteStatus::Closed.next(), None);
        assert!(!RouteStatus::Closing.is_terminal());
    }
}
