//! DTOs de rota e alocação de itens

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Route, RouteItem};

/// Request para criar uma nova programação de rota
#[derive(Debug, Deserialize)]
pub struct CreateRouteRequest {
    pub data_programada: NaiveDate,
    pub motorista_id: Uuid,
    pub veiculo_id: Uuid,
    pub equipe_id: Option<Uuid>,
}

/// Request para alocar um pedido importado na rota
#[derive(Debug, Deserialize, Validate)]
pub struct AllocateItemRequest {
    pub pedido_id: Uuid,

    #[validate(range(min = 1))]
    pub caixas: i32,

    pub preco_unitario: Decimal,

    pub kg_cliente: Decimal,
}

/// Request para avançar o status da rota
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: String,
}

/// Response de rota para a API
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: String,
    pub codigo: String,
    pub data_programada: String,
    pub motorista_id: String,
    pub veiculo_id: String,
    pub equipe_id: Option<String>,
    pub total_caixas: i32,
    pub kg_estimado: String,
    pub kg_real: Option<String>,
    pub status: String,
    pub criado_em: String,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id.to_string(),
            codigo: route.codigo,
            data_programada: route.data_programada.to_string(),
            motorista_id: route.motorista_id.to_string(),
            veiculo_id: route.veiculo_id.to_string(),
            equipe_id: route.equipe_id.map(|e| e.to_string()),
            total_caixas: route.total_caixas,
            kg_estimado: route.kg_estimado.to_string(),
            kg_real: route.kg_real.map(|k| k.to_string()),
            status: route.status,
            criado_em: route.criado_em.to_rfc3339(),
        }
    }
}

/// Response de item alocado
#[derive(Debug, Serialize)]
pub struct RouteItemResponse {
    pub id: String,
    pub programacao_id: String,
    pub pedido_id: String,
    pub caixas: i32,
    pub preco_unitario: String,
    pub kg_cliente: String,
    pub criado_em: String,
}

impl From<RouteItem> for RouteItemResponse {
    fn from(item: RouteItem) -> Self {
        Self {
            id: item.id.to_string(),
            programacao_id: item.programacao_id.to_string(),
            pedido_id: item.pedido_id.to_string(),
            caixas: item.caixas,
            preco_unitario: item.preco_unitario.to_string(),
            kg_cliente: item.kg_cliente.to_string(),
            criado_em: item.criado_em.to_rfc3339(),
        }
    }
}
