//! Configuração de variáveis de ambiente
//!
//! Este módulo concentra a configuração do ambiente e os parâmetros
//! do motor de fechamento.

use rust_decimal::Decimal;
use std::env;

/// Epsilon padrão da conciliação de cédulas (0.01 unidade monetária)
fn default_epsilon() -> Decimal {
    Decimal::new(1, 2)
}

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Aves por caixa quando o fechamento não informa (multiplicador de negócio)
    pub aves_por_caixa_padrao: i32,
    /// Tolerância da conciliação soma-de-cédulas × total declarado
    pub epsilon_conciliacao: Decimal,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_string())
                .collect(),
            aves_por_caixa_padrao: env::var("AVES_POR_CAIXA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),
            epsilon_conciliacao: env::var("EPSILON_CONCILIACAO")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_epsilon),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar se estamos em modo desenvolvimento
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar se estamos em modo produção
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obter a URL do servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
