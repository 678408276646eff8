//! Conexão com PostgreSQL
//!
//! O schema é de responsabilidade de um colaborador de migração externo,
//! executado antes do serviço subir; aqui apenas abrimos o pool.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Criar um pool de conexões a partir do ambiente
pub async fn create_pool(database_url: Option<&str>) -> Result<PgPool> {
    let config = match database_url {
        Some(url) => DatabaseConfig {
            url: url.to_string(),
            ..DatabaseConfig::default()
        },
        None => DatabaseConfig::default(),
    };

    let pool = config.create_pool().await?;

    Ok(pool)
}
