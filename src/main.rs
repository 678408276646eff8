mod config;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Motor de Fechamento de Rotas de Entrega");
    info!("==========================================");

    // Inicializar base de dados
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Erro conectando à base de dados: {}", e);
            return Err(anyhow::anyhow!("Erro de base de dados: {}", e));
        }
    };

    let config = EnvironmentConfig::default();
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/rota", routes::create_rota_router())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando em http://{}", addr);
    info!("🔍 Endpoints disponíveis:");
    info!("   GET  /health - Health check");
    info!("🚛 Programações:");
    info!("   POST /api/rota - Criar programação");
    info!("   GET  /api/rota - Listar programações");
    info!("   GET  /api/rota/:id - Obter programação");
    info!("   POST /api/rota/:id/status - Avançar status");
    info!("   POST /api/rota/:id/itens - Alocar pedido");
    info!("   GET  /api/rota/:id/itens - Listar itens");
    info!("💰 Lançamentos PDC:");
    info!("   PUT  /api/rota/:id/pagamentos/:item_id - Registrar pagamento");
    info!("   GET  /api/rota/:id/pagamentos - Listar lançamentos");
    info!("   GET  /api/rota/:id/pagamentos/total - Total recebido");
    info!("📋 Fechamento:");
    info!("   POST /api/rota/:id/fechamento - Fechar rota");
    info!("   GET  /api/rota/:id/fechamento - Obter fechamento");
    info!("   GET  /api/rota/:id/fechamento/cedulas - Cédulas contadas");
    info!("   POST /api/rota/:id/despesas - Registrar despesa");
    info!("   GET  /api/rota/:id/despesas - Listar despesas");

    // Iniciar servidor em background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Erro do servidor: {}", e);
                e
            })
    });

    // Esperar o servidor terminar
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminou com erro: {}", e);
    }

    info!("👋 Servidor encerrado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "delivery-closing",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Sinal de desligamento graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Sinal Ctrl+C recebido, desligando servidor...");
        },
        _ = terminate => {
            info!("🛑 Sinal de término recebido, desligando servidor...");
        },
    }
}
