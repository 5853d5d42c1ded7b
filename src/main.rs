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

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::cors_middleware;
use services::{ClienteRestriccionesHttp, RelojSistema, RestriccionesCache, WorkerNotificaciones};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let nivel = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(nivel).init();

    info!("🚗 Agencia de Pruebas de Manejo - API");
    info!("=====================================");

    // Inicializar base de datos
    let pool = match database::connection::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Cliente HTTP compartido para los colaboradores externos
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    // Cache de restricciones con TTL y refresco single-flight
    let restricciones = Arc::new(RestriccionesCache::new(
        Arc::new(ClienteRestriccionesHttp::new(
            http_client.clone(),
            config.restricciones_url.clone(),
        )),
        Arc::new(RelojSistema),
        Duration::from_secs(config.restricciones_cache_ttl_secs),
    ));

    // Worker de notificaciones en background, desacoplado de los requests
    let (notificador, _worker_handle) = WorkerNotificaciones::iniciar(
        config.notificaciones_buffer,
        http_client,
        config.notificaciones_url.clone(),
    );

    // Crear router de la API
    let app_state = AppState::new(pool, restricciones, notificador);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::create_api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🧪 Endpoints - Pruebas:");
    info!("   POST  /api/pruebas/crear - Crear prueba");
    info!("   GET   /api/pruebas - Listar pruebas");
    info!("   GET   /api/pruebas/en-curso - Pruebas en curso");
    info!("   PATCH /api/pruebas/:id/finalizar - Finalizar prueba");
    info!("   DELETE /api/pruebas/:id - Eliminar prueba");
    info!("📍 Endpoints - Vehículos:");
    info!("   POST /api/vehiculos/posiciones - Registrar posición");
    info!("   GET  /api/vehiculos/restricciones-actuales - Restricciones vigentes");
    info!("📊 Endpoints - Reportes:");
    info!("   GET  /api/reportes/kilometraje/:patente - Kilometraje por período");
    info!("   GET  /api/reportes/incidentes - Pruebas con incidentes");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "agencia-pruebas",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
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
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
