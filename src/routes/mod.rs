//! Rutas de la API
//!
//! Este módulo arma los routers de cada recurso.

pub mod prueba_routes;
pub mod reporte_routes;
pub mod vehiculo_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/pruebas", prueba_routes::create_prueba_router())
        .nest("/api/vehiculos", vehiculo_routes::create_vehiculo_router())
        .nest("/api/reportes", reporte_routes::create_reporte_router())
}
