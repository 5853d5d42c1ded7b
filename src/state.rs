//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{Notificador, RestriccionesCache};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub restricciones: Arc<RestriccionesCache>,
    pub notificador: Notificador,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        restricciones: Arc<RestriccionesCache>,
        notificador: Notificador,
    ) -> Self {
        Self {
            pool,
            restricciones,
            notificador,
        }
    }
}
