//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    // URLs de los servicios externos
    pub restricciones_url: String,
    pub notificaciones_url: String,
    // Cache de restricciones
    pub restricciones_cache_ttl_secs: u64,
    // Cola de alertas
    pub notificaciones_buffer: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            restricciones_url: env::var("RESTRICCIONES_URL")
                .expect("RESTRICCIONES_URL must be set"),
            notificaciones_url: env::var("NOTIFICACIONES_URL")
                .expect("NOTIFICACIONES_URL must be set"),
            restricciones_cache_ttl_secs: env::var("RESTRICCIONES_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("RESTRICCIONES_CACHE_TTL_SECS must be a valid number"),
            notificaciones_buffer: env::var("NOTIFICACIONES_BUFFER")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .expect("NOTIFICACIONES_BUFFER must be a valid number"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
