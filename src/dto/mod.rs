//! DTOs de la API
//!
//! Este módulo contiene los objetos de transferencia de la API propia y los
//! DTOs externos (restricciones, notificaciones).

pub mod notificacion_dto;
pub mod posicion_dto;
pub mod prueba_dto;
pub mod reporte_dto;
pub mod restricciones_dto;

use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
