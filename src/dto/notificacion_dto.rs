//! DTOs de notificaciones
//!
//! Payload que se publica al microservicio de notificaciones cuando una
//! posición viola una restricción.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::posicion_dto::Clasificacion;

/// Alerta de seguridad disparada por una violación de geocerca
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificacionSeguridadDto {
    pub tipo: Clasificacion,
    pub id_vehiculo: Uuid,
    pub patente: String,
    pub latitud: f64,
    pub longitud: f64,
    pub mensaje: String,
}
