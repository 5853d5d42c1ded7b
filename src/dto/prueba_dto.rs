//! DTOs de pruebas de manejo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Prueba;

/// Request para crear una prueba
#[derive(Debug, Deserialize, Validate)]
pub struct NuevaPruebaRequest {
    pub id_vehiculo: Uuid,
    pub id_interesado: Uuid,
    pub legajo_empleado: i64,
}

/// Query string del endpoint de finalización
#[derive(Debug, Deserialize, Validate)]
pub struct FinalizarPruebaQuery {
    #[validate(length(max = 1000))]
    pub comentario: String,
}

/// Response de prueba para la API
#[derive(Debug, Serialize)]
pub struct PruebaResponse {
    pub id: Uuid,
    pub id_vehiculo: Uuid,
    pub id_interesado: Uuid,
    pub legajo_empleado: i64,
    pub fecha_hora_inicio: DateTime<Utc>,
    pub fecha_hora_fin: Option<DateTime<Utc>>,
    pub comentarios: Option<String>,
    pub incidente: bool,
}

impl From<Prueba> for PruebaResponse {
    fn from(prueba: Prueba) -> Self {
        Self {
            id: prueba.id,
            id_vehiculo: prueba.id_vehiculo,
            id_interesado: prueba.id_interesado,
            legajo_empleado: prueba.legajo_empleado,
            fecha_hora_inicio: prueba.fecha_hora_inicio,
            fecha_hora_fin: prueba.fecha_hora_fin,
            comentarios: prueba.comentarios,
            incidente: prueba.incidente,
        }
    }
}
