//! DTOs de posiciones
//!
//! Entrada y salida del endpoint de ingesta de posiciones, más la
//! clasificación que produce la evaluación de geocercas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Coordenadas reportadas por el vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct CoordenadasDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

/// Request para registrar una posición
#[derive(Debug, Deserialize, Validate)]
pub struct NuevaPosicionRequest {
    pub id_vehiculo: Uuid,

    #[validate]
    pub coordenadas: CoordenadasDto,
}

/// Resultado de evaluar una posición contra las restricciones vigentes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clasificacion {
    Normal,
    FueraDeRadio,
    ZonaPeligrosa,
}

impl Clasificacion {
    /// Mensaje para el cliente, uno por resultado posible
    pub fn mensaje(&self) -> &'static str {
        match self {
            Clasificacion::Normal => "La posicion actual del vehiculo fue registrada.",
            Clasificacion::FueraDeRadio => {
                "La posicion actual del vehiculo se encuentra por fuera del radio permitido por la agencia."
            }
            Clasificacion::ZonaPeligrosa => {
                "La posicion actual del vehiculo se encuentra dentro de un area restringida."
            }
        }
    }
}

/// Response del procesamiento de una posición
#[derive(Debug, Serialize)]
pub struct PosicionResponse {
    pub id: Uuid,
    pub id_vehiculo: Uuid,
    pub patente: String,
    pub coordenadas: CoordenadasDto,
    pub fecha_hora: DateTime<Utc>,
    pub clasificacion: Clasificacion,
    pub mensaje: String,
}
