//! DTOs externos de restricciones
//!
//! Estos structs mapean el JSON que publica el servicio de restricciones de
//! la agencia. Son de solo lectura: el snapshot nunca se modifica acá.

use serde::{Deserialize, Serialize};

/// Ubicación de la agencia (el "home" de las geocercas)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UbicacionDto {
    pub latitud: f64,
    pub longitud: f64,
}

/// Centro de una zona peligrosa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordenadasDto {
    pub latitud: f64,
    pub longitud: f64,
}

/// Zona peligrosa: círculo definido por centro y radio en metros
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonaPeligrosaDto {
    pub id_zona: String,
    pub nombre_zona: String,
    pub coordenadas: CoordenadasDto,
    pub radio_metros: f64,
}

/// Snapshot completo de restricciones vigentes de la agencia
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestriccionesDto {
    pub ubicacion_agencia: UbicacionDto,
    pub radio_maximo_metros: f64,
    pub zonas_peligrosas: Vec<ZonaPeligrosaDto>,
}
