//! Modelo de Posicion
//!
//! Una muestra GPS de un vehículo durante una prueba. Inmutable una vez
//! registrada; ordenada por `fecha_hora` para un vehículo dado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Posicion - mapea a la tabla `posiciones`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Posicion {
    pub id: Uuid,
    pub id_vehiculo: Uuid,
    pub fecha_hora: DateTime<Utc>,
    pub latitud: f64,
    pub longitud: f64,
}
