//! Datos de referencia
//!
//! Vehículos, interesados y empleados son administrados por otro servicio;
//! acá solo se leen para validar la elegibilidad de una prueba.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: Uuid,
    pub patente: String,
    pub anio: Option<i32>,
    pub descripcion_modelo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interesado {
    pub id: Uuid,
    pub tipo_documento: String,
    pub documento: String,
    pub nombre: String,
    pub apellido: String,
    pub restringido: bool,
    pub nro_licencia: Option<i32>,
    pub fecha_vencimiento_licencia: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Empleado {
    pub legajo: i64,
    pub nombre: String,
    pub apellido: String,
}
