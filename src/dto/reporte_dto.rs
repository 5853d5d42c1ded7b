//! DTOs de reportes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query string del reporte de kilometraje
#[derive(Debug, Deserialize)]
pub struct ReporteKilometrajeQuery {
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
}

/// Response del reporte de kilometraje de un vehículo en un período
#[derive(Debug, Serialize)]
pub struct ReporteKilometrajeResponse {
    pub patente: String,
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
    pub kilometros_totales: f64,
    pub pruebas_consideradas: usize,
}
