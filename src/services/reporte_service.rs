//! Reporte de kilometraje
//!
//! Suma las distancias de círculo máximo entre posiciones consecutivas de
//! cada prueba finalizada de un vehículo dentro de un período. La suma se
//! hace en metros y se convierte a kilómetros recién al armar la respuesta.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::dto::reporte_dto::ReporteKilometrajeResponse;
use crate::models::Posicion;
use crate::repositories::{PosicionRepository, PruebaRepository, VehiculoRepository};
use crate::utils::errors::AppError;
use crate::utils::geo::distancia_haversine_metros;

pub struct ReporteService {
    vehiculos: VehiculoRepository,
    pruebas: PruebaRepository,
    posiciones: PosicionRepository,
}

impl ReporteService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehiculos: VehiculoRepository::new(pool.clone()),
            pruebas: PruebaRepository::new(pool.clone()),
            posiciones: PosicionRepository::new(pool),
        }
    }

    /// Kilometraje total de un vehículo (por patente) sobre sus pruebas
    /// finalizadas dentro del período. El límite `hasta` incluye el día
    /// completo.
    pub async fn kilometraje(
        &self,
        patente: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<ReporteKilometrajeResponse, AppError> {
        let vehiculo = self
            .vehiculos
            .find_by_patente(patente)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehículo con patente {} no encontrado", patente))
            })?;

        let desde_dt = desde.and_time(NaiveTime::MIN).and_utc();
        let hasta_dt = fin_del_dia(hasta);

        let pruebas = self
            .pruebas
            .find_finalizadas_por_vehiculo_en_periodo(vehiculo.id, desde_dt, hasta_dt)
            .await?;

        let mut total_metros = 0.0;
        for prueba in &pruebas {
            let Some(fin) = prueba.fecha_hora_fin else {
                continue;
            };
            let posiciones = self
                .posiciones
                .find_por_vehiculo_entre(vehiculo.id, prueba.fecha_hora_inicio, fin)
                .await?;
            total_metros += sumar_distancias_metros(&posiciones);
        }

        debug!(
            "📏 Kilometraje de {} entre {} y {}: {:.2} km en {} pruebas",
            patente,
            desde,
            hasta,
            total_metros / 1000.0,
            pruebas.len()
        );

        Ok(ReporteKilometrajeResponse {
            patente: vehiculo.patente,
            desde,
            hasta,
            kilometros_totales: total_metros / 1000.0,
            pruebas_consideradas: pruebas.len(),
        })
    }
}

/// Último instante del día: 23:59:59.999
fn fin_del_dia(dia: NaiveDate) -> DateTime<Utc> {
    dia.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::milliseconds(1)
}

/// Suma de distancias entre pares consecutivos. Con menos de dos posiciones
/// no hay tramo que sumar.
fn sumar_distancias_metros(posiciones: &[Posicion]) -> f64 {
    posiciones
        .windows(2)
        .map(|par| {
            distancia_haversine_metros(
                par[0].latitud,
                par[0].longitud,
                par[1].latitud,
                par[1].longitud,
            )
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use uuid::Uuid;

    fn posicion(lat: f64, lon: f64, segundos: i64) -> Posicion {
        Posicion {
            id: Uuid::new_v4(),
            id_vehiculo: Uuid::nil(),
            fecha_hora: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(segundos),
            latitud: lat,
            longitud: lon,
        }
    }

    #[test]
    fn sin_posiciones_suma_cero() {
        assert_eq!(sumar_distancias_metros(&[]), 0.0);
    }

    #[test]
    fn una_sola_posicion_suma_cero() {
        assert_eq!(sumar_distancias_metros(&[posicion(1.0, 1.0, 0)]), 0.0);
    }

    #[test]
    fn el_mismo_punto_repetido_suma_cero() {
        let posiciones = vec![
            posicion(1.0, 1.0, 0),
            posicion(1.0, 1.0, 10),
            posicion(1.0, 1.0, 20),
            posicion(1.0, 1.0, 30),
        ];
        assert_eq!(sumar_distancias_metros(&posiciones), 0.0);
    }

    #[test]
    fn suma_tramos_consecutivos() {
        // dos tramos de ~111 km cada uno sobre el mismo meridiano
        let posiciones = vec![
            posicion(0.0, 0.0, 0),
            posicion(1.0, 0.0, 10),
            posicion(2.0, 0.0, 20),
        ];
        let total = sumar_distancias_metros(&posiciones);
        assert!((total - 222_390.0).abs() < 200.0, "total inesperado: {}", total);
    }

    #[test]
    fn fin_del_dia_es_el_ultimo_milisegundo() {
        let fin = fin_del_dia(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(fin.hour(), 23);
        assert_eq!(fin.minute(), 59);
        assert_eq!(fin.second(), 59);
        assert_eq!(fin.timestamp_subsec_millis(), 999);
        assert_eq!(fin.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }
}
