//! Ingesta de posiciones y evaluación de geocercas
//!
//! Pipeline de una posición entrante: validar el vehículo y su prueba
//! activa, persistir, clasificar contra las restricciones vigentes y, ante
//! una violación, marcar el incidente y encolar la alerta.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::dto::notificacion_dto::NotificacionSeguridadDto;
use crate::dto::posicion_dto::{Clasificacion, NuevaPosicionRequest, PosicionResponse};
use crate::dto::restricciones_dto::RestriccionesDto;
use crate::repositories::{PosicionRepository, PruebaRepository, VehiculoRepository};
use crate::services::notificaciones_service::Notificador;
use crate::services::restricciones_service::RestriccionesCache;
use crate::utils::errors::AppError;
use crate::utils::geo::distancia_haversine_metros;

pub struct PosicionService {
    vehiculos: VehiculoRepository,
    posiciones: PosicionRepository,
    pruebas: PruebaRepository,
    restricciones: Arc<RestriccionesCache>,
    notificador: Notificador,
}

impl PosicionService {
    pub fn new(
        pool: PgPool,
        restricciones: Arc<RestriccionesCache>,
        notificador: Notificador,
    ) -> Self {
        Self {
            vehiculos: VehiculoRepository::new(pool.clone()),
            posiciones: PosicionRepository::new(pool.clone()),
            pruebas: PruebaRepository::new(pool),
            restricciones,
            notificador,
        }
    }

    /// Procesa una posición reportada por un vehículo.
    ///
    /// La posición se persiste antes de consultar las restricciones: si el
    /// servicio externo no está disponible la operación falla con 503 pero el
    /// registro crudo ya quedó guardado.
    pub async fn procesar_posicion(
        &self,
        request: NuevaPosicionRequest,
    ) -> Result<PosicionResponse, AppError> {
        let vehiculo = self
            .vehiculos
            .find_by_id(request.id_vehiculo)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Chequeo de prueba activa + INSERT en una sola transacción
        let posicion = self
            .posiciones
            .crear_en_prueba_activa(vehiculo.id, request.coordenadas.lat, request.coordenadas.lon)
            .await?;

        let restricciones = self.restricciones.obtener().await?;

        let clasificacion = clasificar_posicion(
            request.coordenadas.lat,
            request.coordenadas.lon,
            &restricciones,
        );

        if clasificacion != Clasificacion::Normal {
            info!(
                "🚨 Vehículo {} en posición ({}, {}): {:?}",
                vehiculo.patente, posicion.latitud, posicion.longitud, clasificacion
            );
            // Marca idempotente: violaciones repetidas no reescriben el flag,
            // pero cada una genera su alerta.
            self.pruebas
                .marcar_incidente_en_prueba_activa(vehiculo.id)
                .await?;
            self.notificador.encolar(NotificacionSeguridadDto {
                tipo: clasificacion,
                id_vehiculo: vehiculo.id,
                patente: vehiculo.patente.clone(),
                latitud: posicion.latitud,
                longitud: posicion.longitud,
                mensaje: clasificacion.mensaje().to_string(),
            });
        }

        Ok(PosicionResponse {
            id: posicion.id,
            id_vehiculo: vehiculo.id,
            patente: vehiculo.patente,
            coordenadas: request.coordenadas,
            fecha_hora: posicion.fecha_hora,
            clasificacion,
            mensaje: clasificacion.mensaje().to_string(),
        })
    }

    /// Passthrough de depuración: snapshot vigente de restricciones
    pub async fn restricciones_actuales(&self) -> Result<RestriccionesDto, AppError> {
        self.restricciones.obtener().await
    }
}

/// Clasifica una posición contra las restricciones en orden fijo: primero el
/// radio de la agencia y recién después las zonas peligrosas, cortando en el
/// primer resultado distinto de Normal. Entre zonas solapadas gana la primera
/// del snapshot.
pub fn clasificar_posicion(lat: f64, lon: f64, restricciones: &RestriccionesDto) -> Clasificacion {
    let distancia_a_agencia = distancia_haversine_metros(
        lat,
        lon,
        restricciones.ubicacion_agencia.latitud,
        restricciones.ubicacion_agencia.longitud,
    );
    if distancia_a_agencia > restricciones.radio_maximo_metros {
        return Clasificacion::FueraDeRadio;
    }

    let en_zona_peligrosa = restricciones.zonas_peligrosas.iter().any(|zona| {
        let distancia_al_centro = distancia_haversine_metros(
            lat,
            lon,
            zona.coordenadas.latitud,
            zona.coordenadas.longitud,
        );
        distancia_al_centro <= zona.radio_metros
    });
    if en_zona_peligrosa {
        return Clasificacion::ZonaPeligrosa;
    }

    Clasificacion::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::restricciones_dto::{CoordenadasDto, UbicacionDto, ZonaPeligrosaDto};

    fn restricciones(radio_maximo_metros: f64, zonas: Vec<ZonaPeligrosaDto>) -> RestriccionesDto {
        RestriccionesDto {
            ubicacion_agencia: UbicacionDto {
                latitud: 0.0,
                longitud: 0.0,
            },
            radio_maximo_metros,
            zonas_peligrosas: zonas,
        }
    }

    fn zona(lat: f64, lon: f64, radio_metros: f64) -> ZonaPeligrosaDto {
        ZonaPeligrosaDto {
            id_zona: "z1".to_string(),
            nombre_zona: "Zona de obra".to_string(),
            coordenadas: CoordenadasDto {
                latitud: lat,
                longitud: lon,
            },
            radio_metros,
        }
    }

    #[test]
    fn posicion_cercana_es_normal() {
        // (0.001, 0.001) queda a ~157 m de la agencia, dentro de 1000 m
        let r = restricciones(1000.0, vec![]);
        assert_eq!(clasificar_posicion(0.001, 0.001, &r), Clasificacion::Normal);
    }

    #[test]
    fn posicion_lejana_es_fuera_de_radio() {
        let r = restricciones(1000.0, vec![]);
        assert_eq!(
            clasificar_posicion(10.0, 10.0, &r),
            Clasificacion::FueraDeRadio
        );
    }

    #[test]
    fn centro_de_zona_peligrosa_clasifica_en_zona() {
        // radio máximo grande para aislar el chequeo de zona
        let r = restricciones(2_000_000.0, vec![zona(0.1, 0.1, 100_000.0)]);
        assert_eq!(
            clasificar_posicion(0.1, 0.1, &r),
            Clasificacion::ZonaPeligrosa
        );
    }

    #[test]
    fn el_radio_se_evalua_antes_que_las_zonas() {
        // la posición está dentro de la zona pero también fuera del radio:
        // gana FueraDeRadio por orden de evaluación
        let r = restricciones(1000.0, vec![zona(0.1, 0.1, 100_000.0)]);
        assert_eq!(
            clasificar_posicion(0.1, 0.1, &r),
            Clasificacion::FueraDeRadio
        );
    }

    #[test]
    fn borde_de_zona_cuenta_como_dentro() {
        let r = restricciones(2_000_000.0, vec![zona(0.0, 0.0, 158.0)]);
        // ~157 m del centro, justo dentro del radio de la zona
        assert_eq!(
            clasificar_posicion(0.001, 0.001, &r),
            Clasificacion::ZonaPeligrosa
        );
    }

    #[test]
    fn sin_zonas_y_dentro_del_radio_es_normal() {
        let r = restricciones(2_000_000.0, vec![]);
        assert_eq!(clasificar_posicion(0.1, 0.1, &r), Clasificacion::Normal);
    }
}
