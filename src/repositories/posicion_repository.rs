//! Repositorio de posiciones
//!
//! El alta de una posición y la verificación de "vehículo en prueba" forman
//! una sola unidad transaccional: la fila de la prueba activa se toma con
//! FOR SHARE para que una finalización concurrente (FOR UPDATE) no pueda
//! intercalarse entre el chequeo y el INSERT.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Posicion;
use crate::utils::errors::{validation_error, AppError};

pub struct PosicionRepository {
    pool: PgPool,
}

impl PosicionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persiste una posición del vehículo siempre que exista una prueba en
    /// curso para el mismo.
    pub async fn crear_en_prueba_activa(
        &self,
        id_vehiculo: Uuid,
        latitud: f64,
        longitud: f64,
    ) -> Result<Posicion, AppError> {
        let mut tx = self.pool.begin().await?;

        let activa: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM pruebas WHERE id_vehiculo = $1 AND fecha_hora_fin IS NULL FOR SHARE",
        )
        .bind(id_vehiculo)
        .fetch_optional(&mut *tx)
        .await?;

        if activa.is_none() {
            return Err(validation_error(
                "El vehículo no esta siendo probado en este momento. Inicia una prueba para registrar la posicion.",
            ));
        }

        let posicion = sqlx::query_as::<_, Posicion>(
            r#"
            INSERT INTO posiciones (id, id_vehiculo, fecha_hora, latitud, longitud)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id_vehiculo)
        .bind(Utc::now())
        .bind(latitud)
        .bind(longitud)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(posicion)
    }

    /// Posiciones de un vehículo dentro del intervalo cerrado, ordenadas
    /// ascendente por fecha y hora.
    pub async fn find_por_vehiculo_entre(
        &self,
        id_vehiculo: Uuid,
        desde: DateTime<Utc>,
        hasta: DateTime<Utc>,
    ) -> Result<Vec<Posicion>, AppError> {
        let posiciones = sqlx::query_as::<_, Posicion>(
            r#"
            SELECT * FROM posiciones
            WHERE id_vehiculo = $1 AND fecha_hora BETWEEN $2 AND $3
            ORDER BY fecha_hora ASC
            "#,
        )
        .bind(id_vehiculo)
        .bind(desde)
        .bind(hasta)
        .fetch_all(&self.pool)
        .await?;

        Ok(posiciones)
    }
}
