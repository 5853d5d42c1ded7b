//! Repositorio de pruebas
//!
//! Acceso a la tabla `pruebas`. La invariante "a lo sumo una prueba en curso
//! por vehículo" la arbitra el índice único parcial
//! `pruebas_vehiculo_activa_idx`; acá solo se traduce el conflicto a un error
//! de validación con el mismo mensaje que el chequeo previo.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Prueba;
use crate::utils::errors::{validation_error, AppError};

/// Nombre del índice único parcial sobre (id_vehiculo) WHERE fecha_hora_fin IS NULL
const INDICE_PRUEBA_ACTIVA: &str = "pruebas_vehiculo_activa_idx";

pub struct PruebaRepository {
    pool: PgPool,
}

impl PruebaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Consulta si existe alguna prueba del vehículo con fecha de fin nula,
    /// es decir, en curso.
    pub async fn existe_prueba_activa(&self, id_vehiculo: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pruebas WHERE id_vehiculo = $1 AND fecha_hora_fin IS NULL)",
        )
        .bind(id_vehiculo)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Prueba>, AppError> {
        let prueba = sqlx::query_as::<_, Prueba>("SELECT * FROM pruebas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(prueba)
    }

    pub async fn crear(
        &self,
        id_vehiculo: Uuid,
        id_interesado: Uuid,
        legajo_empleado: i64,
    ) -> Result<Prueba, AppError> {
        let prueba = sqlx::query_as::<_, Prueba>(
            r#"
            INSERT INTO pruebas (id, id_vehiculo, id_interesado, legajo_empleado, fecha_hora_inicio, incidente)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id_vehiculo)
        .bind(id_interesado)
        .bind(legajo_empleado)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Dos altas casi simultáneas para el mismo vehículo: la segunda
            // choca contra el índice parcial y recibe el mismo error que el
            // chequeo previo de disponibilidad.
            sqlx::Error::Database(db) if db.constraint() == Some(INDICE_PRUEBA_ACTIVA) => {
                validation_error("El vehículo está siendo probado.")
            }
            _ => AppError::Database(e),
        })?;

        Ok(prueba)
    }

    /// Finaliza una prueba en curso. La fila se bloquea con FOR UPDATE para
    /// que una escritura de posición concurrente no la observe como activa a
    /// mitad de camino.
    pub async fn finalizar(&self, id: Uuid, comentario: &str) -> Result<Prueba, AppError> {
        let mut tx = self.pool.begin().await?;

        let actual = sqlx::query_as::<_, Prueba>("SELECT * FROM pruebas WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Prueba no encontrada".to_string()))?;

        if actual.fecha_hora_fin.is_some() {
            return Err(validation_error("La prueba ya ha sido finalizada."));
        }

        let prueba = sqlx::query_as::<_, Prueba>(
            r#"
            UPDATE pruebas
            SET fecha_hora_fin = $2, comentarios = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .bind(comentario)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(prueba)
    }

    pub async fn find_en_curso(&self) -> Result<Vec<Prueba>, AppError> {
        let pruebas = sqlx::query_as::<_, Prueba>(
            "SELECT * FROM pruebas WHERE fecha_hora_fin IS NULL ORDER BY fecha_hora_inicio DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pruebas)
    }

    pub async fn find_all(&self) -> Result<Vec<Prueba>, AppError> {
        let pruebas =
            sqlx::query_as::<_, Prueba>("SELECT * FROM pruebas ORDER BY fecha_hora_inicio DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(pruebas)
    }

    pub async fn find_con_incidentes(&self) -> Result<Vec<Prueba>, AppError> {
        let pruebas = sqlx::query_as::<_, Prueba>(
            "SELECT * FROM pruebas WHERE incidente = TRUE ORDER BY fecha_hora_inicio DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pruebas)
    }

    /// Pruebas finalizadas de un vehículo que se solapan con el período dado
    pub async fn find_finalizadas_por_vehiculo_en_periodo(
        &self,
        id_vehiculo: Uuid,
        desde: chrono::DateTime<Utc>,
        hasta: chrono::DateTime<Utc>,
    ) -> Result<Vec<Prueba>, AppError> {
        let pruebas = sqlx::query_as::<_, Prueba>(
            r#"
            SELECT * FROM pruebas
            WHERE id_vehiculo = $1
              AND fecha_hora_fin IS NOT NULL
              AND fecha_hora_inicio <= $3
              AND fecha_hora_fin >= $2
            ORDER BY fecha_hora_inicio ASC
            "#,
        )
        .bind(id_vehiculo)
        .bind(desde)
        .bind(hasta)
        .fetch_all(&self.pool)
        .await?;

        Ok(pruebas)
    }

    /// Marca el incidente de la prueba activa del vehículo. Idempotente: si
    /// ya estaba marcada no toca la fila.
    pub async fn marcar_incidente_en_prueba_activa(
        &self,
        id_vehiculo: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE pruebas
            SET incidente = TRUE
            WHERE id_vehiculo = $1 AND fecha_hora_fin IS NULL AND incidente = FALSE
            "#,
        )
        .bind(id_vehiculo)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pruebas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Prueba no encontrada".to_string()));
        }

        Ok(())
    }
}
