//! Repositorio de vehículos
//!
//! Lecturas sobre los datos de referencia de vehículos. El ABM vive en otro
//! servicio; este repositorio nunca escribe.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Vehiculo;
use crate::utils::errors::AppError;

pub struct VehiculoRepository {
    pool: PgPool,
}

impl VehiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehiculo)
    }

    pub async fn find_by_patente(&self, patente: &str) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE patente = $1")
            .bind(patente)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehiculo)
    }
}
