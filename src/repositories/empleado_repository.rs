//! Repositorio de empleados

use sqlx::PgPool;

use crate::models::Empleado;
use crate::utils::errors::AppError;

pub struct EmpleadoRepository {
    pool: PgPool,
}

impl EmpleadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_legajo(&self, legajo: i64) -> Result<Option<Empleado>, AppError> {
        let empleado = sqlx::query_as::<_, Empleado>("SELECT * FROM empleados WHERE legajo = $1")
            .bind(legajo)
            .fetch_optional(&self.pool)
            .await?;

        Ok(empleado)
    }
}
