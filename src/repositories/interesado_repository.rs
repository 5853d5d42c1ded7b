//! Repositorio de interesados
//!
//! Solo lectura: la elegibilidad del interesado (licencia vigente, no
//! restringido) se valida al crear una prueba.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Interesado;
use crate::utils::errors::AppError;

pub struct InteresadoRepository {
    pool: PgPool,
}

impl InteresadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Interesado>, AppError> {
        let interesado = sqlx::query_as::<_, Interesado>("SELECT * FROM interesados WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(interesado)
    }
}
