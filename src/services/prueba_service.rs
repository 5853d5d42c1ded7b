//! Lógica de negocio de pruebas de manejo
//!
//! Dueño del ciclo de vida de una prueba: alta con validación de
//! elegibilidad, finalización única, listados y baja.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::prueba_dto::NuevaPruebaRequest;
use crate::models::Prueba;
use crate::repositories::{
    EmpleadoRepository, InteresadoRepository, PruebaRepository, VehiculoRepository,
};
use crate::utils::errors::{validation_error, AppError};

pub struct PruebaService {
    pruebas: PruebaRepository,
    vehiculos: VehiculoRepository,
    interesados: InteresadoRepository,
    empleados: EmpleadoRepository,
}

impl PruebaService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pruebas: PruebaRepository::new(pool.clone()),
            vehiculos: VehiculoRepository::new(pool.clone()),
            interesados: InteresadoRepository::new(pool.clone()),
            empleados: EmpleadoRepository::new(pool),
        }
    }

    /// Crea una prueba si el vehículo está disponible, el interesado es
    /// elegible y el empleado existe. Los chequeos corren en orden fijo y el
    /// primero que falla corta la operación.
    pub async fn crear_prueba(&self, request: NuevaPruebaRequest) -> Result<Prueba, AppError> {
        self.vehiculos
            .find_by_id(request.id_vehiculo)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if self.pruebas.existe_prueba_activa(request.id_vehiculo).await? {
            return Err(validation_error("El vehículo está siendo probado."));
        }

        let interesado = self
            .interesados
            .find_by_id(request.id_interesado)
            .await?
            .ok_or_else(|| AppError::NotFound("Interesado no encontrado".to_string()))?;

        // Sin fecha de vencimiento cargada la licencia no se puede considerar
        // vigente.
        let licencia_vigente = interesado
            .fecha_vencimiento_licencia
            .map_or(false, |vencimiento| vencimiento >= Utc::now());
        if !licencia_vigente {
            return Err(validation_error("La licencia del interesado está vencida."));
        }

        if interesado.restringido {
            return Err(validation_error(
                "El interesado está restringido para probar vehículos.",
            ));
        }

        self.empleados
            .find_by_legajo(request.legajo_empleado)
            .await?
            .ok_or_else(|| AppError::NotFound("Empleado no encontrado".to_string()))?;

        self.pruebas
            .crear(
                request.id_vehiculo,
                request.id_interesado,
                request.legajo_empleado,
            )
            .await
    }

    /// Finaliza una prueba en curso agregando el comentario del empleado.
    /// Finalizar dos veces falla la segunda vez.
    pub async fn finalizar_prueba(&self, id: Uuid, comentario: &str) -> Result<Prueba, AppError> {
        self.pruebas.finalizar(id, comentario).await
    }

    pub async fn pruebas_en_curso(&self) -> Result<Vec<Prueba>, AppError> {
        self.pruebas.find_en_curso().await
    }

    pub async fn listar_pruebas(&self) -> Result<Vec<Prueba>, AppError> {
        self.pruebas.find_all().await
    }

    pub async fn pruebas_con_incidentes(&self) -> Result<Vec<Prueba>, AppError> {
        self.pruebas.find_con_incidentes().await
    }

    pub async fn eliminar_prueba(&self, id: Uuid) -> Result<(), AppError> {
        self.pruebas.eliminar(id).await
    }
}
