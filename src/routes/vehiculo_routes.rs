use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::posicion_dto::{NuevaPosicionRequest, PosicionResponse};
use crate::dto::restricciones_dto::RestriccionesDto;
use crate::services::PosicionService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehiculo_router() -> Router<AppState> {
    Router::new()
        .route("/posiciones", post(registrar_posicion))
        .route("/restricciones-actuales", get(restricciones_actuales))
}

async fn registrar_posicion(
    State(state): State<AppState>,
    Json(request): Json<NuevaPosicionRequest>,
) -> Result<Json<PosicionResponse>, AppError> {
    request.validate()?;
    let service = PosicionService::new(
        state.pool.clone(),
        state.restricciones.clone(),
        state.notificador.clone(),
    );
    let response = service.procesar_posicion(request).await?;
    Ok(Json(response))
}

/// Endpoint de depuración: snapshot vigente de restricciones
async fn restricciones_actuales(
    State(state): State<AppState>,
) -> Result<Json<RestriccionesDto>, AppError> {
    let service = PosicionService::new(
        state.pool.clone(),
        state.restricciones.clone(),
        state.notificador.clone(),
    );
    let restricciones = service.restricciones_actuales().await?;
    Ok(Json(restricciones))
}
