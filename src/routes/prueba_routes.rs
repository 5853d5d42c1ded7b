use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::prueba_dto::{FinalizarPruebaQuery, NuevaPruebaRequest, PruebaResponse};
use crate::dto::ApiResponse;
use crate::services::PruebaService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_prueba_router() -> Router<AppState> {
    Router::new()
        .route("/crear", post(crear_prueba))
        .route("/", get(listar_pruebas))
        .route("/en-curso", get(pruebas_en_curso))
        .route("/:id/finalizar", patch(finalizar_prueba))
        .route("/:id", delete(eliminar_prueba))
}

async fn crear_prueba(
    State(state): State<AppState>,
    Json(request): Json<NuevaPruebaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PruebaResponse>>), AppError> {
    request.validate()?;
    let service = PruebaService::new(state.pool.clone());
    let prueba = service.crear_prueba(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            prueba.into(),
            "Prueba creada exitosamente".to_string(),
        )),
    ))
}

async fn listar_pruebas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PruebaResponse>>, AppError> {
    let service = PruebaService::new(state.pool.clone());
    let pruebas = service.listar_pruebas().await?;
    Ok(Json(pruebas.into_iter().map(PruebaResponse::from).collect()))
}

async fn pruebas_en_curso(
    State(state): State<AppState>,
) -> Result<Json<Vec<PruebaResponse>>, AppError> {
    let service = PruebaService::new(state.pool.clone());
    let pruebas = service.pruebas_en_curso().await?;
    Ok(Json(pruebas.into_iter().map(PruebaResponse::from).collect()))
}

async fn finalizar_prueba(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FinalizarPruebaQuery>,
) -> Result<Json<PruebaResponse>, AppError> {
    query.validate()?;
    let service = PruebaService::new(state.pool.clone());
    let prueba = service.finalizar_prueba(id, &query.comentario).await?;
    Ok(Json(prueba.into()))
}

async fn eliminar_prueba(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = PruebaService::new(state.pool.clone());
    service.eliminar_prueba(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Prueba eliminada exitosamente"
    })))
}
