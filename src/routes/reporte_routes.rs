use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::dto::prueba_dto::PruebaResponse;
use crate::dto::reporte_dto::{ReporteKilometrajeQuery, ReporteKilometrajeResponse};
use crate::services::{PruebaService, ReporteService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reporte_router() -> Router<AppState> {
    Router::new()
        .route("/kilometraje/:patente", get(reporte_kilometraje))
        .route("/incidentes", get(pruebas_con_incidentes))
}

async fn reporte_kilometraje(
    State(state): State<AppState>,
    Path(patente): Path<String>,
    Query(query): Query<ReporteKilometrajeQuery>,
) -> Result<Json<ReporteKilometrajeResponse>, AppError> {
    let service = ReporteService::new(state.pool.clone());
    let reporte = service
        .kilometraje(&patente, query.desde, query.hasta)
        .await?;
    Ok(Json(reporte))
}

async fn pruebas_con_incidentes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PruebaResponse>>, AppError> {
    let service = PruebaService::new(state.pool.clone());
    let pruebas = service.pruebas_con_incidentes().await?;
    Ok(Json(pruebas.into_iter().map(PruebaResponse::from).collect()))
}
