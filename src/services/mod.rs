//! Servicios de negocio
//!
//! Este módulo contiene la lógica de negocio del sistema.

pub mod notificaciones_service;
pub mod posicion_service;
pub mod prueba_service;
pub mod reporte_service;
pub mod restricciones_service;

pub use notificaciones_service::{Notificador, WorkerNotificaciones};
pub use posicion_service::PosicionService;
pub use prueba_service::PruebaService;
pub use reporte_service::ReporteService;
pub use restricciones_service::{
    ClienteRestriccionesHttp, RelojSistema, RestriccionesCache,
};
