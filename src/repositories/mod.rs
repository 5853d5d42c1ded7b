//! Repositorios
//!
//! Acceso a datos sobre PostgreSQL vía sqlx.

pub mod empleado_repository;
pub mod interesado_repository;
pub mod posicion_repository;
pub mod prueba_repository;
pub mod vehiculo_repository;

pub use empleado_repository::EmpleadoRepository;
pub use interesado_repository::InteresadoRepository;
pub use posicion_repository::PosicionRepository;
pub use prueba_repository::PruebaRepository;
pub use vehiculo_repository::VehiculoRepository;
