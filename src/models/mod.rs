//! Modelos de dominio
//!
//! Este módulo contiene las entidades persistidas y los datos de referencia
//! de solo lectura.

pub mod posicion;
pub mod prueba;
pub mod referencias;

pub use posicion::Posicion;
pub use prueba::Prueba;
pub use referencias::{Empleado, Interesado, Vehiculo};
