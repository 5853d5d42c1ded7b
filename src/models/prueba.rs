//! Modelo de Prueba
//!
//! Una prueba de manejo vincula un vehículo, un interesado y el empleado que
//! la supervisa. Mapea exactamente a la tabla `pruebas`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Prueba de manejo - mapea a la tabla `pruebas`
///
/// Una prueba está "en curso" mientras `fecha_hora_fin` sea NULL. Por
/// vehículo puede existir a lo sumo una prueba en curso a la vez.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prueba {
    pub id: Uuid,
    pub id_vehiculo: Uuid,
    pub id_interesado: Uuid,
    pub legajo_empleado: i64,
    pub fecha_hora_inicio: DateTime<Utc>,
    pub fecha_hora_fin: Option<DateTime<Utc>>,
    pub comentarios: Option<String>,
    pub incidente: bool,
}

impl Prueba {
    /// Una prueba sin fecha de fin sigue en curso
    pub fn en_curso(&self) -> bool {
        self.fecha_hora_fin.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn prueba(fecha_hora_fin: Option<chrono::DateTime<Utc>>) -> Prueba {
        Prueba {
            id: Uuid::new_v4(),
            id_vehiculo: Uuid::new_v4(),
            id_interesado: Uuid::new_v4(),
            legajo_empleado: 1001,
            fecha_hora_inicio: Utc::now(),
            fecha_hora_fin,
            comentarios: None,
            incidente: false,
        }
    }

    #[test]
    fn sin_fecha_de_fin_esta_en_curso() {
        assert!(prueba(None).en_curso());
    }

    #[test]
    fn con_fecha_de_fin_no_esta_en_curso() {
        assert!(!prueba(Some(Utc::now())).en_curso());
    }
}
