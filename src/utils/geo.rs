//! Cálculo de distancias geográficas
//!
//! Distancia de círculo máximo entre dos coordenadas usando la fórmula de
//! Haversine. La unidad canónica es el metro; la conversión a kilómetros se
//! hace en el borde que la necesite (reportes).

/// Radio promedio de la Tierra en metros
const RADIO_TERRESTRE_METROS: f64 = 6_371_000.0;

/// Calcula la distancia en metros entre dos puntos geográficos usando la
/// fórmula de Haversine.
pub fn distancia_haversine_metros(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * lat1_rad.cos() * lat2_rad.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    RADIO_TERRESTRE_METROS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distancia_entre_punto_identico_es_cero() {
        assert_eq!(distancia_haversine_metros(-31.4, -64.2, -31.4, -64.2), 0.0);
    }

    #[test]
    fn distancia_es_simetrica() {
        let ida = distancia_haversine_metros(0.0, 0.0, 10.0, 10.0);
        let vuelta = distancia_haversine_metros(10.0, 10.0, 0.0, 0.0);
        assert_eq!(ida, vuelta);
    }

    #[test]
    fn distancia_cerca_del_ecuador() {
        // (0.001, 0.001) queda a ~157 m del origen
        let d = distancia_haversine_metros(0.0, 0.0, 0.001, 0.001);
        assert!((d - 157.0).abs() < 2.0, "distancia inesperada: {}", d);
    }

    #[test]
    fn un_grado_de_latitud_son_unos_111_km() {
        let d = distancia_haversine_metros(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_195.0).abs() < 100.0, "distancia inesperada: {}", d);
    }
}
