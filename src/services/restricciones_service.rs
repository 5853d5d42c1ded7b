//! Cache de restricciones de la agencia
//!
//! Las restricciones (radio permitido + zonas peligrosas) las publica un
//! servicio externo y valen para toda la agencia, así que el cache tiene una
//! única entrada global con TTL. El refresco ocurre con el lock tomado: ante
//! N misses concurrentes sale una sola llamada externa y el resto espera el
//! snapshot fresco.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dto::restricciones_dto::RestriccionesDto;
use crate::utils::errors::AppError;

/// Fuente del snapshot de restricciones
#[async_trait]
pub trait ProveedorRestricciones: Send + Sync {
    async fn obtener_restricciones(&self) -> Result<RestriccionesDto, AppError>;
}

/// Cliente HTTP contra el microservicio de restricciones
pub struct ClienteRestriccionesHttp {
    client: reqwest::Client,
    url: String,
}

impl ClienteRestriccionesHttp {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ProveedorRestricciones for ClienteRestriccionesHttp {
    async fn obtener_restricciones(&self) -> Result<RestriccionesDto, AppError> {
        debug!("🌐 Consultando restricciones en {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            AppError::ServiceUnavailable(format!(
                "No se pudieron obtener las restricciones desde el servicio externo: {}",
                e
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ServiceUnavailable(format!(
                "El servicio de restricciones respondió {}",
                status
            )));
        }

        // Un body vacío o malformado también es indisponibilidad: nunca se
        // fabrica un snapshot sin datos.
        let restricciones = response.json::<RestriccionesDto>().await.map_err(|e| {
            AppError::ServiceUnavailable(format!(
                "Respuesta inválida del servicio de restricciones: {}",
                e
            ))
        })?;

        Ok(restricciones)
    }
}

/// Fuente de tiempo inyectable para poder testear la expiración
pub trait FuenteDeTiempo: Send + Sync {
    fn ahora(&self) -> Instant;
}

/// Reloj real del sistema
pub struct RelojSistema;

impl FuenteDeTiempo for RelojSistema {
    fn ahora(&self) -> Instant {
        Instant::now()
    }
}

struct Snapshot {
    restricciones: RestriccionesDto,
    obtenido_en: Instant,
}

/// Cache de entrada única con TTL y refresco single-flight
pub struct RestriccionesCache {
    proveedor: Arc<dyn ProveedorRestricciones>,
    reloj: Arc<dyn FuenteDeTiempo>,
    ttl: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl RestriccionesCache {
    pub fn new(
        proveedor: Arc<dyn ProveedorRestricciones>,
        reloj: Arc<dyn FuenteDeTiempo>,
        ttl: Duration,
    ) -> Self {
        Self {
            proveedor,
            reloj,
            ttl,
            snapshot: Mutex::new(None),
        }
    }

    /// Devuelve el snapshot vigente, refrescándolo si expiró. Un refresco
    /// fallido no deja datos viejos en circulación: la entrada expirada se
    /// descarta y el error llega al caller.
    pub async fn obtener(&self) -> Result<RestriccionesDto, AppError> {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref() {
            if self.reloj.ahora().duration_since(snapshot.obtenido_en) < self.ttl {
                debug!("📥 Cache HIT de restricciones");
                return Ok(snapshot.restricciones.clone());
            }
            debug!("⏰ Snapshot de restricciones expirado, refrescando");
            *guard = None;
        }

        match self.proveedor.obtener_restricciones().await {
            Ok(restricciones) => {
                info!(
                    "✅ Restricciones refrescadas ({} zonas peligrosas)",
                    restricciones.zonas_peligrosas.len()
                );
                *guard = Some(Snapshot {
                    restricciones: restricciones.clone(),
                    obtenido_en: self.reloj.ahora(),
                });
                Ok(restricciones)
            }
            Err(e) => {
                warn!("❌ Refresco de restricciones falló: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::restricciones_dto::UbicacionDto;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn restricciones_de_ejemplo() -> RestriccionesDto {
        RestriccionesDto {
            ubicacion_agencia: UbicacionDto {
                latitud: -31.4,
                longitud: -64.2,
            },
            radio_maximo_metros: 5000.0,
            zonas_peligrosas: vec![],
        }
    }

    /// Proveedor que cuenta llamadas y puede simular demora o falla
    struct ProveedorContador {
        llamadas: AtomicU64,
        demora: Duration,
        falla: bool,
    }

    impl ProveedorContador {
        fn nuevo(demora: Duration, falla: bool) -> Arc<Self> {
            Arc::new(Self {
                llamadas: AtomicU64::new(0),
                demora,
                falla,
            })
        }
    }

    #[async_trait]
    impl ProveedorRestricciones for ProveedorContador {
        async fn obtener_restricciones(&self) -> Result<RestriccionesDto, AppError> {
            self.llamadas.fetch_add(1, Ordering::SeqCst);
            if !self.demora.is_zero() {
                tokio::time::sleep(self.demora).await;
            }
            if self.falla {
                return Err(AppError::ServiceUnavailable(
                    "servicio de restricciones caído".to_string(),
                ));
            }
            Ok(restricciones_de_ejemplo())
        }
    }

    /// Reloj falso que avanza manualmente
    struct RelojFalso {
        base: Instant,
        offset_ms: AtomicU64,
    }

    impl RelojFalso {
        fn nuevo() -> Arc<Self> {
            Arc::new(Self {
                base: Instant::now(),
                offset_ms: AtomicU64::new(0),
            })
        }

        fn avanzar(&self, d: Duration) {
            self.offset_ms
                .fetch_add(d.as_millis() as u64, Ordering::SeqCst);
        }
    }

    impl FuenteDeTiempo for RelojFalso {
        fn ahora(&self) -> Instant {
            self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn sirve_desde_cache_dentro_del_ttl() {
        let proveedor = ProveedorContador::nuevo(Duration::ZERO, false);
        let reloj = RelojFalso::nuevo();
        let cache = RestriccionesCache::new(
            proveedor.clone(),
            reloj.clone(),
            Duration::from_secs(60),
        );

        cache.obtener().await.unwrap();
        reloj.avanzar(Duration::from_secs(30));
        cache.obtener().await.unwrap();

        assert_eq!(proveedor.llamadas.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresca_despues_de_expirar() {
        let proveedor = ProveedorContador::nuevo(Duration::ZERO, false);
        let reloj = RelojFalso::nuevo();
        let cache = RestriccionesCache::new(
            proveedor.clone(),
            reloj.clone(),
            Duration::from_secs(60),
        );

        cache.obtener().await.unwrap();
        reloj.avanzar(Duration::from_secs(61));
        cache.obtener().await.unwrap();

        assert_eq!(proveedor.llamadas.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn misses_concurrentes_hacen_una_sola_llamada_externa() {
        let proveedor = ProveedorContador::nuevo(Duration::from_millis(50), false);
        let cache = Arc::new(RestriccionesCache::new(
            proveedor.clone(),
            Arc::new(RelojSistema),
            Duration::from_secs(60),
        ));

        let tareas: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.obtener().await })
            })
            .collect();

        for tarea in tareas {
            tarea.await.unwrap().unwrap();
        }

        assert_eq!(proveedor.llamadas.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falla_del_proveedor_no_sirve_datos_viejos() {
        let proveedor_ok = ProveedorContador::nuevo(Duration::ZERO, false);
        let reloj = RelojFalso::nuevo();
        let cache = RestriccionesCache::new(
            proveedor_ok.clone(),
            reloj.clone(),
            Duration::from_secs(60),
        );
        cache.obtener().await.unwrap();

        // mismo cache pero ahora el proveedor falla y el snapshot expiró
        let cache = RestriccionesCache {
            proveedor: ProveedorContador::nuevo(Duration::ZERO, true),
            reloj: reloj.clone(),
            ttl: Duration::from_secs(60),
            snapshot: Mutex::new(
                cache.snapshot.into_inner(),
            ),
        };
        reloj.avanzar(Duration::from_secs(61));

        let resultado = cache.obtener().await;
        assert!(matches!(resultado, Err(AppError::ServiceUnavailable(_))));
    }
}
