//! Despacho de alertas de seguridad
//!
//! Las alertas por violación de geocerca se publican al microservicio de
//! notificaciones con semántica "dispara y olvida": el caller encola sin
//! bloquearse y un worker en background hace el POST. Una falla de entrega se
//! loguea y se descarta; el reintento, si existe, es responsabilidad del
//! microservicio de notificaciones.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::dto::notificacion_dto::NotificacionSeguridadDto;
use crate::dto::posicion_dto::Clasificacion;

/// Extremo productor de la cola de alertas
#[derive(Clone)]
pub struct Notificador {
    tx: mpsc::Sender<NotificacionSeguridadDto>,
}

impl Notificador {
    pub fn new(tx: mpsc::Sender<NotificacionSeguridadDto>) -> Self {
        Self { tx }
    }

    /// Encola una alerta sin bloquear. Si la cola está llena la alerta se
    /// pierde; eso nunca afecta la respuesta del procesamiento de posición.
    pub fn encolar(&self, notificacion: NotificacionSeguridadDto) {
        if let Err(e) = self.tx.try_send(notificacion) {
            warn!("⚠️ Cola de notificaciones llena, alerta descartada: {}", e);
        }
    }
}

/// Worker que drena la cola y entrega las alertas por HTTP
pub struct WorkerNotificaciones {
    rx: mpsc::Receiver<NotificacionSeguridadDto>,
    client: reqwest::Client,
    base_url: String,
}

impl WorkerNotificaciones {
    /// Crea la cola acotada y lanza el worker en background. El worker vive
    /// independiente del request que encoló cada alerta.
    pub fn iniciar(
        capacidad: usize,
        client: reqwest::Client,
        base_url: String,
    ) -> (Notificador, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacidad);
        let worker = Self {
            rx,
            client,
            base_url,
        };
        let handle = tokio::spawn(worker.correr());
        (Notificador::new(tx), handle)
    }

    async fn correr(mut self) {
        info!("📣 Worker de notificaciones iniciado");
        while let Some(notificacion) = self.rx.recv().await {
            self.entregar(notificacion).await;
        }
        info!("📣 Worker de notificaciones terminado");
    }

    async fn entregar(&self, notificacion: NotificacionSeguridadDto) {
        let ruta = match notificacion.tipo {
            Clasificacion::FueraDeRadio => "radio-excedido",
            Clasificacion::ZonaPeligrosa => "zona-peligrosa",
            Clasificacion::Normal => return,
        };
        let url = format!("{}/api/notificaciones/seguridad/{}/new", self.base_url, ruta);

        match self.client.post(&url).json(&notificacion).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(
                    "✅ Alerta entregada para vehículo {} ({})",
                    notificacion.patente, ruta
                );
            }
            Ok(response) => {
                warn!(
                    "⚠️ El servicio de notificaciones respondió {} para vehículo {}",
                    response.status(),
                    notificacion.patente
                );
            }
            Err(e) => {
                warn!(
                    "⚠️ No se pudo entregar la alerta del vehículo {}: {}",
                    notificacion.patente, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn alerta() -> NotificacionSeguridadDto {
        NotificacionSeguridadDto {
            tipo: Clasificacion::FueraDeRadio,
            id_vehiculo: Uuid::new_v4(),
            patente: "AB123CD".to_string(),
            latitud: 10.0,
            longitud: 10.0,
            mensaje: Clasificacion::FueraDeRadio.mensaje().to_string(),
        }
    }

    #[tokio::test]
    async fn encolar_entrega_al_worker() {
        let (tx, mut rx) = mpsc::channel(4);
        let notificador = Notificador::new(tx);

        notificador.encolar(alerta());

        let recibida = rx.recv().await.unwrap();
        assert_eq!(recibida.tipo, Clasificacion::FueraDeRadio);
        assert_eq!(recibida.patente, "AB123CD");
    }

    #[tokio::test]
    async fn encolar_con_cola_llena_no_bloquea() {
        let (tx, _rx) = mpsc::channel(1);
        let notificador = Notificador::new(tx);

        // la segunda alerta no entra; encolar retorna igual sin esperar
        notificador.encolar(alerta());
        notificador.encolar(alerta());
    }

    #[tokio::test]
    async fn la_cola_sobrevive_al_productor() {
        let (tx, mut rx) = mpsc::channel(4);
        {
            let notificador = Notificador::new(tx);
            notificador.encolar(alerta());
            // el productor sale de scope con la alerta todavía en la cola
        }

        assert!(rx.recv().await.is_some());
    }
}
