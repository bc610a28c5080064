use serde::{Deserialize, Serialize};
use shared::Notificacion;

/// LocalStorage key for the persisted notification collection.
pub const CLAVE_FEED: &str = "notificaciones.items";
/// LocalStorage key for the persisted unread counter.
pub const CLAVE_NO_LEIDAS: &str = "notificaciones.no_leidas";

/// The notification feed proper: the collection plus the unread counter.
/// These two fields are the only state persisted across sessions; loading
/// flags and the push-channel handle live in the hook and are rebuilt on
/// startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feed {
    pub items: Vec<Notificacion>,
    pub no_leidas: u32,
}

impl Feed {
    /// Full replacement from a fetch: the server's collection and counter
    /// win over anything rehydrated from storage.
    pub fn reemplazar(&mut self, items: Vec<Notificacion>, no_leidas: u32) {
        self.items = items;
        self.no_leidas = no_leidas;
    }

    /// Merge a push-delivered notification: prepended to the existing
    /// collection (not a replacement), duplicates by id ignored, unread
    /// count recomputed from the merged collection.
    pub fn recibir_push(&mut self, notificacion: Notificacion) {
        if self
            .items
            .iter()
            .any(|n| n.notificacion_id == notificacion.notificacion_id)
        {
            return;
        }
        self.items.insert(0, notificacion);
        self.recontar();
    }

    /// Optimistic local mark-read; the matching request is fire-and-forget.
    pub fn marcar_leida(&mut self, id: i64) {
        if let Some(n) = self.items.iter_mut().find(|n| n.notificacion_id == id) {
            n.leida = true;
        }
        self.recontar();
    }

    pub fn marcar_todas_leidas(&mut self) {
        for n in &mut self.items {
            n.leida = true;
        }
        self.no_leidas = 0;
    }

    fn recontar(&mut self) {
        self.no_leidas = self.items.iter().filter(|n| !n.leida).count() as u32;
    }
}

/// Wire shape of a push-channel event. The server emits `new-notification`
/// with the full notification payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventoPush {
    pub evento: String,
    pub data: Notificacion,
}

pub const EVENTO_NUEVA_NOTIFICACION: &str = "new-notification";

#[cfg(test)]
mod tests {
    use super::*;

    fn notificacion(id: i64, leida: bool) -> Notificacion {
        Notificacion {
            notificacion_id: id,
            usuario_id: 1,
            titulo: format!("Aviso {}", id),
            mensaje: "Detalle".to_string(),
            leida,
            fecha: "2024-03-15".to_string(),
        }
    }

    #[test]
    fn test_push_se_antepone_y_recuenta() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![notificacion(1, true), notificacion(2, false)], 1);

        feed.recibir_push(notificacion(3, false));
        assert_eq!(feed.items[0].notificacion_id, 3);
        assert_eq!(feed.items.len(), 3);
        assert_eq!(feed.no_leidas, 2);
    }

    #[test]
    fn test_push_duplicado_se_ignora() {
        let mut feed = Feed::default();
        feed.recibir_push(notificacion(1, false));
        feed.recibir_push(notificacion(1, false));
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.no_leidas, 1);
    }

    #[test]
    fn test_marcar_leida_es_local() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![notificacion(1, false), notificacion(2, false)], 2);

        feed.marcar_leida(1);
        assert!(feed.items.iter().find(|n| n.notificacion_id == 1).unwrap().leida);
        assert_eq!(feed.no_leidas, 1);

        // Unknown id leaves the feed untouched.
        feed.marcar_leida(99);
        assert_eq!(feed.no_leidas, 1);
    }

    #[test]
    fn test_marcar_todas() {
        let mut feed = Feed::default();
        feed.reemplazar(vec![notificacion(1, false), notificacion(2, false)], 2);
        feed.marcar_todas_leidas();
        assert_eq!(feed.no_leidas, 0);
        assert!(feed.items.iter().all(|n| n.leida));
    }

    #[test]
    fn test_evento_push_parsea() {
        let json = r#"{"evento":"new-notification","data":{"notificacion_id":5,"usuario_id":1,"titulo":"Parto próximo","mensaje":"La vaca A-010 está por parir","leida":false,"fecha":"2024-03-15"}}"#;
        let evento: EventoPush = serde_json::from_str(json).unwrap();
        assert_eq!(evento.evento, EVENTO_NUEVA_NOTIFICACION);
        assert_eq!(evento.data.notificacion_id, 5);
    }
}
