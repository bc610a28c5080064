use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::notificaciones::{
    EventoPush, Feed, CLAVE_FEED, CLAVE_NO_LEIDAS, EVENTO_NUEVA_NOTIFICACION,
};
use futures::StreamExt;
use gloo::net::websocket::{futures::WebSocket, Message};
use gloo::storage::{LocalStorage, Storage};
use serde_json::json;
use shared::{FeedNotificaciones, Notificacion};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone)]
pub struct NotificacionesState {
    pub feed: Feed,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseNotificacionesResult {
    pub state: NotificacionesState,
    pub actions: UseNotificacionesActions,
}

#[derive(Clone, PartialEq)]
pub struct UseNotificacionesActions {
    pub fetch: Callback<i64>,
    pub marcar_leida: Callback<i64>,
    pub marcar_todas: Callback<i64>,
}

fn persistir(feed: &Feed) {
    // Only the collection and the unread counter survive across sessions.
    let _ = LocalStorage::set(CLAVE_FEED, &feed.items);
    let _ = LocalStorage::set(CLAVE_NO_LEIDAS, feed.no_leidas);
}

fn rehidratar() -> Feed {
    let items: Vec<Notificacion> = LocalStorage::get(CLAVE_FEED).unwrap_or_default();
    let no_leidas: u32 = LocalStorage::get(CLAVE_NO_LEIDAS).unwrap_or_default();
    Feed { items, no_leidas }
}

/// One-time browser notification permission request; skipped once the user
/// has decided either way.
fn pedir_permiso() {
    if web_sys::Notification::permission() == web_sys::NotificationPermission::Default {
        let _ = web_sys::Notification::request_permission();
    }
}

/// The current user's notification feed, synchronized two ways: explicit
/// fetch and a per-user push channel. Pushed items are merged (prepended),
/// never a full replacement. Mark-read mutations are optimistic and
/// fire-and-forget; an accepted inconsistency for a low-stakes feature.
///
/// The authoritative `Feed` lives in a `use_mut_ref` cell shared by the
/// fetch path, the mark-read paths and the socket read loop; the `use_state`
/// copy only drives re-renders (a handle captured by these once-built
/// callbacks would deref to the first render's snapshot).
#[hook]
pub fn use_notificaciones(api: &ApiClient) -> UseNotificacionesResult {
    let celda = use_mut_ref(rehidratar);
    let feed = use_state({
        let celda = celda.clone();
        move || celda.borrow().clone()
    });
    let loading = use_state(|| false);
    let error = use_state(|| Option::<String>::None);
    // In-flight and channel flags read by the once-built callbacks.
    let cargando = use_mut_ref(|| false);
    let canal_abierto = use_mut_ref(|| false);
    let api = api.clone();

    let fetch = {
        let celda = celda.clone();
        let feed = feed.clone();
        let loading = loading.clone();
        let error = error.clone();
        let cargando = cargando.clone();
        let canal_abierto = canal_abierto.clone();
        let api = api.clone();

        use_callback((), move |usuario_id: i64, _| {
            if *cargando.borrow() {
                return;
            }
            *cargando.borrow_mut() = true;
            loading.set(true);

            if !*canal_abierto.borrow() {
                *canal_abierto.borrow_mut() = true;
                abrir_canal(&api, usuario_id, celda.clone(), feed.clone());
                pedir_permiso();
            }

            let celda = celda.clone();
            let feed = feed.clone();
            let loading = loading.clone();
            let error = error.clone();
            let cargando = cargando.clone();
            let api = api.clone();
            spawn_local(async move {
                let ruta = format!("notificaciones?usuario_id={}", usuario_id);
                match api.consultar_ruta::<FeedNotificaciones>(&ruta).await {
                    Ok(datos) => {
                        let mut actual = celda.borrow_mut();
                        actual.reemplazar(datos.notificaciones, datos.no_leidas);
                        persistir(&actual);
                        feed.set(actual.clone());
                        drop(actual);
                        error.set(None);
                    }
                    Err(mensaje) => {
                        Logger::warn("notificaciones", &mensaje);
                        error.set(Some(mensaje));
                    }
                }
                *cargando.borrow_mut() = false;
                loading.set(false);
            });
        })
    };

    let marcar_leida = {
        let celda = celda.clone();
        let feed = feed.clone();
        let api = api.clone();

        use_callback((), move |id: i64, _| {
            // Optimistic: local state first, request fired without waiting
            // for (or rolling back on) the outcome.
            {
                let mut actual = celda.borrow_mut();
                actual.marcar_leida(id);
                persistir(&actual);
                feed.set(actual.clone());
            }

            let api = api.clone();
            spawn_local(async move {
                let ruta = format!("notificaciones/{}/leida", id);
                if let Err(mensaje) = api.ejecutar_ruta(&ruta, &json!({})).await {
                    Logger::warn("notificaciones", &mensaje);
                }
            });
        })
    };

    let marcar_todas = {
        let celda = celda.clone();
        let feed = feed.clone();
        let api = api.clone();

        use_callback((), move |usuario_id: i64, _| {
            {
                let mut actual = celda.borrow_mut();
                actual.marcar_todas_leidas();
                persistir(&actual);
                feed.set(actual.clone());
            }

            let api = api.clone();
            spawn_local(async move {
                let cuerpo = json!({ "usuario_id": usuario_id });
                if let Err(mensaje) = api.ejecutar_ruta("notificaciones/leidas", &cuerpo).await {
                    Logger::warn("notificaciones", &mensaje);
                }
            });
        })
    };

    UseNotificacionesResult {
        state: NotificacionesState {
            feed: (*feed).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        actions: UseNotificacionesActions {
            fetch,
            marcar_leida,
            marcar_todas,
        },
    }
}

/// Open the per-user push channel and merge every `new-notification` event
/// into the feed. The read loop ends silently when the socket closes; the
/// next fetch reopens nothing (the session keeps its single channel).
fn abrir_canal(
    api: &ApiClient,
    usuario_id: i64,
    celda: Rc<RefCell<Feed>>,
    feed: UseStateHandle<Feed>,
) {
    let url = api.ws_url(usuario_id);
    let socket = match WebSocket::open(&url) {
        Ok(socket) => socket,
        Err(e) => {
            Logger::warn("notificaciones", &format!("Canal no disponible: {:?}", e));
            return;
        }
    };

    spawn_local(async move {
        let (_escritura, mut lectura) = socket.split();
        while let Some(mensaje) = lectura.next().await {
            let texto = match mensaje {
                Ok(Message::Text(texto)) => texto,
                Ok(Message::Bytes(_)) => continue,
                Err(_) => break,
            };
            match serde_json::from_str::<EventoPush>(&texto) {
                Ok(evento) if evento.evento == EVENTO_NUEVA_NOTIFICACION => {
                    let mut actual = celda.borrow_mut();
                    actual.recibir_push(evento.data);
                    persistir(&actual);
                    feed.set(actual.clone());
                }
                Ok(_) => {}
                Err(e) => {
                    Logger::warn("notificaciones", &format!("Evento inválido: {}", e));
                }
            }
        }
    });
}
