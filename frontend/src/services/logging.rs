use gloo::net::http::Request;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy)]
enum Nivel {
    Debug,
    Info,
    Warn,
    Error,
}

impl Nivel {
    fn as_str(&self) -> &'static str {
        match self {
            Nivel::Debug => "debug",
            Nivel::Info => "info",
            Nivel::Warn => "warn",
            Nivel::Error => "error",
        }
    }
}

#[derive(Debug, Serialize)]
struct LineaLog {
    level: &'static str,
    message: String,
    component: Option<String>,
}

/// Fire-and-forget structured logger: ships log lines to the backend's log
/// endpoint so browser-side failures are visible server-side. Errors while
/// logging are swallowed; logging must never take the UI down.
pub struct Logger;

impl Logger {
    pub fn debug(componente: &str, mensaje: &str) {
        Self::enviar(Nivel::Debug, componente, mensaje);
    }

    pub fn info(componente: &str, mensaje: &str) {
        Self::enviar(Nivel::Info, componente, mensaje);
    }

    pub fn warn(componente: &str, mensaje: &str) {
        Self::enviar(Nivel::Warn, componente, mensaje);
    }

    pub fn error(componente: &str, mensaje: &str) {
        Self::enviar(Nivel::Error, componente, mensaje);
    }

    fn enviar(nivel: Nivel, componente: &str, mensaje: &str) {
        let linea = LineaLog {
            level: nivel.as_str(),
            message: mensaje.to_string(),
            component: Some(componente.to_string()),
        };

        // Send asynchronously without blocking the caller.
        spawn_local(async move {
            if let Ok(solicitud) = Request::post("http://localhost:3000/api/logs").json(&linea) {
                let _ = solicitud.send().await;
            }
        });
    }
}
