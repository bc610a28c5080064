use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Envoltura, Recurso};
use std::marker::PhantomData;
use web_sys::{FormData, RequestCredentials};

/// Generic message for transport-level failures; the real cause goes to the
/// console, the user only needs to know a retry may help.
pub const MENSAJE_RED: &str = "Error de conexión, intente nuevamente";

/// API client for communicating with the backend server.
///
/// Every request carries the session cookie. Failures of any kind
/// (network, HTTP status, `ok:false` envelope) are normalized into
/// `Err(String)` with a user-facing Spanish message.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, ruta: &str) -> String {
        format!("{}/api/{}", self.base_url, ruta)
    }

    /// WebSocket endpoint for the per-user notification push channel.
    pub fn ws_url(&self, usuario_id: i64) -> String {
        let ws_base = self.base_url.replacen("http", "ws", 1);
        format!("{}/ws/notificaciones?usuario_id={}", ws_base, usuario_id)
    }

    /// GET `/api/<ruta>`, expecting `{ok, data: [...]}`.
    pub async fn listar_ruta<T: DeserializeOwned>(&self, ruta: &str) -> Result<Vec<T>, String> {
        let respuesta = Request::get(&self.url(ruta))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// GET `/api/<ruta>`, expecting `{ok, data: {...}}` (a single object,
    /// e.g. the notification feed with its unread counter).
    pub async fn consultar_ruta<T: DeserializeOwned>(&self, ruta: &str) -> Result<T, String> {
        let respuesta = Request::get(&self.url(ruta))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// GET `/api/<ruta>/<id>`, expecting `{ok, data: {...}}`.
    pub async fn obtener_ruta<T: DeserializeOwned>(
        &self,
        ruta: &str,
        id: i64,
    ) -> Result<T, String> {
        let respuesta = Request::get(&format!("{}/{}", self.url(ruta), id))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// POST a JSON payload to `/api/<ruta>`.
    pub async fn crear_ruta<T: DeserializeOwned, B: Serialize>(
        &self,
        ruta: &str,
        cuerpo: &B,
    ) -> Result<T, String> {
        let respuesta = Request::post(&self.url(ruta))
            .credentials(RequestCredentials::Include)
            .json(cuerpo)
            .map_err(|e| format!("No se pudo preparar la solicitud: {}", e))?
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// PUT a JSON payload to `/api/<ruta>/<id>`.
    pub async fn actualizar_ruta<T: DeserializeOwned, B: Serialize>(
        &self,
        ruta: &str,
        id: i64,
        cuerpo: &B,
    ) -> Result<T, String> {
        let respuesta = Request::put(&format!("{}/{}", self.url(ruta), id))
            .credentials(RequestCredentials::Include)
            .json(cuerpo)
            .map_err(|e| format!("No se pudo preparar la solicitud: {}", e))?
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// POST a multipart form (entities carrying an image file) to
    /// `/api/<ruta>`. Numeric fields arrive stringified; empty string means
    /// "no selection" for optional foreign keys.
    pub async fn crear_formulario<T: DeserializeOwned>(
        &self,
        ruta: &str,
        formulario: &FormData,
    ) -> Result<T, String> {
        let respuesta = Request::post(&self.url(ruta))
            .credentials(RequestCredentials::Include)
            .body(formulario.clone())
            .map_err(|e| format!("No se pudo preparar la solicitud: {}", e))?
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// PUT a multipart form to `/api/<ruta>/<id>`.
    pub async fn actualizar_formulario<T: DeserializeOwned>(
        &self,
        ruta: &str,
        id: i64,
        formulario: &FormData,
    ) -> Result<T, String> {
        let respuesta = Request::put(&format!("{}/{}", self.url(ruta), id))
            .credentials(RequestCredentials::Include)
            .body(formulario.clone())
            .map_err(|e| format!("No se pudo preparar la solicitud: {}", e))?
            .send()
            .await
            .map_err(error_de_red)?;
        parse_envoltura(respuesta).await
    }

    /// POST an action endpoint whose envelope carries no data (e.g.
    /// mark-read). Used fire-and-forget by callers that accept eventual
    /// consistency.
    pub async fn ejecutar_ruta<B: Serialize>(&self, ruta: &str, cuerpo: &B) -> Result<(), String> {
        let respuesta = Request::post(&self.url(ruta))
            .credentials(RequestCredentials::Include)
            .json(cuerpo)
            .map_err(|e| format!("No se pudo preparar la solicitud: {}", e))?
            .send()
            .await
            .map_err(error_de_red)?;
        confirmar_envoltura(respuesta).await
    }

    /// DELETE `/api/<ruta>/<id>`. The envelope carries no data.
    pub async fn eliminar_ruta(&self, ruta: &str, id: i64) -> Result<(), String> {
        let respuesta = Request::delete(&format!("{}/{}", self.url(ruta), id))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(error_de_red)?;
        confirmar_envoltura(respuesta).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn error_de_red(e: gloo::net::Error) -> String {
    gloo::console::error!("Fallo de red:", e.to_string());
    MENSAJE_RED.to_string()
}

/// Unwrap the `{ok, data, msg}` envelope. Non-2xx status and `ok:false`
/// both surface the server's `msg` when present, else a generic
/// `Error <status>: <statusText>`.
async fn parse_envoltura<T: DeserializeOwned>(respuesta: Response) -> Result<T, String> {
    let status = respuesta.status();
    let status_text = respuesta.status_text();
    let http_ok = respuesta.ok();
    match respuesta.json::<Envoltura<T>>().await {
        Ok(envoltura) => {
            if http_ok && envoltura.ok {
                envoltura
                    .data
                    .ok_or_else(|| "Respuesta del servidor sin datos".to_string())
            } else {
                Err(envoltura
                    .msg
                    .unwrap_or_else(|| format!("Error {}: {}", status, status_text)))
            }
        }
        Err(_) if !http_ok => Err(format!("Error {}: {}", status, status_text)),
        Err(e) => Err(format!("Respuesta inválida del servidor: {}", e)),
    }
}

/// Same as [`parse_envoltura`] for responses whose `data` is absent.
async fn confirmar_envoltura(respuesta: Response) -> Result<(), String> {
    let status = respuesta.status();
    let status_text = respuesta.status_text();
    let http_ok = respuesta.ok();
    match respuesta.json::<Envoltura<serde_json::Value>>().await {
        Ok(envoltura) if http_ok && envoltura.ok => Ok(()),
        Ok(envoltura) => Err(envoltura
            .msg
            .unwrap_or_else(|| format!("Error {}: {}", status, status_text))),
        Err(_) if !http_ok => Err(format!("Error {}: {}", status, status_text)),
        Err(e) => Err(format!("Respuesta inválida del servidor: {}", e)),
    }
}

/// Typed REST client for one entity collection: the `/api/<recurso>`
/// conventions (List / Get / Create / Update / Delete) parameterized over
/// the entity shape instead of repeated per entity.
pub struct ResourceClient<T> {
    api: ApiClient,
    _entidad: PhantomData<T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _entidad: PhantomData,
        }
    }
}

impl<T> PartialEq for ResourceClient<T> {
    fn eq(&self, otro: &Self) -> bool {
        self.api == otro.api
    }
}

impl<T: Recurso + DeserializeOwned> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _entidad: PhantomData,
        }
    }

    pub async fn listar(&self) -> Result<Vec<T>, String> {
        self.api.listar_ruta(T::RECURSO).await
    }

    pub async fn obtener(&self, id: i64) -> Result<T, String> {
        self.api.obtener_ruta(T::RECURSO, id).await
    }

    pub async fn crear<B: Serialize>(&self, cuerpo: &B) -> Result<T, String> {
        self.api.crear_ruta(T::RECURSO, cuerpo).await
    }

    pub async fn actualizar<B: Serialize>(&self, id: i64, cuerpo: &B) -> Result<T, String> {
        self.api.actualizar_ruta(T::RECURSO, id, cuerpo).await
    }

    pub async fn crear_formulario(&self, formulario: &FormData) -> Result<T, String> {
        self.api.crear_formulario(T::RECURSO, formulario).await
    }

    pub async fn actualizar_formulario(
        &self,
        id: i64,
        formulario: &FormData,
    ) -> Result<T, String> {
        self.api
            .actualizar_formulario(T::RECURSO, id, formulario)
            .await
    }

    pub async fn eliminar(&self, id: i64) -> Result<(), String> {
        self.api.eliminar_ruta(T::RECURSO, id).await
    }
}
