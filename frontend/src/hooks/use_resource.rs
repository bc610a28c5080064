use crate::services::api::{ApiClient, ResourceClient};
use crate::services::store::ResourceState;
use serde::de::DeserializeOwned;
use shared::Recurso;
use wasm_bindgen_futures::spawn_local;
use web_sys::FormData;
use yew::prelude::*;

/// A write operation against the store's REST resource. Multipart variants
/// exist for the entities that carry an image file.
#[derive(Clone, PartialEq)]
pub enum Mutacion {
    Crear(serde_json::Value),
    Actualizar(i64, serde_json::Value),
    CrearFormulario(FormData),
    ActualizarFormulario(i64, FormData),
    Eliminar(i64),
}

/// A mutation plus the callback told how it went. Forms reset their fields
/// on `Ok` and route the message to a field or banner on `Err`; list-side
/// deletes pass a no-op and rely on the store's `save_error`.
#[derive(Clone, PartialEq)]
pub struct Envio {
    pub mutacion: Mutacion,
    pub al_terminar: Callback<Result<(), String>>,
}

impl Envio {
    pub fn nuevo(mutacion: Mutacion) -> Self {
        Self {
            mutacion,
            al_terminar: Callback::noop(),
        }
    }

    pub fn con_aviso(mutacion: Mutacion, al_terminar: Callback<Result<(), String>>) -> Self {
        Self {
            mutacion,
            al_terminar,
        }
    }
}

pub struct UseResourceResult<T> {
    pub state: ResourceState<T>,
    pub actions: UseResourceActions,
}

#[derive(Clone, PartialEq)]
pub struct UseResourceActions {
    pub refresh: Callback<()>,
    pub mutate: Callback<Envio>,
}

/// Single source of truth for one server-backed collection.
///
/// The authoritative [`ResourceState`] lives in a `use_mut_ref` cell: the
/// callbacks are built once, and a state handle captured then would keep
/// dereferencing to the first render's snapshot, which would defeat the
/// loading guard. The `use_state` copy exists only to drive re-renders.
///
/// `refresh` is a no-op while a fetch is in flight, so any number of
/// consumers can trigger it on mount. Every mutation goes through the
/// store: the save guard drops double submissions, and every success
/// refetches the whole collection; there is no optimistic local patch,
/// correctness over latency.
#[hook]
pub fn use_resource<T>(api: &ApiClient) -> UseResourceResult<T>
where
    T: Recurso + DeserializeOwned + Clone + PartialEq + 'static,
{
    let celda = use_mut_ref(ResourceState::<T>::default);
    let estado = use_state(ResourceState::<T>::default);
    let cliente = ResourceClient::<T>::new(api.clone());

    let refresh = {
        let celda = celda.clone();
        let estado = estado.clone();
        let cliente = cliente.clone();

        use_callback((), move |_, _| {
            if !celda.borrow_mut().begin_fetch() {
                // Already loading, another consumer got here first.
                return;
            }
            estado.set(celda.borrow().clone());

            let celda = celda.clone();
            let estado = estado.clone();
            let cliente = cliente.clone();
            spawn_local(async move {
                let resultado = cliente.listar().await;
                if let Err(mensaje) = &resultado {
                    gloo::console::error!("Fallo al cargar", T::RECURSO, mensaje.clone());
                }
                celda.borrow_mut().finish_fetch(resultado);
                estado.set(celda.borrow().clone());
            });
        })
    };

    let mutate = {
        let celda = celda.clone();
        let estado = estado.clone();
        let cliente = cliente.clone();
        let refresh = refresh.clone();

        use_callback((), move |envio: Envio, _| {
            if !celda.borrow_mut().begin_save() {
                // A submission is already in flight; the disabled submit
                // control makes this a double-click.
                return;
            }
            estado.set(celda.borrow().clone());

            let Envio {
                mutacion,
                al_terminar,
            } = envio;
            let celda = celda.clone();
            let estado = estado.clone();
            let cliente = cliente.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let resultado = match mutacion {
                    Mutacion::Crear(cuerpo) => cliente.crear(&cuerpo).await.map(|_| ()),
                    Mutacion::Actualizar(id, cuerpo) => {
                        cliente.actualizar(id, &cuerpo).await.map(|_| ())
                    }
                    Mutacion::CrearFormulario(formulario) => {
                        cliente.crear_formulario(&formulario).await.map(|_| ())
                    }
                    Mutacion::ActualizarFormulario(id, formulario) => cliente
                        .actualizar_formulario(id, &formulario)
                        .await
                        .map(|_| ()),
                    Mutacion::Eliminar(id) => cliente.eliminar(id).await,
                };

                let exito = resultado.is_ok();
                celda.borrow_mut().finish_save(resultado.clone());
                estado.set(celda.borrow().clone());
                al_terminar.emit(resultado);

                if exito {
                    // Resynchronize this collection (and, through renders,
                    // everything derived from it).
                    refresh.emit(());
                }
            });
        })
    };

    // Initial load
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseResourceResult {
        state: (*estado).clone(),
        actions: UseResourceActions { refresh, mutate },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_envio_entrega_el_resultado_al_formulario() {
        let recibido = Rc::new(RefCell::new(None));
        let al_terminar = {
            let recibido = recibido.clone();
            Callback::from(move |r: Result<(), String>| *recibido.borrow_mut() = Some(r))
        };

        let envio = Envio::con_aviso(Mutacion::Eliminar(3), al_terminar);
        envio.al_terminar.emit(Err("Stock insuficiente".to_string()));
        assert_eq!(
            *recibido.borrow(),
            Some(Err("Stock insuficiente".to_string()))
        );
    }

    #[test]
    fn test_envio_de_lista_no_exige_aviso() {
        // Delete buttons fire-and-forget; the store's save_error carries
        // any failure to the section banner.
        let envio = Envio::nuevo(Mutacion::Eliminar(7));
        envio.al_terminar.emit(Ok(()));
    }
}
