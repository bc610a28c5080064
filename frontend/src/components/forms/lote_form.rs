use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::rules::opciones_activas;
use crate::services::validation::{id_opcional, requerido, ErroresFormulario};
use serde_json::json;
use shared::{Lote, Potrero};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoteFormProps {
    #[prop_or_default]
    pub editar: Option<Lote>,
    pub potreros: Vec<Potrero>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit form for a batch. The pasture link is optional; the empty
/// selection sends `null`.
#[function_component(LoteForm)]
pub fn lote_form(props: &LoteFormProps) -> Html {
    let nombre = use_state(String::new);
    let potrero_id = use_state(String::new);
    let errores = use_state(ErroresFormulario::default);

    use_effect_with(props.editar.clone(), {
        let nombre = nombre.clone();
        let potrero_id = potrero_id.clone();
        let errores = errores.clone();
        move |editar: &Option<Lote>| {
            if let Some(lote) = editar {
                nombre.set(lote.nombre.clone());
                potrero_id.set(lote.potrero_id.map(|id| id.to_string()).unwrap_or_default());
            } else {
                nombre.set(String::new());
                potrero_id.set(String::new());
            }
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    let potreros = opciones_activas(&props.potreros);
    let editando = props.editar.as_ref().map(|l| l.lote_id);

    let on_submit = {
        let nombre = nombre.clone();
        let potrero_id = potrero_id.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("nombre", requerido(&nombre));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let cuerpo = json!({
                "nombre": nombre.trim(),
                "potrero_id": id_opcional(&potrero_id),
            });

            let al_terminar = {
                let nombre = nombre.clone();
                let potrero_id = potrero_id.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        nombre.set(String::new());
                        potrero_id.set(String::new());
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => {
                        errores.set(ErroresFormulario::desde_servidor(&mensaje));
                    }
                })
            };
            let mutacion = match editando {
                Some(id) => Mutacion::Actualizar(id, cuerpo),
                None => Mutacion::Crear(cuerpo),
            };
            mutate.emit(Envio::con_aviso(mutacion, al_terminar));
        })
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{if editando.is_some() { "Editar lote" } else { "Nuevo lote" }}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="nombre">{"Nombre"}</label>
                        <input type="text" id="nombre" value={(*nombre).clone()}
                            onchange={
                                let nombre = nombre.clone();
                                Callback::from(move |e: Event| nombre.set(valor_input(&e)))
                            }
                            disabled={props.guardando} />
                        {error_campo(&errores, "nombre")}
                    </div>
                    <div class="form-group">
                        <label for="potrero">{"Potrero (opcional)"}</label>
                        <select id="potrero"
                            onchange={
                                let potrero_id = potrero_id.clone();
                                Callback::from(move |e: Event| potrero_id.set(valor_select(&e)))
                            }
                            disabled={props.guardando}>
                            <option value="" selected={potrero_id.is_empty()}>{"Sin potrero"}</option>
                            {for potreros.iter().map(|p| html! {
                                <option value={p.potrero_id.to_string()}
                                    selected={*potrero_id == p.potrero_id.to_string()}>
                                    {&p.nombre}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="modal-actions">
                        <button type="submit" class="btn btn-primary" disabled={props.guardando}>
                            {if props.guardando { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button type="button" class="btn" onclick={
                            let on_close = props.on_close.clone();
                            Callback::from(move |_| on_close.emit(()))
                        }>
                            {"Cancelar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
