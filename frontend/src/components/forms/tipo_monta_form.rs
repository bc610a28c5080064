use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::rules::padres_validos;
use crate::services::validation::{id_opcional, requerido, ErroresFormulario};
use serde_json::json;
use shared::TipoMonta;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TipoMontaFormProps {
    #[prop_or_default]
    pub editar: Option<TipoMonta>,
    pub tipos: Vec<TipoMonta>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit form for a breeding-event type. The parent selector never
/// offers the node being edited or anything below it, so the tree cannot be
/// cycled from here.
#[function_component(TipoMontaForm)]
pub fn tipo_monta_form(props: &TipoMontaFormProps) -> Html {
    let nombre = use_state(String::new);
    let padre_id = use_state(String::new);
    let errores = use_state(ErroresFormulario::default);

    use_effect_with(props.editar.clone(), {
        let nombre = nombre.clone();
        let padre_id = padre_id.clone();
        let errores = errores.clone();
        move |editar: &Option<TipoMonta>| {
            if let Some(tipo) = editar {
                nombre.set(tipo.nombre.clone());
                padre_id.set(tipo.padre_id.map(|id| id.to_string()).unwrap_or_default());
            } else {
                nombre.set(String::new());
                padre_id.set(String::new());
            }
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    let editando = props.editar.as_ref().map(|t| t.tipo_monta_id);
    let padres = padres_validos(&props.tipos, editando);

    let on_submit = {
        let nombre = nombre.clone();
        let padre_id = padre_id.clone();
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
                "padre_id": id_opcional(&padre_id),
            });

            let al_terminar = {
                let nombre = nombre.clone();
                let padre_id = padre_id.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        nombre.set(String::new());
                        padre_id.set(String::new());
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
                <h3>{if editando.is_some() { "Editar tipo de monta" } else { "Nuevo tipo de monta" }}</h3>
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
                        <label for="padre">{"Tipo padre (opcional)"}</label>
                        <select id="padre"
                            onchange={
                                let padre_id = padre_id.clone();
                                Callback::from(move |e: Event| padre_id.set(valor_select(&e)))
                            }
                            disabled={props.guardando}>
                            <option value="" selected={padre_id.is_empty()}>{"Sin padre"}</option>
                            {for padres.iter().map(|t| html! {
                                <option value={t.tipo_monta_id.to_string()}
                                    selected={*padre_id == t.tipo_monta_id.to_string()}>
                                    {&t.nombre}
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
