use crate::components::forms::{banner_error, error_campo, valor_input};
use crate::hooks::{Envio, Mutacion};
use crate::services::validation::{requerido, ErroresFormulario};
use serde_json::json;
use yew::prelude::*;

/// One form for every name-only reference entity (potreros, proveedores,
/// razas, tipos de insumo, unidades de medida, mataderos). The caller picks
/// the store; the payload is always `{"nombre": ...}`.
#[derive(Properties, PartialEq)]
pub struct CatalogoFormProps {
    pub titulo: AttrValue,
    /// `(id, nombre)` of the record being edited, if any.
    #[prop_or_default]
    pub editar: Option<(i64, String)>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(CatalogoForm)]
pub fn catalogo_form(props: &CatalogoFormProps) -> Html {
    let nombre = use_state(String::new);
    let errores = use_state(ErroresFormulario::default);

    // Seed the field when switching between create and edit targets.
    use_effect_with(props.editar.clone(), {
        let nombre = nombre.clone();
        let errores = errores.clone();
        move |editar: &Option<(i64, String)>| {
            nombre.set(editar.as_ref().map(|(_, n)| n.clone()).unwrap_or_default());
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    let on_nombre_change = {
        let nombre = nombre.clone();
        Callback::from(move |e: Event| {
            nombre.set(valor_input(&e));
        })
    };

    let on_submit = {
        let nombre = nombre.clone();
        let errores = errores.clone();
        let editar = props.editar.clone();
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

            let cuerpo = json!({ "nombre": nombre.trim() });
            let al_terminar = {
                let nombre = nombre.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        nombre.set(String::new());
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => {
                        errores.set(ErroresFormulario::desde_servidor(&mensaje));
                    }
                })
            };
            let mutacion = match &editar {
                Some((id, _)) => Mutacion::Actualizar(*id, cuerpo),
                None => Mutacion::Crear(cuerpo),
            };
            mutate.emit(Envio::con_aviso(mutacion, al_terminar));
        })
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{props.titulo.clone()}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="nombre">{"Nombre"}</label>
                        <input
                            type="text"
                            id="nombre"
                            value={(*nombre).clone()}
                            onchange={on_nombre_change}
                            disabled={props.guardando}
                        />
                        {error_campo(&errores, "nombre")}
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
