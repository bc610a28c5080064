use crate::components::forms::{banner_error, error_campo, valor_input, valor_select, valor_textarea};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::{candidatos_monta, opciones_activas};
use crate::services::validation::{fecha_valida, id_opcional, seleccion_requerida, ErroresFormulario};
use serde_json::json;
use shared::{Animal, Monta, MontaEstado, Sexo, TipoMonta};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MontaFormProps {
    /// In edit mode only the completion state is editable; the payload
    /// sent is exactly `{"estado": <bool>}`.
    #[prop_or_default]
    pub editar: Option<Monta>,
    pub animales: Vec<Animal>,
    pub tipos: Vec<TipoMonta>,
    /// The store's in-flight flag; disables the submit control.
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Breeding-event form. The female/male selectors only offer animals old
/// enough at the chosen event date (female ≥ 15 months, male ≥ 18,
/// boundaries inclusive); changing the date recomputes both lists.
#[function_component(MontaForm)]
pub fn monta_form(props: &MontaFormProps) -> Html {
    let fecha = use_state(fechas::hoy);
    let hembra_id = use_state(String::new);
    let macho_id = use_state(String::new);
    let tipo_id = use_state(String::new);
    let descripcion = use_state(String::new);
    let estado = use_state(|| false);
    let errores = use_state(ErroresFormulario::default);

    use_effect_with(props.editar.clone(), {
        let estado = estado.clone();
        let errores = errores.clone();
        move |editar: &Option<Monta>| {
            if let Some(monta) = editar {
                estado.set(monta.estado);
            }
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    // Eligibility is derived on every render from the cached herd and the
    // candidate event date; nothing is memoized.
    let fecha_evento = fechas::parsear(&fecha);
    let (hembras, machos) = match fecha_evento {
        Some(evento) => (
            candidatos_monta(&props.animales, Sexo::H, evento),
            candidatos_monta(&props.animales, Sexo::M, evento),
        ),
        None => (Vec::new(), Vec::new()),
    };
    let tipos = opciones_activas(&props.tipos);

    let on_submit_edicion = {
        let estado = estado.clone();
        let errores = errores.clone();
        let editar = props.editar.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(monta) = editar.clone() else { return };

            let al_terminar = {
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => errores.set(ErroresFormulario::desde_servidor(&mensaje)),
                })
            };
            let cuerpo = json!(MontaEstado { estado: *estado });
            mutate.emit(Envio::con_aviso(
                Mutacion::Actualizar(monta.monta_id, cuerpo),
                al_terminar,
            ));
        })
    };

    let on_submit_creacion = {
        let fecha = fecha.clone();
        let hembra_id = hembra_id.clone();
        let macho_id = macho_id.clone();
        let tipo_id = tipo_id.clone();
        let descripcion = descripcion.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("fecha", fecha_valida(&fecha));
            validacion.validar("animal_hembra_id", seleccion_requerida(&hembra_id));
            validacion.validar("tipo_monta_id", seleccion_requerida(&tipo_id));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let mut cuerpo = json!({
                "animal_hembra_id": id_opcional(&hembra_id),
                "tipo_monta_id": id_opcional(&tipo_id),
                "fecha": fecha.trim(),
                "estado": false,
                "descripcion": descripcion.trim(),
            });
            if let Some(macho) = id_opcional(&macho_id) {
                cuerpo["animal_macho_id"] = json!(macho);
            }

            let al_terminar = {
                let fecha = fecha.clone();
                let hembra_id = hembra_id.clone();
                let macho_id = macho_id.clone();
                let tipo_id = tipo_id.clone();
                let descripcion = descripcion.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        fecha.set(fechas::hoy());
                        hembra_id.set(String::new());
                        macho_id.set(String::new());
                        tipo_id.set(String::new());
                        descripcion.set(String::new());
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => errores.set(ErroresFormulario::desde_servidor(&mensaje)),
                })
            };
            mutate.emit(Envio::con_aviso(Mutacion::Crear(cuerpo), al_terminar));
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    if let Some(monta) = props.editar.as_ref() {
        // Edit mode: only the completion state.
        return html! {
            <div class="modal-overlay">
                <div class="modal">
                    <h3>{format!("Monta #{}", monta.monta_id)}</h3>
                    {banner_error(&errores)}
                    <form onsubmit={on_submit_edicion}>
                        <div class="form-group">
                            <label>
                                <input type="checkbox" checked={*estado}
                                    onchange={
                                        let estado = estado.clone();
                                        Callback::from(move |e: Event| {
                                            let input: HtmlInputElement = e.target_unchecked_into();
                                            estado.set(input.checked());
                                        })
                                    }
                                    disabled={props.guardando} />
                                {" Monta completada"}
                            </label>
                        </div>
                        <div class="modal-actions">
                            <button type="submit" class="btn btn-primary" disabled={props.guardando}>
                                {if props.guardando { "Guardando..." } else { "Guardar" }}
                            </button>
                            <button type="button" class="btn" onclick={on_close.clone()}>{"Cancelar"}</button>
                        </div>
                    </form>
                </div>
            </div>
        };
    }

    let select_change = |destino: &UseStateHandle<String>| {
        let destino = destino.clone();
        Callback::from(move |e: Event| destino.set(valor_select(&e)))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{"Nueva monta"}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit_creacion}>
                    <div class="form-group">
                        <label for="fecha">{"Fecha"}</label>
                        <input type="date" id="fecha" value={(*fecha).clone()}
                            onchange={
                                let fecha = fecha.clone();
                                Callback::from(move |e: Event| fecha.set(valor_input(&e)))
                            }
                            disabled={props.guardando} />
                        {error_campo(&errores, "fecha")}
                    </div>
                    <div class="form-group">
                        <label for="hembra">{"Hembra (mínimo 15 meses)"}</label>
                        <select id="hembra" onchange={select_change(&hembra_id)} disabled={props.guardando}>
                            <option value="" selected={hembra_id.is_empty()}>{"Seleccione"}</option>
                            {for hembras.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*hembra_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "animal_hembra_id")}
                    </div>
                    <div class="form-group">
                        <label for="macho">{"Macho (mínimo 18 meses, opcional)"}</label>
                        <select id="macho" onchange={select_change(&macho_id)} disabled={props.guardando}>
                            <option value="" selected={macho_id.is_empty()}>{"Sin macho"}</option>
                            {for machos.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*macho_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="tipo">{"Tipo de monta"}</label>
                        <select id="tipo" onchange={select_change(&tipo_id)} disabled={props.guardando}>
                            <option value="" selected={tipo_id.is_empty()}>{"Seleccione"}</option>
                            {for tipos.iter().map(|t| html! {
                                <option value={t.tipo_monta_id.to_string()}
                                    selected={*tipo_id == t.tipo_monta_id.to_string()}>
                                    {&t.nombre}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "tipo_monta_id")}
                    </div>
                    <div class="form-group">
                        <label for="descripcion">{"Descripción (opcional)"}</label>
                        <textarea id="descripcion" value={(*descripcion).clone()}
                            onchange={
                                let descripcion = descripcion.clone();
                                Callback::from(move |e: Event| descripcion.set(valor_textarea(&e)))
                            }
                            disabled={props.guardando} />
                    </div>
                    <div class="modal-actions">
                        <button type="submit" class="btn btn-primary" disabled={props.guardando}>
                            {if props.guardando { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button type="button" class="btn" onclick={on_close}>{"Cancelar"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
