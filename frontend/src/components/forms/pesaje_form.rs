use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::opciones_activas;
use crate::services::validation::{
    decimal_positivo, fecha_valida, id_opcional, seleccion_requerida, ErroresFormulario,
};
use serde_json::json;
use shared::Animal;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PesajeFormProps {
    pub animales: Vec<Animal>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Weighing record form.
#[function_component(PesajeForm)]
pub fn pesaje_form(props: &PesajeFormProps) -> Html {
    let animal_id = use_state(String::new);
    let peso = use_state(String::new);
    let fecha = use_state(fechas::hoy);
    let errores = use_state(ErroresFormulario::default);

    let animales = opciones_activas(&props.animales);

    let on_submit = {
        let animal_id = animal_id.clone();
        let peso = peso.clone();
        let fecha = fecha.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("animal_id", seleccion_requerida(&animal_id));
            validacion.validar("peso", decimal_positivo(&peso));
            validacion.validar("fecha", fecha_valida(&fecha));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let cuerpo = json!({
                "animal_id": id_opcional(&animal_id),
                "peso": peso.trim().parse::<f64>().unwrap_or(0.0),
                "fecha": fecha.trim(),
            });

            let al_terminar = {
                let animal_id = animal_id.clone();
                let peso = peso.clone();
                let fecha = fecha.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        animal_id.set(String::new());
                        peso.set(String::new());
                        fecha.set(fechas::hoy());
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => {
                        errores.set(ErroresFormulario::desde_servidor(&mensaje));
                    }
                })
            };
            mutate.emit(Envio::con_aviso(Mutacion::Crear(cuerpo), al_terminar));
        })
    };

    let select_change = |destino: &UseStateHandle<String>| {
        let destino = destino.clone();
        Callback::from(move |e: Event| destino.set(valor_select(&e)))
    };
    let input_change = |destino: &UseStateHandle<String>| {
        let destino = destino.clone();
        Callback::from(move |e: Event| destino.set(valor_input(&e)))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{"Nuevo pesaje"}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="animal">{"Animal"}</label>
                        <select id="animal" onchange={select_change(&animal_id)} disabled={props.guardando}>
                            <option value="" selected={animal_id.is_empty()}>{"Seleccione"}</option>
                            {for animales.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*animal_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "animal_id")}
                    </div>
                    <div class="form-group">
                        <label for="peso">{"Peso (kg)"}</label>
                        <input type="number" id="peso" min="0" step="0.01"
                            value={(*peso).clone()}
                            onchange={input_change(&peso)} disabled={props.guardando} />
                        {error_campo(&errores, "peso")}
                    </div>
                    <div class="form-group">
                        <label for="fecha">{"Fecha"}</label>
                        <input type="date" id="fecha" value={(*fecha).clone()}
                            onchange={input_change(&fecha)} disabled={props.guardando} />
                        {error_campo(&errores, "fecha")}
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
