use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::opciones_activas;
use crate::services::validation::{
    decimal_positivo, fecha_valida, id_opcional, seleccion_requerida, ErroresFormulario,
};
use serde_json::json;
use shared::{Animal, Matadero, Pesaje};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProduccionCarneFormProps {
    pub animales: Vec<Animal>,
    pub mataderos: Vec<Matadero>,
    /// Weighing history; the optional reference selector only offers the
    /// chosen animal's records.
    pub pesajes: Vec<Pesaje>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Meat production record form. Slaughterhouse and source weighing are
/// optional; changing the animal resets the weighing selector since its
/// options depend on it.
#[function_component(ProduccionCarneForm)]
pub fn produccion_carne_form(props: &ProduccionCarneFormProps) -> Html {
    let animal_id = use_state(String::new);
    let matadero_id = use_state(String::new);
    let pesaje_id = use_state(String::new);
    let peso = use_state(String::new);
    let fecha = use_state(fechas::hoy);
    let errores = use_state(ErroresFormulario::default);

    let animales = opciones_activas(&props.animales);
    let mataderos = opciones_activas(&props.mataderos);
    let pesajes_del_animal: Vec<&Pesaje> = match id_opcional(&animal_id) {
        Some(id) => props.pesajes.iter().filter(|p| p.animal_id == id).collect(),
        None => Vec::new(),
    };

    let on_animal_change = {
        let animal_id = animal_id.clone();
        let pesaje_id = pesaje_id.clone();
        Callback::from(move |e: Event| {
            animal_id.set(valor_select(&e));
            pesaje_id.set(String::new());
        })
    };

    let on_submit = {
        let animal_id = animal_id.clone();
        let matadero_id = matadero_id.clone();
        let pesaje_id = pesaje_id.clone();
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

            let mut cuerpo = json!({
                "animal_id": id_opcional(&animal_id),
                "peso": peso.trim().parse::<f64>().unwrap_or(0.0),
                "fecha": fecha.trim(),
            });
            if let Some(id) = id_opcional(&matadero_id) {
                cuerpo["matadero_id"] = json!(id);
            }
            if let Some(id) = id_opcional(&pesaje_id) {
                cuerpo["pesaje_id"] = json!(id);
            }

            let al_terminar = {
                let animal_id = animal_id.clone();
                let matadero_id = matadero_id.clone();
                let pesaje_id = pesaje_id.clone();
                let peso = peso.clone();
                let fecha = fecha.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        animal_id.set(String::new());
                        matadero_id.set(String::new());
                        pesaje_id.set(String::new());
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
                <h3>{"Nueva producción de carne"}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="animal">{"Animal"}</label>
                        <select id="animal" onchange={on_animal_change} disabled={props.guardando}>
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
                        <label for="matadero">{"Matadero (opcional)"}</label>
                        <select id="matadero" onchange={select_change(&matadero_id)} disabled={props.guardando}>
                            <option value="" selected={matadero_id.is_empty()}>{"Sin matadero"}</option>
                            {for mataderos.iter().map(|m| html! {
                                <option value={m.matadero_id.to_string()}
                                    selected={*matadero_id == m.matadero_id.to_string()}>
                                    {&m.nombre}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="pesaje">{"Pesaje de referencia (opcional)"}</label>
                        <select id="pesaje" onchange={select_change(&pesaje_id)}
                            disabled={props.guardando || pesajes_del_animal.is_empty()}>
                            <option value="" selected={pesaje_id.is_empty()}>{"Sin pesaje"}</option>
                            {for pesajes_del_animal.iter().map(|p| html! {
                                <option value={p.pesaje_id.to_string()}
                                    selected={*pesaje_id == p.pesaje_id.to_string()}>
                                    {format!("{} ({:.2} kg)", fechas::para_mostrar(&p.fecha), p.peso)}
                                </option>
                            })}
                        </select>
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
