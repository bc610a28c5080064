use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::opciones_activas;
use crate::services::validation::{
    decimal_positivo, fecha_valida, id_opcional, seleccion_requerida, ErroresFormulario,
};
use serde_json::json;
use shared::{Animal, Sexo, UnidadMedida};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProduccionLecheFormProps {
    pub animales: Vec<Animal>,
    pub unidades: Vec<UnidadMedida>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Milk production record form. Only females are offered.
#[function_component(ProduccionLecheForm)]
pub fn produccion_leche_form(props: &ProduccionLecheFormProps) -> Html {
    let animal_id = use_state(String::new);
    let unidad_id = use_state(String::new);
    let cantidad = use_state(String::new);
    let fecha = use_state(fechas::hoy);
    let errores = use_state(ErroresFormulario::default);

    let hembras: Vec<Animal> = opciones_activas(&props.animales)
        .into_iter()
        .filter(|a| a.sexo == Sexo::H)
        .collect();
    let unidades = opciones_activas(&props.unidades);

    let on_submit = {
        let animal_id = animal_id.clone();
        let unidad_id = unidad_id.clone();
        let cantidad = cantidad.clone();
        let fecha = fecha.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("animal_id", seleccion_requerida(&animal_id));
            validacion.validar("unidad_medida_id", seleccion_requerida(&unidad_id));
            validacion.validar("cantidad", decimal_positivo(&cantidad));
            validacion.validar("fecha", fecha_valida(&fecha));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let cuerpo = json!({
                "animal_id": id_opcional(&animal_id),
                "unidad_medida_id": id_opcional(&unidad_id),
                "cantidad": cantidad.trim().parse::<f64>().unwrap_or(0.0),
                "fecha": fecha.trim(),
            });

            let al_terminar = {
                let animal_id = animal_id.clone();
                let unidad_id = unidad_id.clone();
                let cantidad = cantidad.clone();
                let fecha = fecha.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        animal_id.set(String::new());
                        unidad_id.set(String::new());
                        cantidad.set(String::new());
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
                <h3>{"Nueva producción de leche"}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="animal">{"Animal"}</label>
                        <select id="animal" onchange={select_change(&animal_id)} disabled={props.guardando}>
                            <option value="" selected={animal_id.is_empty()}>{"Seleccione"}</option>
                            {for hembras.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*animal_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "animal_id")}
                    </div>
                    <div class="form-group">
                        <label for="unidad">{"Unidad de medida"}</label>
                        <select id="unidad" onchange={select_change(&unidad_id)} disabled={props.guardando}>
                            <option value="" selected={unidad_id.is_empty()}>{"Seleccione"}</option>
                            {for unidades.iter().map(|u| html! {
                                <option value={u.unidad_medida_id.to_string()}
                                    selected={*unidad_id == u.unidad_medida_id.to_string()}>
                                    {&u.nombre}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "unidad_medida_id")}
                    </div>
                    <div class="form-group">
                        <label for="cantidad">{"Cantidad"}</label>
                        <input type="number" id="cantidad" min="0" step="0.01"
                            value={(*cantidad).clone()}
                            onchange={input_change(&cantidad)} disabled={props.guardando} />
                        {error_campo(&errores, "cantidad")}
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
