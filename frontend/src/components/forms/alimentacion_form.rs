use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::{insumos_con_stock, opciones_activas};
use crate::services::validation::{
    entero_en_rango, fecha_valida, id_opcional, seleccion_requerida, ErroresFormulario,
};
use serde_json::json;
use shared::{Insumo, Lote};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlimentacionFormProps {
    pub insumos: Vec<Insumo>,
    pub lotes: Vec<Lote>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Feeding record form. Only supplies with stock are offered, and the
/// quantity is capped at the stock figure from the last fetch; the server
/// re-validates against current stock on save.
#[function_component(AlimentacionForm)]
pub fn alimentacion_form(props: &AlimentacionFormProps) -> Html {
    let insumo_id = use_state(String::new);
    let lote_id = use_state(String::new);
    let cantidad = use_state(String::new);
    let fecha = use_state(fechas::hoy);
    let errores = use_state(ErroresFormulario::default);

    let insumos = insumos_con_stock(&props.insumos);
    let lotes = opciones_activas(&props.lotes);
    let stock_seleccionado = id_opcional(&insumo_id).and_then(|id| {
        insumos
            .iter()
            .find(|i| i.insumo_id == id)
            .map(|i| i.cantidad)
    });

    let on_submit = {
        let insumo_id = insumo_id.clone();
        let lote_id = lote_id.clone();
        let cantidad = cantidad.clone();
        let fecha = fecha.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("insumo_id", seleccion_requerida(&insumo_id));
            validacion.validar("lote_id", seleccion_requerida(&lote_id));
            validacion.validar("fecha", fecha_valida(&fecha));
            let tope = stock_seleccionado.unwrap_or(i64::MAX);
            validacion.validar("cantidad", entero_en_rango(&cantidad, 1, tope));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let cuerpo = json!({
                "insumo_id": id_opcional(&insumo_id),
                "lote_id": id_opcional(&lote_id),
                "cantidad": cantidad.trim().parse::<i64>().unwrap_or(0),
                "fecha": fecha.trim(),
            });

            let al_terminar = {
                let insumo_id = insumo_id.clone();
                let lote_id = lote_id.clone();
                let cantidad = cantidad.clone();
                let fecha = fecha.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        insumo_id.set(String::new());
                        lote_id.set(String::new());
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
                <h3>{"Nueva alimentación"}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="insumo">{"Insumo"}</label>
                        <select id="insumo" onchange={select_change(&insumo_id)} disabled={props.guardando}>
                            <option value="" selected={insumo_id.is_empty()}>{"Seleccione"}</option>
                            {for insumos.iter().map(|i| html! {
                                <option value={i.insumo_id.to_string()}
                                    selected={*insumo_id == i.insumo_id.to_string()}>
                                    {format!("{} (stock: {})", i.nombre, i.cantidad)}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "insumo_id")}
                    </div>
                    <div class="form-group">
                        <label for="lote">{"Lote"}</label>
                        <select id="lote" onchange={select_change(&lote_id)} disabled={props.guardando}>
                            <option value="" selected={lote_id.is_empty()}>{"Seleccione"}</option>
                            {for lotes.iter().map(|l| html! {
                                <option value={l.lote_id.to_string()}
                                    selected={*lote_id == l.lote_id.to_string()}>
                                    {&l.nombre}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "lote_id")}
                    </div>
                    <div class="form-group">
                        <label for="cantidad">{"Cantidad"}</label>
                        <input type="number" id="cantidad" min="1" step="1"
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
