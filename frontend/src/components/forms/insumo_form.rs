use crate::components::forms::{
    banner_error, error_campo, valor_input, valor_select, valor_textarea,
};
use crate::hooks::{Envio, Mutacion};
use crate::services::rules::opciones_activas;
use crate::services::validation::{
    entero_en_rango, requerido, seleccion_requerida, ErroresFormulario,
};
use shared::{Insumo, TipoInsumo, UnidadMedida};
use web_sys::{File, FormData, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InsumoFormProps {
    #[prop_or_default]
    pub editar: Option<Insumo>,
    pub tipos: Vec<TipoInsumo>,
    pub unidades: Vec<UnidadMedida>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit form for a supply. Multipart like the animal form; the name
/// is unique server-side and duplicate-name failures come back through the
/// substring router onto the `nombre` field.
#[function_component(InsumoForm)]
pub fn insumo_form(props: &InsumoFormProps) -> Html {
    let nombre = use_state(String::new);
    let tipo_id = use_state(String::new);
    let unidad_id = use_state(String::new);
    let cantidad = use_state(|| "0".to_string());
    let descripcion = use_state(String::new);
    let imagen = use_state(|| Option::<File>::None);
    let errores = use_state(ErroresFormulario::default);

    use_effect_with(props.editar.clone(), {
        let nombre = nombre.clone();
        let tipo_id = tipo_id.clone();
        let unidad_id = unidad_id.clone();
        let cantidad = cantidad.clone();
        let descripcion = descripcion.clone();
        let errores = errores.clone();
        move |editar: &Option<Insumo>| {
            if let Some(insumo) = editar {
                nombre.set(insumo.nombre.clone());
                tipo_id.set(insumo.tipo_insumo_id.to_string());
                unidad_id.set(insumo.unidad_medida_id.to_string());
                cantidad.set(insumo.cantidad.to_string());
                descripcion.set(insumo.descripcion.clone().unwrap_or_default());
            } else {
                nombre.set(String::new());
                tipo_id.set(String::new());
                unidad_id.set(String::new());
                cantidad.set("0".to_string());
                descripcion.set(String::new());
            }
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    let tipos = opciones_activas(&props.tipos);
    let unidades = opciones_activas(&props.unidades);
    let editando = props.editar.as_ref().map(|i| i.insumo_id);

    let on_imagen_change = {
        let imagen = imagen.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            imagen.set(input.files().and_then(|lista| lista.get(0)));
        })
    };

    let on_submit = {
        let nombre = nombre.clone();
        let tipo_id = tipo_id.clone();
        let unidad_id = unidad_id.clone();
        let cantidad = cantidad.clone();
        let descripcion = descripcion.clone();
        let imagen = imagen.clone();
        let errores = errores.clone();
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("nombre", requerido(&nombre));
            validacion.validar("tipo_insumo_id", seleccion_requerida(&tipo_id));
            validacion.validar("unidad_medida_id", seleccion_requerida(&unidad_id));
            validacion.validar("cantidad", entero_en_rango(&cantidad, 0, i64::MAX));
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let formulario = match FormData::new() {
                Ok(formulario) => formulario,
                Err(_) => return,
            };
            let _ = formulario.append_with_str("nombre", nombre.trim());
            let _ = formulario.append_with_str("tipo_insumo_id", &tipo_id);
            let _ = formulario.append_with_str("unidad_medida_id", &unidad_id);
            let _ = formulario.append_with_str("cantidad", cantidad.trim());
            let _ = formulario.append_with_str("descripcion", descripcion.trim());
            if let Some(archivo) = imagen.as_ref() {
                let _ = formulario.append_with_blob("imagen", archivo);
            }

            let al_terminar = {
                let nombre = nombre.clone();
                let tipo_id = tipo_id.clone();
                let unidad_id = unidad_id.clone();
                let cantidad = cantidad.clone();
                let descripcion = descripcion.clone();
                let imagen = imagen.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        nombre.set(String::new());
                        tipo_id.set(String::new());
                        unidad_id.set(String::new());
                        cantidad.set("0".to_string());
                        descripcion.set(String::new());
                        imagen.set(None);
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => {
                        errores.set(ErroresFormulario::desde_servidor(&mensaje));
                    }
                })
            };
            let mutacion = match editando {
                Some(id) => Mutacion::ActualizarFormulario(id, formulario),
                None => Mutacion::CrearFormulario(formulario),
            };
            mutate.emit(Envio::con_aviso(mutacion, al_terminar));
        })
    };

    let input_change = |destino: &UseStateHandle<String>| {
        let destino = destino.clone();
        Callback::from(move |e: Event| destino.set(valor_input(&e)))
    };
    let select_change = |destino: &UseStateHandle<String>| {
        let destino = destino.clone();
        Callback::from(move |e: Event| destino.set(valor_select(&e)))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{if editando.is_some() { "Editar insumo" } else { "Nuevo insumo" }}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="nombre">{"Nombre"}</label>
                        <input type="text" id="nombre" value={(*nombre).clone()}
                            onchange={input_change(&nombre)} disabled={props.guardando} />
                        {error_campo(&errores, "nombre")}
                    </div>
                    <div class="form-group">
                        <label for="tipo">{"Tipo de insumo"}</label>
                        <select id="tipo" onchange={select_change(&tipo_id)} disabled={props.guardando}>
                            <option value="" selected={tipo_id.is_empty()}>{"Seleccione"}</option>
                            {for tipos.iter().map(|t| html! {
                                <option value={t.tipo_insumo_id.to_string()}
                                    selected={*tipo_id == t.tipo_insumo_id.to_string()}>
                                    {&t.nombre}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "tipo_insumo_id")}
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
                        <label for="cantidad">{"Cantidad en stock"}</label>
                        <input type="number" id="cantidad" min="0" step="1"
                            value={(*cantidad).clone()}
                            onchange={input_change(&cantidad)} disabled={props.guardando} />
                        {error_campo(&errores, "cantidad")}
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
                    <div class="form-group">
                        <label for="imagen">{"Imagen (opcional)"}</label>
                        <input type="file" id="imagen" accept="image/*"
                            onchange={on_imagen_change} disabled={props.guardando} />
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
