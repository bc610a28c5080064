use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::{candidatos_progenitor, opciones_activas};
use crate::services::validation::{
    fecha_valida, requerido, seleccion_requerida, ErroresFormulario,
};
use shared::{Animal, Lote, Raza, Sexo};
use web_sys::{File, FormData, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AnimalFormProps {
    /// Record being edited; `None` for the create form.
    #[prop_or_default]
    pub editar: Option<Animal>,
    /// Herd collection, source of the mother/father selectors.
    pub animales: Vec<Animal>,
    pub razas: Vec<Raza>,
    pub lotes: Vec<Lote>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Create/edit form for an animal. Submits multipart (the record may carry
/// a photo); numeric fields are stringified into form fields and the empty
/// string stands for "no selection" on optional foreign keys.
#[function_component(AnimalForm)]
pub fn animal_form(props: &AnimalFormProps) -> Html {
    let arete = use_state(String::new);
    let sexo = use_state(String::new);
    let fecha_nacimiento = use_state(fechas::hoy);
    let fecha_destete = use_state(String::new);
    let raza_id = use_state(String::new);
    let lote_id = use_state(String::new);
    let madre_id = use_state(String::new);
    let padre_id = use_state(String::new);
    let imagen = use_state(|| Option::<File>::None);
    let errores = use_state(ErroresFormulario::default);

    // Edit mode seeds every field from the record's current values, stored
    // ids converted to the string representation selects use.
    use_effect_with(props.editar.clone(), {
        let arete = arete.clone();
        let sexo = sexo.clone();
        let fecha_nacimiento = fecha_nacimiento.clone();
        let fecha_destete = fecha_destete.clone();
        let raza_id = raza_id.clone();
        let lote_id = lote_id.clone();
        let madre_id = madre_id.clone();
        let padre_id = padre_id.clone();
        let errores = errores.clone();
        move |editar: &Option<Animal>| {
            if let Some(animal) = editar {
                arete.set(animal.arete.clone());
                sexo.set(animal.sexo.as_str().to_string());
                fecha_nacimiento.set(animal.fecha_nacimiento.clone());
                fecha_destete.set(animal.fecha_destete.clone().unwrap_or_default());
                raza_id.set(animal.raza_id.map(|id| id.to_string()).unwrap_or_default());
                lote_id.set(animal.lote_id.map(|id| id.to_string()).unwrap_or_default());
                madre_id.set(
                    animal
                        .animal_madre_id
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                );
                padre_id.set(
                    animal
                        .animal_padre_id
                        .map(|id| id.to_string())
                        .unwrap_or_default(),
                );
            } else {
                arete.set(String::new());
                sexo.set(String::new());
                fecha_nacimiento.set(fechas::hoy());
                fecha_destete.set(String::new());
                raza_id.set(String::new());
                lote_id.set(String::new());
                madre_id.set(String::new());
                padre_id.set(String::new());
            }
            errores.set(ErroresFormulario::default());
            || ()
        }
    });

    let editando = props.editar.as_ref().map(|a| a.animal_id);
    let madres = candidatos_progenitor(&props.animales, Sexo::H, editando);
    let padres = candidatos_progenitor(&props.animales, Sexo::M, editando);
    let razas = opciones_activas(&props.razas);
    let lotes = opciones_activas(&props.lotes);

    let on_imagen_change = {
        let imagen = imagen.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            imagen.set(input.files().and_then(|lista| lista.get(0)));
        })
    };

    let on_submit = {
        let arete = arete.clone();
        let sexo = sexo.clone();
        let fecha_nacimiento = fecha_nacimiento.clone();
        let fecha_destete = fecha_destete.clone();
        let raza_id = raza_id.clone();
        let lote_id = lote_id.clone();
        let madre_id = madre_id.clone();
        let padre_id = padre_id.clone();
        let imagen = imagen.clone();
        let errores = errores.clone();
        let editando = editando;
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("arete", requerido(&arete));
            validacion.validar("sexo", seleccion_requerida(&sexo));
            validacion.validar("fecha_nacimiento", fecha_valida(&fecha_nacimiento));
            if !fecha_destete.trim().is_empty() {
                validacion.validar("fecha_destete", fecha_valida(&fecha_destete));
            }
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let formulario = match FormData::new() {
                Ok(formulario) => formulario,
                Err(_) => return,
            };
            let _ = formulario.append_with_str("arete", arete.trim());
            let _ = formulario.append_with_str("sexo", &sexo);
            let _ = formulario.append_with_str("fecha_nacimiento", &fecha_nacimiento);
            let _ = formulario.append_with_str("fecha_destete", fecha_destete.trim());
            let _ = formulario.append_with_str("raza_id", &raza_id);
            let _ = formulario.append_with_str("lote_id", &lote_id);
            let _ = formulario.append_with_str("animal_madre_id", &madre_id);
            let _ = formulario.append_with_str("animal_padre_id", &padre_id);
            if let Some(archivo) = imagen.as_ref() {
                let _ = formulario.append_with_blob("imagen", archivo);
            }

            let al_terminar = {
                let arete = arete.clone();
                let sexo = sexo.clone();
                let fecha_nacimiento = fecha_nacimiento.clone();
                let fecha_destete = fecha_destete.clone();
                let raza_id = raza_id.clone();
                let lote_id = lote_id.clone();
                let madre_id = madre_id.clone();
                let padre_id = padre_id.clone();
                let imagen = imagen.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        arete.set(String::new());
                        sexo.set(String::new());
                        fecha_nacimiento.set(fechas::hoy());
                        fecha_destete.set(String::new());
                        raza_id.set(String::new());
                        lote_id.set(String::new());
                        madre_id.set(String::new());
                        padre_id.set(String::new());
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
                <h3>{if editando.is_some() { "Editar animal" } else { "Nuevo animal" }}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="arete">{"Arete"}</label>
                        <input type="text" id="arete" value={(*arete).clone()}
                            onchange={input_change(&arete)} disabled={props.guardando} />
                        {error_campo(&errores, "arete")}
                    </div>
                    <div class="form-group">
                        <label for="sexo">{"Sexo"}</label>
                        <select id="sexo" onchange={select_change(&sexo)} disabled={props.guardando}>
                            <option value="" selected={sexo.is_empty()}>{"Seleccione"}</option>
                            <option value="M" selected={*sexo == "M"}>{"Macho"}</option>
                            <option value="H" selected={*sexo == "H"}>{"Hembra"}</option>
                        </select>
                        {error_campo(&errores, "sexo")}
                    </div>
                    <div class="form-group">
                        <label for="fecha_nacimiento">{"Fecha de nacimiento"}</label>
                        <input type="date" id="fecha_nacimiento" value={(*fecha_nacimiento).clone()}
                            onchange={input_change(&fecha_nacimiento)} disabled={props.guardando} />
                        {error_campo(&errores, "fecha_nacimiento")}
                    </div>
                    <div class="form-group">
                        <label for="fecha_destete">{"Fecha de destete (opcional)"}</label>
                        <input type="date" id="fecha_destete" value={(*fecha_destete).clone()}
                            onchange={input_change(&fecha_destete)} disabled={props.guardando} />
                        {error_campo(&errores, "fecha_destete")}
                    </div>
                    <div class="form-group">
                        <label for="raza">{"Raza"}</label>
                        <select id="raza" onchange={select_change(&raza_id)} disabled={props.guardando}>
                            <option value="" selected={raza_id.is_empty()}>{"Sin raza"}</option>
                            {for razas.iter().map(|r| html! {
                                <option value={r.raza_id.to_string()}
                                    selected={*raza_id == r.raza_id.to_string()}>
                                    {&r.nombre}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="lote">{"Lote"}</label>
                        <select id="lote" onchange={select_change(&lote_id)} disabled={props.guardando}>
                            <option value="" selected={lote_id.is_empty()}>{"Sin lote"}</option>
                            {for lotes.iter().map(|l| html! {
                                <option value={l.lote_id.to_string()}
                                    selected={*lote_id == l.lote_id.to_string()}>
                                    {&l.nombre}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="madre">{"Madre"}</label>
                        <select id="madre" onchange={select_change(&madre_id)} disabled={props.guardando}>
                            <option value="" selected={madre_id.is_empty()}>{"Desconocida"}</option>
                            {for madres.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*madre_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="padre">{"Padre"}</label>
                        <select id="padre" onchange={select_change(&padre_id)} disabled={props.guardando}>
                            <option value="" selected={padre_id.is_empty()}>{"Desconocido"}</option>
                            {for padres.iter().map(|a| html! {
                                <option value={a.animal_id.to_string()}
                                    selected={*padre_id == a.animal_id.to_string()}>
                                    {&a.arete}
                                </option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="imagen">{"Fotografía (opcional)"}</label>
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
