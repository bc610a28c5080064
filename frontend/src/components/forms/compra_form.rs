use crate::components::forms::{banner_error, error_campo, valor_input, valor_select};
use crate::hooks::{Envio, Mutacion};
use crate::services::fechas;
use crate::services::rules::{animales_comprables, opciones_activas, total_nueva_compra};
use crate::services::validation::{
    decimal_positivo, entero_en_rango, fecha_valida, id_opcional, seleccion_requerida,
    ErroresFormulario,
};
use serde_json::json;
use shared::{Animal, Compra, Insumo, NuevaCompra, NuevoDetalle, Proveedor};
use yew::prelude::*;

/// What a purchase buys; one form handles both, the line-item shape changes.
#[derive(Clone, Copy, PartialEq)]
pub enum TipoCompra {
    Animales,
    Insumos,
}

/// One draft line item. Everything stays a string until submit; the empty
/// string is "nothing selected".
#[derive(Clone, PartialEq, Default)]
struct Linea {
    referencia_id: String,
    cantidad: String,
    precio: String,
}

#[derive(Properties, PartialEq)]
pub struct CompraFormProps {
    pub tipo: TipoCompra,
    pub proveedores: Vec<Proveedor>,
    pub animales: Vec<Animal>,
    pub insumos: Vec<Insumo>,
    /// Existing purchases; animals already on one stop being offered.
    pub compras: Vec<Compra>,
    pub guardando: bool,
    pub mutate: Callback<Envio>,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Purchase form with a growable line-item table. Animal purchases offer
/// only animals without recorded parents that no prior purchase references,
/// and an animal picked on one row disappears from the others. The total is
/// recomputed on every render; the server recomputes it again on save.
#[function_component(CompraForm)]
pub fn compra_form(props: &CompraFormProps) -> Html {
    let proveedor_id = use_state(String::new);
    let fecha = use_state(fechas::hoy);
    let lineas = use_state(|| vec![Linea::default()]);
    let errores = use_state(ErroresFormulario::default);

    let proveedores = opciones_activas(&props.proveedores);
    let comprables = animales_comprables(&props.animales, &props.compras);
    let insumos = opciones_activas(&props.insumos);

    let detalles_borrador: Vec<NuevoDetalle> = lineas
        .iter()
        .filter_map(|linea| {
            let precio = linea.precio.trim().parse::<f64>().ok()?;
            Some(match props.tipo {
                TipoCompra::Animales => NuevoDetalle {
                    animal_id: id_opcional(&linea.referencia_id),
                    insumo_id: None,
                    cantidad: None,
                    precio,
                },
                TipoCompra::Insumos => NuevoDetalle {
                    animal_id: None,
                    insumo_id: id_opcional(&linea.referencia_id),
                    cantidad: linea.cantidad.trim().parse().ok(),
                    precio,
                },
            })
        })
        .collect();
    let total = total_nueva_compra(&detalles_borrador);

    let on_agregar_linea = {
        let lineas = lineas.clone();
        Callback::from(move |_: MouseEvent| {
            let mut nuevas = (*lineas).clone();
            nuevas.push(Linea::default());
            lineas.set(nuevas);
        })
    };

    let on_submit = {
        let proveedor_id = proveedor_id.clone();
        let fecha = fecha.clone();
        let lineas = lineas.clone();
        let errores = errores.clone();
        let tipo = props.tipo;
        let mutate = props.mutate.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut validacion = ErroresFormulario::default();
            validacion.validar("proveedor_id", seleccion_requerida(&proveedor_id));
            validacion.validar("fecha", fecha_valida(&fecha));
            if lineas.is_empty() {
                validacion.agregar("lineas", "Agregue al menos un detalle");
            }
            for (indice, linea) in lineas.iter().enumerate() {
                validacion.validar(
                    &format!("linea-{}-referencia", indice),
                    seleccion_requerida(&linea.referencia_id),
                );
                validacion.validar(
                    &format!("linea-{}-precio", indice),
                    decimal_positivo(&linea.precio),
                );
                if tipo == TipoCompra::Insumos {
                    validacion.validar(
                        &format!("linea-{}-cantidad", indice),
                        entero_en_rango(&linea.cantidad, 1, i64::MAX),
                    );
                }
            }
            if !validacion.vacio() {
                errores.set(validacion);
                return;
            }

            let detalles: Vec<NuevoDetalle> = lineas
                .iter()
                .map(|linea| match tipo {
                    TipoCompra::Animales => NuevoDetalle {
                        animal_id: id_opcional(&linea.referencia_id),
                        insumo_id: None,
                        cantidad: None,
                        precio: linea.precio.trim().parse().unwrap_or(0.0),
                    },
                    TipoCompra::Insumos => NuevoDetalle {
                        animal_id: None,
                        insumo_id: id_opcional(&linea.referencia_id),
                        cantidad: linea.cantidad.trim().parse().ok(),
                        precio: linea.precio.trim().parse().unwrap_or(0.0),
                    },
                })
                .collect();
            let cuerpo = NuevaCompra {
                proveedor_id: id_opcional(&proveedor_id).unwrap_or(0),
                fecha: fecha.trim().to_string(),
                detalles,
            };

            let al_terminar = {
                let proveedor_id = proveedor_id.clone();
                let fecha = fecha.clone();
                let lineas = lineas.clone();
                let errores = errores.clone();
                let on_success = on_success.clone();
                Callback::from(move |resultado: Result<(), String>| match resultado {
                    Ok(()) => {
                        proveedor_id.set(String::new());
                        fecha.set(fechas::hoy());
                        lineas.set(vec![Linea::default()]);
                        errores.set(ErroresFormulario::default());
                        on_success.emit(());
                    }
                    Err(mensaje) => {
                        errores.set(ErroresFormulario::desde_servidor(&mensaje));
                    }
                })
            };
            mutate.emit(Envio::con_aviso(Mutacion::Crear(json!(cuerpo)), al_terminar));
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

    let titulo = match props.tipo {
        TipoCompra::Animales => "Nueva compra de animales",
        TipoCompra::Insumos => "Nueva compra de insumos",
    };

    // Ids already taken by some row, so the other rows stop offering them.
    let elegidos: Vec<String> = lineas.iter().map(|l| l.referencia_id.clone()).collect();

    let fila = |indice: usize, linea: &Linea| -> Html {
        let cambiar_campo = |leer: fn(&Event) -> String, aplicar: fn(&mut Linea, String)| {
            let lineas = lineas.clone();
            Callback::from(move |e: Event| {
                let valor = leer(&e);
                let mut nuevas = (*lineas).clone();
                if let Some(linea) = nuevas.get_mut(indice) {
                    aplicar(linea, valor);
                }
                lineas.set(nuevas);
            })
        };
        let on_quitar = {
            let lineas = lineas.clone();
            Callback::from(move |_: MouseEvent| {
                let mut nuevas = (*lineas).clone();
                nuevas.remove(indice);
                lineas.set(nuevas);
            })
        };

        let opciones = match props.tipo {
            TipoCompra::Animales => comprables
                .iter()
                .filter(|a| {
                    let id = a.animal_id.to_string();
                    id == linea.referencia_id
                        || !elegidos.iter().any(|elegido| *elegido == id)
                })
                .map(|a| (a.animal_id.to_string(), a.arete.clone()))
                .collect::<Vec<_>>(),
            TipoCompra::Insumos => insumos
                .iter()
                .map(|i| (i.insumo_id.to_string(), i.nombre.clone()))
                .collect(),
        };

        html! {
            <div class="linea-compra" key={indice}>
                <select onchange={cambiar_campo(valor_select, |l, v| l.referencia_id = v)} disabled={props.guardando}>
                    <option value="" selected={linea.referencia_id.is_empty()}>{"Seleccione"}</option>
                    {for opciones.iter().map(|(valor, etiqueta)| html! {
                        <option value={valor.clone()} selected={linea.referencia_id == *valor}>
                            {etiqueta}
                        </option>
                    })}
                </select>
                {error_campo(&errores, &format!("linea-{}-referencia", indice))}
                if props.tipo == TipoCompra::Insumos {
                    <input type="number" min="1" step="1" placeholder="Cantidad"
                        value={linea.cantidad.clone()}
                        onchange={cambiar_campo(valor_input, |l, v| l.cantidad = v)}
                        disabled={props.guardando} />
                    {error_campo(&errores, &format!("linea-{}-cantidad", indice))}
                }
                <input type="number" min="0" step="0.01" placeholder="Precio"
                    value={linea.precio.clone()}
                    onchange={cambiar_campo(valor_input, |l, v| l.precio = v)}
                    disabled={props.guardando} />
                {error_campo(&errores, &format!("linea-{}-precio", indice))}
                <button type="button" class="btn btn-small" onclick={on_quitar}
                    disabled={props.guardando || lineas.len() == 1}>
                    {"Quitar"}
                </button>
            </div>
        }
    };

    html! {
        <div class="modal-overlay">
            <div class="modal modal-wide">
                <h3>{titulo}</h3>
                {banner_error(&errores)}
                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="proveedor">{"Proveedor"}</label>
                        <select id="proveedor" onchange={select_change(&proveedor_id)} disabled={props.guardando}>
                            <option value="" selected={proveedor_id.is_empty()}>{"Seleccione"}</option>
                            {for proveedores.iter().map(|p| html! {
                                <option value={p.proveedor_id.to_string()}
                                    selected={*proveedor_id == p.proveedor_id.to_string()}>
                                    {&p.nombre}
                                </option>
                            })}
                        </select>
                        {error_campo(&errores, "proveedor_id")}
                    </div>
                    <div class="form-group">
                        <label for="fecha">{"Fecha"}</label>
                        <input type="date" id="fecha" value={(*fecha).clone()}
                            onchange={input_change(&fecha)} disabled={props.guardando} />
                        {error_campo(&errores, "fecha")}
                    </div>
                    <div class="form-group">
                        <label>{"Detalles"}</label>
                        {for lineas.iter().enumerate().map(|(indice, linea)| fila(indice, linea))}
                        {error_campo(&errores, "lineas")}
                        <button type="button" class="btn btn-small" onclick={on_agregar_linea}
                            disabled={props.guardando}>
                            {"Agregar detalle"}
                        </button>
                    </div>
                    <div class="form-group total-compra">
                        <strong>{format!("Total: {:.2}", total)}</strong>
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
