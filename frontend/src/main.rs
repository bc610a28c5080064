mod components;
mod hooks;
mod services;

use components::forms::alimentacion_form::AlimentacionForm;
use components::forms::animal_form::AnimalForm;
use components::forms::catalogo_form::CatalogoForm;
use components::forms::compra_form::{CompraForm, TipoCompra};
use components::forms::insumo_form::InsumoForm;
use components::forms::lote_form::LoteForm;
use components::forms::monta_form::MontaForm;
use components::forms::pesaje_form::PesajeForm;
use components::forms::produccion_carne_form::ProduccionCarneForm;
use components::forms::produccion_leche_form::ProduccionLecheForm;
use components::forms::tipo_monta_form::TipoMontaForm;
use components::notificaciones::CampanaNotificaciones;
use hooks::{use_resource, Envio, Mutacion};
use services::api::ApiClient;
use services::fechas;
use shared::{
    Alimentacion, Animal, Compra, Insumo, Lote, Matadero, Monta, Pesaje, Potrero, ProduccionCarne,
    ProduccionLeche, Proveedor, Raza, TipoInsumo, TipoMonta, UnidadMedida,
};
use yew::prelude::*;

// The session is carried by a cookie and the server resolves the real user
// from it on every call; this id only scopes the feed and push channel.
const USUARIO_ID: i64 = 1;

#[derive(Clone, Copy, PartialEq)]
enum Seccion {
    Animales,
    Insumos,
    Compras,
    Montas,
    Alimentaciones,
    Pesajes,
    ProduccionLeche,
    ProduccionCarne,
    Lotes,
    Catalogos,
}

impl Seccion {
    fn etiqueta(&self) -> &'static str {
        match self {
            Seccion::Animales => "Animales",
            Seccion::Insumos => "Insumos",
            Seccion::Compras => "Compras",
            Seccion::Montas => "Montas",
            Seccion::Alimentaciones => "Alimentación",
            Seccion::Pesajes => "Pesajes",
            Seccion::ProduccionLeche => "Prod. leche",
            Seccion::ProduccionCarne => "Prod. carne",
            Seccion::Lotes => "Lotes",
            Seccion::Catalogos => "Catálogos",
        }
    }
}

const SECCIONES: &[Seccion] = &[
    Seccion::Animales,
    Seccion::Insumos,
    Seccion::Compras,
    Seccion::Montas,
    Seccion::Alimentaciones,
    Seccion::Pesajes,
    Seccion::ProduccionLeche,
    Seccion::ProduccionCarne,
    Seccion::Lotes,
    Seccion::Catalogos,
];

/// Which modal is on screen. Edit variants carry the record being edited.
#[derive(Clone, PartialEq)]
enum Modal {
    Ninguno,
    Animal(Option<Animal>),
    Insumo(Option<Insumo>),
    CompraAnimales,
    CompraInsumos,
    Monta(Option<Monta>),
    Alimentacion,
    Pesaje,
    ProduccionLeche,
    ProduccionCarne,
    Lote(Option<Lote>),
    TipoMonta(Option<TipoMonta>),
    /// Name-only catalog form: title, resource path, optional edit target.
    Catalogo(&'static str, &'static str, Option<(i64, String)>),
}

fn arete_de(animales: &[Animal], id: i64) -> String {
    animales
        .iter()
        .find(|a| a.animal_id == id)
        .map(|a| a.arete.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

fn nombre_o_id(nombre: Option<&str>, id: i64) -> String {
    nombre
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id))
}

fn nombre_insumo(insumos: &[Insumo], id: i64) -> String {
    nombre_o_id(
        insumos
            .iter()
            .find(|i| i.insumo_id == id)
            .map(|i| i.nombre.as_str()),
        id,
    )
}

fn nombre_lote(lotes: &[Lote], id: i64) -> String {
    nombre_o_id(
        lotes
            .iter()
            .find(|l| l.lote_id == id)
            .map(|l| l.nombre.as_str()),
        id,
    )
}

fn nombre_proveedor(proveedores: &[Proveedor], id: i64) -> String {
    nombre_o_id(
        proveedores
            .iter()
            .find(|p| p.proveedor_id == id)
            .map(|p| p.nombre.as_str()),
        id,
    )
}

fn nombre_tipo_monta(tipos: &[TipoMonta], id: i64) -> String {
    nombre_o_id(
        tipos
            .iter()
            .find(|t| t.tipo_monta_id == id)
            .map(|t| t.nombre.as_str()),
        id,
    )
}

fn nombre_unidad(unidades: &[UnidadMedida], id: i64) -> String {
    nombre_o_id(
        unidades
            .iter()
            .find(|u| u.unidad_medida_id == id)
            .map(|u| u.nombre.as_str()),
        id,
    )
}

fn nombre_matadero(mataderos: &[Matadero], id: i64) -> String {
    nombre_o_id(
        mataderos
            .iter()
            .find(|m| m.matadero_id == id)
            .map(|m| m.nombre.as_str()),
        id,
    )
}

/// Notices shown above a list. A failed fetch keeps the previous
/// collection on screen, so the message says so; a failed row delete has
/// no form of its own and surfaces here through the store's `save_error`.
fn mensajes_seccion(error: &Option<String>, save_error: &Option<String>) -> Vec<String> {
    let mut mensajes = Vec::new();
    if let Some(mensaje) = error {
        mensajes.push(format!("{} (mostrando datos anteriores)", mensaje));
    }
    if let Some(mensaje) = save_error {
        mensajes.push(mensaje.clone());
    }
    mensajes
}

fn avisos_seccion(error: &Option<String>, save_error: &Option<String>) -> Html {
    html! {
        <>
            {for mensajes_seccion(error, save_error).into_iter().map(|mensaje| html! {
                <div class="form-message error">{mensaje}</div>
            })}
        </>
    }
}

fn indicador_carga(loading: bool, vacio: bool) -> Html {
    if loading && vacio {
        html! { <div class="cargando">{"Cargando..."}</div> }
    } else {
        html! {}
    }
}

#[function_component(App)]
fn app() -> Html {
    let seccion = use_state(|| Seccion::Animales);
    let modal = use_state(|| Modal::Ninguno);

    let api = ApiClient::new();
    let animales = use_resource::<Animal>(&api);
    let insumos = use_resource::<Insumo>(&api);
    let compras = use_resource::<Compra>(&api);
    let montas = use_resource::<Monta>(&api);
    let alimentaciones = use_resource::<Alimentacion>(&api);
    let pesajes = use_resource::<Pesaje>(&api);
    let produccion_leche = use_resource::<ProduccionLeche>(&api);
    let produccion_carne = use_resource::<ProduccionCarne>(&api);
    let lotes = use_resource::<Lote>(&api);
    let potreros = use_resource::<Potrero>(&api);
    let proveedores = use_resource::<Proveedor>(&api);
    let razas = use_resource::<Raza>(&api);
    let tipos_insumo = use_resource::<TipoInsumo>(&api);
    let unidades = use_resource::<UnidadMedida>(&api);
    let mataderos = use_resource::<Matadero>(&api);
    let tipos_monta = use_resource::<TipoMonta>(&api);

    let cerrar_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(Modal::Ninguno))
    };
    let abrir = |destino: Modal| {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(destino.clone()))
    };

    // Each form's on_success refetches every collection the mutation could
    // have touched, then closes the modal.
    let exito = |refrescos: Vec<Callback<()>>| {
        let modal = modal.clone();
        Callback::from(move |_: ()| {
            for refresco in &refrescos {
                refresco.emit(());
            }
            modal.set(Modal::Ninguno);
        })
    };

    let nav = html! {
        <nav class="secciones">
            {for SECCIONES.iter().map(|s| {
                let seccion = seccion.clone();
                let destino = *s;
                let activa = *seccion == destino;
                html! {
                    <button type="button"
                        class={if activa { "nav-btn activa" } else { "nav-btn" }}
                        onclick={Callback::from(move |_| seccion.set(destino))}>
                        {destino.etiqueta()}
                    </button>
                }
            })}
        </nav>
    };

    let contenido = match *seccion {
        Seccion::Animales => {
            let estado = &animales.state;
            let mutate = animales.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Animales"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Animal(None))}>{"Nuevo animal"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr>
                                <th>{"Arete"}</th><th>{"Sexo"}</th><th>{"Nacimiento"}</th>
                                <th>{"Lote"}</th><th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().filter(|a| a.deleted_at.is_none()).map(|a| {
                                let editar = abrir(Modal::Animal(Some(a.clone())));
                                let mutate = mutate.clone();
                                let id = a.animal_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={a.animal_id}>
                                        <td>{&a.arete}</td>
                                        <td>{a.sexo.as_str()}</td>
                                        <td>{fechas::para_mostrar(&a.fecha_nacimiento)}</td>
                                        <td>{a.lote_id.map(|id| nombre_lote(&lotes.state.items, id)).unwrap_or_default()}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Insumos => {
            let estado = &insumos.state;
            let mutate = insumos.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Insumos"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Insumo(None))}>{"Nuevo insumo"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr><th>{"Nombre"}</th><th>{"Stock"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().filter(|i| i.deleted_at.is_none()).map(|i| {
                                let editar = abrir(Modal::Insumo(Some(i.clone())));
                                let mutate = mutate.clone();
                                let id = i.insumo_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={i.insumo_id}>
                                        <td>{&i.nombre}</td>
                                        <td>{i.cantidad}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Compras => {
            let estado = &compras.state;
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Compras"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::CompraAnimales)}>{"Comprar animales"}</button>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::CompraInsumos)}>{"Comprar insumos"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr>
                                <th>{"Número"}</th><th>{"Proveedor"}</th><th>{"Fecha"}</th>
                                <th>{"Detalles"}</th><th>{"Total"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|c| html! {
                                <tr key={c.compra_id}>
                                    <td>{&c.numero}</td>
                                    <td>{nombre_proveedor(&proveedores.state.items, c.proveedor_id)}</td>
                                    <td>{fechas::para_mostrar(&c.fecha)}</td>
                                    <td>{c.detalles.len()}</td>
                                    <td>{format!("{:.2}", c.total)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Montas => {
            let estado = &montas.state;
            let mutate = montas.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Montas"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Monta(None))}>{"Nueva monta"}</button>
                        <button type="button" class="btn"
                            onclick={abrir(Modal::TipoMonta(None))}>{"Nuevo tipo"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr>
                                <th>{"Fecha"}</th><th>{"Hembra"}</th><th>{"Macho"}</th>
                                <th>{"Tipo"}</th><th>{"Estado"}</th><th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|m| {
                                let editar = abrir(Modal::Monta(Some(m.clone())));
                                let mutate = mutate.clone();
                                let id = m.monta_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={m.monta_id}>
                                        <td>{fechas::para_mostrar(&m.fecha)}</td>
                                        <td>{arete_de(&animales.state.items, m.animal_hembra_id)}</td>
                                        <td>{m.animal_macho_id.map(|id| arete_de(&animales.state.items, id)).unwrap_or_default()}</td>
                                        <td>{nombre_tipo_monta(&tipos_monta.state.items, m.tipo_monta_id)}</td>
                                        <td>{if m.estado { "Completada" } else { "Pendiente" }}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Alimentaciones => {
            let estado = &alimentaciones.state;
            let mutate = alimentaciones.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Alimentación"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Alimentacion)}>{"Nueva alimentación"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr>
                                <th>{"Fecha"}</th><th>{"Insumo"}</th><th>{"Lote"}</th>
                                <th>{"Cantidad"}</th><th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|a| {
                                let mutate = mutate.clone();
                                let id = a.alimentacion_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={a.alimentacion_id}>
                                        <td>{fechas::para_mostrar(&a.fecha)}</td>
                                        <td>{nombre_insumo(&insumos.state.items, a.insumo_id)}</td>
                                        <td>{nombre_lote(&lotes.state.items, a.lote_id)}</td>
                                        <td>{a.cantidad}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Pesajes => {
            let estado = &pesajes.state;
            let mutate = pesajes.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Pesajes"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Pesaje)}>{"Nuevo pesaje"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr><th>{"Fecha"}</th><th>{"Animal"}</th><th>{"Peso (kg)"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|p| {
                                let mutate = mutate.clone();
                                let id = p.pesaje_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={p.pesaje_id}>
                                        <td>{fechas::para_mostrar(&p.fecha)}</td>
                                        <td>{arete_de(&animales.state.items, p.animal_id)}</td>
                                        <td>{format!("{:.2}", p.peso)}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::ProduccionLeche => {
            let estado = &produccion_leche.state;
            let mutate = produccion_leche.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Producción de leche"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::ProduccionLeche)}>{"Nueva producción"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr><th>{"Fecha"}</th><th>{"Animal"}</th><th>{"Cantidad"}</th><th>{"Unidad"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|p| {
                                let mutate = mutate.clone();
                                let id = p.produccion_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={p.produccion_id}>
                                        <td>{fechas::para_mostrar(&p.fecha)}</td>
                                        <td>{arete_de(&animales.state.items, p.animal_id)}</td>
                                        <td>{format!("{:.2}", p.cantidad)}</td>
                                        <td>{nombre_unidad(&unidades.state.items, p.unidad_medida_id)}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::ProduccionCarne => {
            let estado = &produccion_carne.state;
            let mutate = produccion_carne.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Producción de carne"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::ProduccionCarne)}>{"Nueva producción"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr><th>{"Fecha"}</th><th>{"Animal"}</th><th>{"Peso (kg)"}</th><th>{"Matadero"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().map(|p| {
                                let mutate = mutate.clone();
                                let id = p.produccion_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                html! {
                                    <tr key={p.produccion_id}>
                                        <td>{fechas::para_mostrar(&p.fecha)}</td>
                                        <td>{arete_de(&animales.state.items, p.animal_id)}</td>
                                        <td>{format!("{:.2}", p.peso)}</td>
                                        <td>{p.matadero_id.map(|id| nombre_matadero(&mataderos.state.items, id)).unwrap_or_default()}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Lotes => {
            let estado = &lotes.state;
            let mutate = lotes.actions.mutate.clone();
            html! {
                <section>
                    <div class="cabecera-seccion">
                        <h2>{"Lotes"}</h2>
                        <button type="button" class="btn btn-primary"
                            onclick={abrir(Modal::Lote(None))}>{"Nuevo lote"}</button>
                    </div>
                    {avisos_seccion(&estado.error, &estado.save_error)}
                    {indicador_carga(estado.loading, estado.items.is_empty())}
                    <table>
                        <thead>
                            <tr><th>{"Nombre"}</th><th>{"Potrero"}</th><th></th></tr>
                        </thead>
                        <tbody>
                            {for estado.items.iter().filter(|l| l.deleted_at.is_none()).map(|l| {
                                let editar = abrir(Modal::Lote(Some(l.clone())));
                                let mutate = mutate.clone();
                                let id = l.lote_id;
                                let eliminar = Callback::from(move |_: MouseEvent| {
                                    mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                });
                                let potrero = l
                                    .potrero_id
                                    .and_then(|id| {
                                        potreros
                                            .state
                                            .items
                                            .iter()
                                            .find(|p| p.potrero_id == id)
                                            .map(|p| p.nombre.clone())
                                    })
                                    .unwrap_or_default();
                                html! {
                                    <tr key={l.lote_id}>
                                        <td>{&l.nombre}</td>
                                        <td>{potrero}</td>
                                        <td>
                                            <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                            <button type="button" class="btn btn-small" onclick={eliminar}
                                                disabled={estado.saving}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                </section>
            }
        }
        Seccion::Catalogos => {
            // Name-only reference tables, all through one generic form.
            let catalogo = |titulo: &'static str,
                            recurso: &'static str,
                            filas: Vec<(i64, String)>,
                            mutate: Callback<Envio>,
                            saving: bool,
                            avisos: Html| {
                html! {
                    <div class="catalogo">
                        <div class="cabecera-seccion">
                            <h3>{titulo}</h3>
                            <button type="button" class="btn btn-small"
                                onclick={abrir(Modal::Catalogo(titulo, recurso, None))}>
                                {"Nuevo"}
                            </button>
                        </div>
                        {avisos}
                        <table>
                            <tbody>
                                {for filas.into_iter().map(|(id, nombre)| {
                                    let editar = abrir(Modal::Catalogo(
                                        titulo,
                                        recurso,
                                        Some((id, nombre.clone())),
                                    ));
                                    let mutate = mutate.clone();
                                    let eliminar = Callback::from(move |_: MouseEvent| {
                                        mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                    });
                                    html! {
                                        <tr key={id}>
                                            <td>{nombre}</td>
                                            <td>
                                                <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                                <button type="button" class="btn btn-small" onclick={eliminar}
                                                    disabled={saving}>{"Eliminar"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            };

            let filas_potreros: Vec<(i64, String)> = potreros
                .state
                .items
                .iter()
                .filter(|p| p.deleted_at.is_none())
                .map(|p| (p.potrero_id, p.nombre.clone()))
                .collect();
            let filas_proveedores: Vec<(i64, String)> = proveedores
                .state
                .items
                .iter()
                .filter(|p| p.deleted_at.is_none())
                .map(|p| (p.proveedor_id, p.nombre.clone()))
                .collect();
            let filas_razas: Vec<(i64, String)> = razas
                .state
                .items
                .iter()
                .filter(|r| r.deleted_at.is_none())
                .map(|r| (r.raza_id, r.nombre.clone()))
                .collect();
            let filas_tipos_insumo: Vec<(i64, String)> = tipos_insumo
                .state
                .items
                .iter()
                .filter(|t| t.deleted_at.is_none())
                .map(|t| (t.tipo_insumo_id, t.nombre.clone()))
                .collect();
            let filas_unidades: Vec<(i64, String)> = unidades
                .state
                .items
                .iter()
                .filter(|u| u.deleted_at.is_none())
                .map(|u| (u.unidad_medida_id, u.nombre.clone()))
                .collect();
            let filas_mataderos: Vec<(i64, String)> = mataderos
                .state
                .items
                .iter()
                .filter(|m| m.deleted_at.is_none())
                .map(|m| (m.matadero_id, m.nombre.clone()))
                .collect();

            let mutate_tipos_monta = tipos_monta.actions.mutate.clone();
            html! {
                <section class="catalogos">
                    {catalogo("Potreros", "potreros", filas_potreros,
                        potreros.actions.mutate.clone(), potreros.state.saving,
                        avisos_seccion(&potreros.state.error, &potreros.state.save_error))}
                    {catalogo("Proveedores", "proveedores", filas_proveedores,
                        proveedores.actions.mutate.clone(), proveedores.state.saving,
                        avisos_seccion(&proveedores.state.error, &proveedores.state.save_error))}
                    {catalogo("Razas", "razas", filas_razas,
                        razas.actions.mutate.clone(), razas.state.saving,
                        avisos_seccion(&razas.state.error, &razas.state.save_error))}
                    {catalogo("Tipos de insumo", "tipos-insumo", filas_tipos_insumo,
                        tipos_insumo.actions.mutate.clone(), tipos_insumo.state.saving,
                        avisos_seccion(&tipos_insumo.state.error, &tipos_insumo.state.save_error))}
                    {catalogo("Unidades de medida", "unidades-medida", filas_unidades,
                        unidades.actions.mutate.clone(), unidades.state.saving,
                        avisos_seccion(&unidades.state.error, &unidades.state.save_error))}
                    {catalogo("Mataderos", "mataderos", filas_mataderos,
                        mataderos.actions.mutate.clone(), mataderos.state.saving,
                        avisos_seccion(&mataderos.state.error, &mataderos.state.save_error))}
                    <div class="catalogo">
                        <div class="cabecera-seccion">
                            <h3>{"Tipos de monta"}</h3>
                            <button type="button" class="btn btn-small"
                                onclick={abrir(Modal::TipoMonta(None))}>{"Nuevo"}</button>
                        </div>
                        {avisos_seccion(&tipos_monta.state.error, &tipos_monta.state.save_error)}
                        <table>
                            <tbody>
                                {for tipos_monta.state.items.iter().filter(|t| t.deleted_at.is_none()).map(|t| {
                                    let editar = abrir(Modal::TipoMonta(Some(t.clone())));
                                    let mutate = mutate_tipos_monta.clone();
                                    let id = t.tipo_monta_id;
                                    let eliminar = Callback::from(move |_: MouseEvent| {
                                        mutate.emit(Envio::nuevo(Mutacion::Eliminar(id)));
                                    });
                                    let padre = t
                                        .padre_id
                                        .map(|id| nombre_tipo_monta(&tipos_monta.state.items, id))
                                        .unwrap_or_default();
                                    html! {
                                        <tr key={t.tipo_monta_id}>
                                            <td>{&t.nombre}</td>
                                            <td>{padre}</td>
                                            <td>
                                                <button type="button" class="btn btn-small" onclick={editar}>{"Editar"}</button>
                                                <button type="button" class="btn btn-small" onclick={eliminar}
                                                    disabled={tipos_monta.state.saving}>{"Eliminar"}</button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                </section>
            }
        }
    };

    let modal_abierto = match (*modal).clone() {
        Modal::Ninguno => html! {},
        Modal::Animal(editar) => html! {
            <AnimalForm
                editar={editar}
                animales={animales.state.items.clone()}
                razas={razas.state.items.clone()}
                lotes={lotes.state.items.clone()}
                guardando={animales.state.saving}
                mutate={animales.actions.mutate.clone()}
                on_success={exito(vec![animales.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Insumo(editar) => html! {
            <InsumoForm
                editar={editar}
                tipos={tipos_insumo.state.items.clone()}
                unidades={unidades.state.items.clone()}
                guardando={insumos.state.saving}
                mutate={insumos.actions.mutate.clone()}
                on_success={exito(vec![insumos.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::CompraAnimales => html! {
            <CompraForm
                tipo={TipoCompra::Animales}
                proveedores={proveedores.state.items.clone()}
                animales={animales.state.items.clone()}
                insumos={insumos.state.items.clone()}
                compras={compras.state.items.clone()}
                guardando={compras.state.saving}
                mutate={compras.actions.mutate.clone()}
                on_success={exito(vec![
                    compras.actions.refresh.clone(),
                    animales.actions.refresh.clone(),
                ])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::CompraInsumos => html! {
            <CompraForm
                tipo={TipoCompra::Insumos}
                proveedores={proveedores.state.items.clone()}
                animales={animales.state.items.clone()}
                insumos={insumos.state.items.clone()}
                compras={compras.state.items.clone()}
                guardando={compras.state.saving}
                mutate={compras.actions.mutate.clone()}
                on_success={exito(vec![
                    compras.actions.refresh.clone(),
                    insumos.actions.refresh.clone(),
                ])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Monta(editar) => html! {
            <MontaForm
                editar={editar}
                animales={animales.state.items.clone()}
                tipos={tipos_monta.state.items.clone()}
                guardando={montas.state.saving}
                mutate={montas.actions.mutate.clone()}
                on_success={exito(vec![montas.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Alimentacion => html! {
            <AlimentacionForm
                insumos={insumos.state.items.clone()}
                lotes={lotes.state.items.clone()}
                guardando={alimentaciones.state.saving}
                mutate={alimentaciones.actions.mutate.clone()}
                on_success={exito(vec![
                    alimentaciones.actions.refresh.clone(),
                    insumos.actions.refresh.clone(),
                ])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Pesaje => html! {
            <PesajeForm
                animales={animales.state.items.clone()}
                guardando={pesajes.state.saving}
                mutate={pesajes.actions.mutate.clone()}
                on_success={exito(vec![pesajes.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::ProduccionLeche => html! {
            <ProduccionLecheForm
                animales={animales.state.items.clone()}
                unidades={unidades.state.items.clone()}
                guardando={produccion_leche.state.saving}
                mutate={produccion_leche.actions.mutate.clone()}
                on_success={exito(vec![produccion_leche.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::ProduccionCarne => html! {
            <ProduccionCarneForm
                animales={animales.state.items.clone()}
                mataderos={mataderos.state.items.clone()}
                pesajes={pesajes.state.items.clone()}
                guardando={produccion_carne.state.saving}
                mutate={produccion_carne.actions.mutate.clone()}
                on_success={exito(vec![produccion_carne.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Lote(editar) => html! {
            <LoteForm
                editar={editar}
                potreros={potreros.state.items.clone()}
                guardando={lotes.state.saving}
                mutate={lotes.actions.mutate.clone()}
                on_success={exito(vec![lotes.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::TipoMonta(editar) => html! {
            <TipoMontaForm
                editar={editar}
                tipos={tipos_monta.state.items.clone()}
                guardando={tipos_monta.state.saving}
                mutate={tipos_monta.actions.mutate.clone()}
                on_success={exito(vec![tipos_monta.actions.refresh.clone()])}
                on_close={cerrar_modal.clone()} />
        },
        Modal::Catalogo(titulo, recurso, editar) => {
            let (refresco, mutate, guardando) = match recurso {
                "potreros" => (
                    potreros.actions.refresh.clone(),
                    potreros.actions.mutate.clone(),
                    potreros.state.saving,
                ),
                "proveedores" => (
                    proveedores.actions.refresh.clone(),
                    proveedores.actions.mutate.clone(),
                    proveedores.state.saving,
                ),
                "razas" => (
                    razas.actions.refresh.clone(),
                    razas.actions.mutate.clone(),
                    razas.state.saving,
                ),
                "tipos-insumo" => (
                    tipos_insumo.actions.refresh.clone(),
                    tipos_insumo.actions.mutate.clone(),
                    tipos_insumo.state.saving,
                ),
                "unidades-medida" => (
                    unidades.actions.refresh.clone(),
                    unidades.actions.mutate.clone(),
                    unidades.state.saving,
                ),
                _ => (
                    mataderos.actions.refresh.clone(),
                    mataderos.actions.mutate.clone(),
                    mataderos.state.saving,
                ),
            };
            html! {
                <CatalogoForm
                    titulo={titulo}
                    editar={editar}
                    guardando={guardando}
                    mutate={mutate}
                    on_success={exito(vec![refresco])}
                    on_close={cerrar_modal.clone()} />
            }
        }
    };

    html! {
        <div class="app">
            <header>
                <h1>{"Gestión ganadera"}</h1>
                <CampanaNotificaciones usuario_id={USUARIO_ID} />
            </header>
            {nav}
            <main>{contenido}</main>
            {modal_abierto}
        </div>
    }
}

fn main() {
    services::logging::Logger::info("app", "Aplicación iniciada");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensajes_seccion_incluye_fallo_de_guardado() {
        // A failed row delete has no modal to report into; its message has
        // to reach the section banner.
        let mensajes = mensajes_seccion(&None, &Some("No se pudo eliminar".to_string()));
        assert_eq!(mensajes, vec!["No se pudo eliminar".to_string()]);
    }

    #[test]
    fn test_mensajes_seccion_combina_carga_y_guardado() {
        let mensajes = mensajes_seccion(
            &Some("Error de conexión".to_string()),
            &Some("No se pudo eliminar".to_string()),
        );
        assert_eq!(
            mensajes,
            vec![
                "Error de conexión (mostrando datos anteriores)".to_string(),
                "No se pudo eliminar".to_string(),
            ]
        );
    }

    #[test]
    fn test_mensajes_seccion_vacio_sin_errores() {
        assert!(mensajes_seccion(&None, &None).is_empty());
    }
}
