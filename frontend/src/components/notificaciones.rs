use crate::hooks::use_notificaciones;
use crate::services::api::ApiClient;
use crate::services::fechas;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CampanaProps {
    pub usuario_id: i64,
}

/// Notification bell with an unread badge and a drop-down feed panel.
/// Mounting it fetches the feed and opens the push channel for the user.
#[function_component(CampanaNotificaciones)]
pub fn campana_notificaciones(props: &CampanaProps) -> Html {
    let notificaciones = use_notificaciones(&ApiClient::new());
    let abierto = use_state(|| false);

    use_effect_with(props.usuario_id, {
        let fetch = notificaciones.actions.fetch.clone();
        move |usuario_id: &i64| {
            fetch.emit(*usuario_id);
            || ()
        }
    });

    let on_toggle = {
        let abierto = abierto.clone();
        Callback::from(move |_: MouseEvent| abierto.set(!*abierto))
    };

    let on_marcar_todas = {
        let marcar_todas = notificaciones.actions.marcar_todas.clone();
        let usuario_id = props.usuario_id;
        Callback::from(move |_: MouseEvent| marcar_todas.emit(usuario_id))
    };

    let feed = &notificaciones.state.feed;

    html! {
        <div class="notificaciones">
            <button type="button" class="btn-campana" onclick={on_toggle}>
                {"🔔"}
                if feed.no_leidas > 0 {
                    <span class="badge">{feed.no_leidas}</span>
                }
            </button>
            if *abierto {
                <div class="panel-notificaciones">
                    <div class="panel-cabecera">
                        <strong>{"Notificaciones"}</strong>
                        <button type="button" class="btn btn-small" onclick={on_marcar_todas}
                            disabled={feed.no_leidas == 0}>
                            {"Marcar todas como leídas"}
                        </button>
                    </div>
                    if let Some(mensaje) = &notificaciones.state.error {
                        <div class="form-message error">{mensaje}</div>
                    }
                    if feed.items.is_empty() {
                        <div class="panel-vacio">{"Sin notificaciones"}</div>
                    }
                    <ul>
                        {for feed.items.iter().map(|n| {
                            let marcar_leida = notificaciones.actions.marcar_leida.clone();
                            let id = n.notificacion_id;
                            let on_click = Callback::from(move |_: MouseEvent| {
                                marcar_leida.emit(id);
                            });
                            html! {
                                <li key={n.notificacion_id}
                                    class={if n.leida { "leida" } else { "no-leida" }}
                                    onclick={on_click}>
                                    <strong>{&n.titulo}</strong>
                                    <p>{&n.mensaje}</p>
                                    <span class="fecha">{fechas::para_mostrar(&n.fecha)}</span>
                                </li>
                            }
                        })}
                    </ul>
                </div>
            }
        </div>
    }
}
