pub mod alimentacion_form;
pub mod animal_form;
pub mod catalogo_form;
pub mod compra_form;
pub mod insumo_form;
pub mod lote_form;
pub mod monta_form;
pub mod pesaje_form;
pub mod produccion_carne_form;
pub mod produccion_leche_form;
pub mod tipo_monta_form;

use crate::services::validation::ErroresFormulario;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Inline error rendered beneath the offending input.
pub(crate) fn error_campo(errores: &ErroresFormulario, campo: &str) -> Html {
    match errores.campo(campo) {
        Some(mensaje) => html! { <div class="field-error">{mensaje}</div> },
        None => html! {},
    }
}

/// Banner for errors without an obvious field.
pub(crate) fn banner_error(errores: &ErroresFormulario) -> Html {
    match &errores.general {
        Some(mensaje) => html! { <div class="form-message error">{mensaje}</div> },
        None => html! {},
    }
}

pub(crate) fn valor_input(e: &Event) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

pub(crate) fn valor_select(e: &Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

pub(crate) fn valor_textarea(e: &Event) -> String {
    let area: HtmlTextAreaElement = e.target_unchecked_into();
    area.value()
}
