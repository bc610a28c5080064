use chrono::NaiveDate;
use std::collections::HashMap;

/// Field-level and form-level errors accumulated before submission or
/// routed from a server message after it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErroresFormulario {
    campos: HashMap<String, String>,
    pub general: Option<String>,
}

impl ErroresFormulario {
    pub fn vacio(&self) -> bool {
        self.campos.is_empty() && self.general.is_none()
    }

    pub fn agregar(&mut self, campo: &str, mensaje: impl Into<String>) {
        self.campos.insert(campo.to_string(), mensaje.into());
    }

    /// Run a synchronous rule against a field value, recording the failure.
    pub fn validar(&mut self, campo: &str, resultado: Option<String>) {
        if let Some(mensaje) = resultado {
            self.agregar(campo, mensaje);
        }
    }

    pub fn campo(&self, campo: &str) -> Option<&str> {
        self.campos.get(campo).map(String::as_str)
    }

    /// Route a server-side failure message into the form: field slot when a
    /// known substring matches, general banner otherwise.
    pub fn desde_servidor(mensaje: &str) -> Self {
        let mut errores = Self::default();
        match clasificar_error_servidor(mensaje) {
            ErrorServidor::Campo { campo, mensaje } => errores.agregar(campo, mensaje),
            ErrorServidor::General(mensaje) => errores.general = Some(mensaje),
        }
        errores
    }
}

/// Destination of a server error message after substring routing.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorServidor {
    Campo {
        campo: &'static str,
        mensaje: String,
    },
    General(String),
}

/// Substring heuristics over the server's free-text Spanish `msg`. Fragile
/// by nature (a wording change breaks the routing, see DESIGN.md); kept
/// isolated here so a structured code→field mapping can replace it.
pub fn clasificar_error_servidor(mensaje: &str) -> ErrorServidor {
    let normalizado = mensaje.to_lowercase();
    if normalizado.contains("nombre") && normalizado.contains("existe") {
        return ErrorServidor::Campo {
            campo: "nombre",
            mensaje: mensaje.to_string(),
        };
    }
    if normalizado.contains("arete") && normalizado.contains("existe") {
        return ErrorServidor::Campo {
            campo: "arete",
            mensaje: mensaje.to_string(),
        };
    }
    if normalizado.contains("permisos") {
        return ErrorServidor::General(mensaje.to_string());
    }
    ErrorServidor::General(mensaje.to_string())
}

pub fn requerido(valor: &str) -> Option<String> {
    if valor.trim().is_empty() {
        Some("Este campo es obligatorio".to_string())
    } else {
        None
    }
}

/// Required `<select>` value: the empty string is the "no selection"
/// placeholder.
pub fn seleccion_requerida(valor: &str) -> Option<String> {
    if valor.is_empty() {
        Some("Debe seleccionar una opción".to_string())
    } else {
        None
    }
}

pub fn fecha_valida(valor: &str) -> Option<String> {
    if valor.trim().is_empty() {
        return Some("La fecha es obligatoria".to_string());
    }
    match NaiveDate::parse_from_str(valor.trim(), "%Y-%m-%d") {
        Ok(_) => None,
        Err(_) => Some("Fecha inválida".to_string()),
    }
}

pub fn entero_en_rango(valor: &str, minimo: i64, maximo: i64) -> Option<String> {
    match valor.trim().parse::<i64>() {
        Ok(n) if n >= minimo && n <= maximo => None,
        Ok(_) => Some(format!("Debe estar entre {} y {}", minimo, maximo)),
        Err(_) => Some("Debe ser un número entero".to_string()),
    }
}

pub fn decimal_positivo(valor: &str) -> Option<String> {
    match valor.trim().parse::<f64>() {
        Ok(n) if n > 0.0 => None,
        Ok(_) => Some("Debe ser mayor que cero".to_string()),
        Err(_) => Some("Debe ser un número".to_string()),
    }
}

/// `<select>` values are strings; stored ids are integers. Empty string is
/// "no selection" for optional foreign keys.
pub fn id_opcional(valor: &str) -> Option<i64> {
    if valor.is_empty() {
        None
    } else {
        valor.parse::<i64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requerido() {
        assert!(requerido("").is_some());
        assert!(requerido("   ").is_some());
        assert!(requerido("A-001").is_none());
    }

    #[test]
    fn test_fecha_valida() {
        assert!(fecha_valida("2024-03-15").is_none());
        assert!(fecha_valida("15/03/2024").is_some());
        assert!(fecha_valida("2024-13-01").is_some());
        assert!(fecha_valida("").is_some());
    }

    #[test]
    fn test_entero_en_rango() {
        assert!(entero_en_rango("5", 1, 10).is_none());
        assert!(entero_en_rango("0", 1, 10).is_some());
        assert!(entero_en_rango("abc", 1, 10).is_some());
    }

    #[test]
    fn test_decimal_positivo() {
        assert!(decimal_positivo("25.50").is_none());
        assert!(decimal_positivo("0").is_some());
        assert!(decimal_positivo("-3").is_some());
        assert!(decimal_positivo("x").is_some());
    }

    #[test]
    fn test_nombre_duplicado_se_enruta_al_campo() {
        let clasificado = clasificar_error_servidor("El nombre ya existe");
        assert_eq!(
            clasificado,
            ErrorServidor::Campo {
                campo: "nombre",
                mensaje: "El nombre ya existe".to_string(),
            }
        );
    }

    #[test]
    fn test_arete_duplicado_se_enruta_al_campo() {
        let clasificado = clasificar_error_servidor("El arete A-001 ya existe");
        assert!(matches!(
            clasificado,
            ErrorServidor::Campo { campo: "arete", .. }
        ));
    }

    #[test]
    fn test_mensaje_de_permisos_va_al_banner() {
        let clasificado = clasificar_error_servidor("No tiene permisos para esta acción");
        assert!(matches!(clasificado, ErrorServidor::General(_)));
    }

    #[test]
    fn test_mensaje_desconocido_va_al_banner() {
        let clasificado = clasificar_error_servidor("Stock insuficiente para el insumo");
        assert_eq!(
            clasificado,
            ErrorServidor::General("Stock insuficiente para el insumo".to_string())
        );
    }

    #[test]
    fn test_id_opcional() {
        assert_eq!(id_opcional(""), None);
        assert_eq!(id_opcional("42"), Some(42));
        assert_eq!(id_opcional("x"), None);
    }

    #[test]
    fn test_errores_formulario() {
        let mut errores = ErroresFormulario::default();
        assert!(errores.vacio());
        errores.validar("arete", requerido(""));
        errores.validar("fecha", fecha_valida("2024-03-15"));
        assert!(!errores.vacio());
        assert!(errores.campo("arete").is_some());
        assert!(errores.campo("fecha").is_none());
    }
}
