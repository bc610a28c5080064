use chrono::NaiveDate;

/// Get current date in YYYY-MM-DD format.
///
/// Built from the browser's local calendar fields, never from a UTC ISO
/// conversion: west of Greenwich the UTC date flips in the evening and
/// would shift the serialized day.
pub fn hoy() -> String {
    use js_sys::Date;
    let ahora = Date::new_0();
    let anio = ahora.get_full_year();
    let mes = ahora.get_month() + 1; // JavaScript months are 0-indexed
    let dia = ahora.get_date();

    formatear_ymd(anio as i32, mes, dia)
}

/// Render calendar components as the `YYYY-MM-DD` wire string.
pub fn formatear_ymd(anio: i32, mes: u32, dia: u32) -> String {
    format!("{:04}-{:02}-{:02}", anio, mes, dia)
}

/// Parse a `YYYY-MM-DD` string into a calendar date, rejecting impossible
/// dates.
pub fn parsear(fecha: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(fecha.trim(), "%Y-%m-%d").ok()
}

/// Format a wire date for display, e.g. "15/03/2024". Unparseable input is
/// shown as-is.
pub fn para_mostrar(fecha: &str) -> String {
    match parsear(fecha) {
        Some(f) => f.format("%d/%m/%Y").to_string(),
        None => fecha.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatear_ymd_literal() {
        // The serialized form is the literal local-calendar string,
        // independent of any UTC offset.
        assert_eq!(formatear_ymd(2024, 3, 15), "2024-03-15");
        assert_eq!(formatear_ymd(2024, 11, 3), "2024-11-03");
    }

    #[test]
    fn test_parsear() {
        assert!(parsear("2024-03-15").is_some());
        assert!(parsear("2024-02-30").is_none());
        assert!(parsear("no-es-fecha").is_none());
    }

    #[test]
    fn test_para_mostrar() {
        assert_eq!(para_mostrar("2024-03-15"), "15/03/2024");
        assert_eq!(para_mostrar("???"), "???");
    }
}
