use chrono::{Datelike, NaiveDate};
use shared::{Animal, Compra, Insumo, NuevoDetalle, Sexo, SoftDelete, TipoMonta};
use std::collections::HashSet;

/// Minimum breeding age for females, in whole months.
pub const EDAD_MINIMA_HEMBRA: i32 = 15;
/// Minimum breeding age for males, in whole months.
pub const EDAD_MINIMA_MACHO: i32 = 18;

/// Whole months elapsed between two dates. A month only counts once the
/// day-of-month has been reached, so one day short of a month boundary
/// rounds down.
pub fn meses_entre(desde: NaiveDate, hasta: NaiveDate) -> i32 {
    let mut meses =
        (hasta.year() - desde.year()) * 12 + (hasta.month() as i32 - desde.month() as i32);
    if hasta.day() < desde.day() {
        meses -= 1;
    }
    meses
}

/// Breeding eligibility at a candidate event date. Boundary ages are
/// inclusive: exactly 15 months (female) / 18 months (male) qualify.
pub fn elegible_para_monta(sexo: Sexo, nacimiento: NaiveDate, fecha_evento: NaiveDate) -> bool {
    let edad = meses_entre(nacimiento, fecha_evento);
    match sexo {
        Sexo::H => edad >= EDAD_MINIMA_HEMBRA,
        Sexo::M => edad >= EDAD_MINIMA_MACHO,
    }
}

/// Animals of the given sex old enough to breed at the event date.
/// Animals with an unparseable birth date are excluded rather than guessed.
pub fn candidatos_monta(animales: &[Animal], sexo: Sexo, fecha_evento: NaiveDate) -> Vec<Animal> {
    animales
        .iter()
        .filter(|a| a.activo() && a.sexo == sexo)
        .filter(|a| match NaiveDate::parse_from_str(&a.fecha_nacimiento, "%Y-%m-%d") {
            Ok(nacimiento) => elegible_para_monta(sexo, nacimiento, fecha_evento),
            Err(_) => false,
        })
        .cloned()
        .collect()
}

/// Mother/father options: active animals of the required sex, excluding the
/// animal being edited.
pub fn candidatos_progenitor(
    animales: &[Animal],
    sexo: Sexo,
    excluir: Option<i64>,
) -> Vec<Animal> {
    animales
        .iter()
        .filter(|a| a.activo() && a.sexo == sexo && Some(a.animal_id) != excluir)
        .cloned()
        .collect()
}

/// Supplies selectable for a feeding record: in stock and not soft-deleted.
/// The stock figure is whatever the last fetch returned; it is never
/// decremented locally, so the server must re-validate.
pub fn insumos_con_stock(insumos: &[Insumo]) -> Vec<Insumo> {
    insumos
        .iter()
        .filter(|i| i.activo() && i.cantidad > 0)
        .cloned()
        .collect()
}

/// Animals eligible for a new purchase line: no recorded parents (they did
/// not originate on the farm) and not already referenced by any existing
/// purchase's line items.
pub fn animales_comprables(animales: &[Animal], compras: &[Compra]) -> Vec<Animal> {
    let ya_comprados: HashSet<i64> = compras
        .iter()
        .flat_map(|c| c.detalles.iter())
        .filter_map(|d| d.animal_id)
        .collect();
    animales
        .iter()
        .filter(|a| a.activo() && a.sin_padres() && !ya_comprados.contains(&a.animal_id))
        .cloned()
        .collect()
}

/// Valid parent options for an event type: every active type except the
/// node being edited and its descendants, so the selector cannot introduce
/// a cycle. Real cycle prevention is still the server's job.
pub fn padres_validos(tipos: &[TipoMonta], editando: Option<i64>) -> Vec<TipoMonta> {
    let mut excluidos: HashSet<i64> = HashSet::new();
    if let Some(id) = editando {
        excluidos.insert(id);
        loop {
            let antes = excluidos.len();
            for tipo in tipos {
                if let Some(padre) = tipo.padre_id {
                    if excluidos.contains(&padre) {
                        excluidos.insert(tipo.tipo_monta_id);
                    }
                }
            }
            if excluidos.len() == antes {
                break;
            }
        }
    }
    tipos
        .iter()
        .filter(|t| t.activo() && !excluidos.contains(&t.tipo_monta_id))
        .cloned()
        .collect()
}

/// Selection options for any soft-deletable catalog.
pub fn opciones_activas<T: SoftDelete + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|i| i.activo()).cloned().collect()
}

/// Total of a purchase being drafted: Σ precio × cantidad, quantity
/// defaulting to 1 for animal lines.
pub fn total_nueva_compra(detalles: &[NuevoDetalle]) -> f64 {
    detalles
        .iter()
        .map(|d| d.precio * d.cantidad.unwrap_or(1) as f64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(texto: &str) -> NaiveDate {
        NaiveDate::parse_from_str(texto, "%Y-%m-%d").unwrap()
    }

    fn animal(id: i64, sexo: Sexo, nacimiento: &str) -> Animal {
        Animal {
            animal_id: id,
            arete: format!("A-{:03}", id),
            sexo,
            fecha_nacimiento: nacimiento.to_string(),
            fecha_destete: None,
            raza_id: None,
            lote_id: None,
            animal_madre_id: None,
            animal_padre_id: None,
            imagen: None,
            deleted_at: None,
        }
    }

    fn insumo(id: i64, cantidad: i64) -> Insumo {
        Insumo {
            insumo_id: id,
            nombre: format!("Insumo {}", id),
            tipo_insumo_id: 1,
            unidad_medida_id: 1,
            cantidad,
            descripcion: None,
            imagen: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_meses_entre_cuenta_meses_completos() {
        assert_eq!(meses_entre(fecha("2023-01-15"), fecha("2024-04-15")), 15);
        assert_eq!(meses_entre(fecha("2023-01-15"), fecha("2024-04-14")), 14);
        assert_eq!(meses_entre(fecha("2023-01-15"), fecha("2023-01-20")), 0);
        assert_eq!(meses_entre(fecha("2022-11-30"), fecha("2023-02-28")), 2);
    }

    #[test]
    fn test_hembra_elegible_exactamente_a_los_15_meses() {
        let nacimiento = fecha("2023-01-15");
        assert!(elegible_para_monta(Sexo::H, nacimiento, fecha("2024-04-15")));
        // One day short is not eligible.
        assert!(!elegible_para_monta(Sexo::H, nacimiento, fecha("2024-04-14")));
    }

    #[test]
    fn test_macho_elegible_exactamente_a_los_18_meses() {
        let nacimiento = fecha("2023-01-15");
        assert!(elegible_para_monta(Sexo::M, nacimiento, fecha("2024-07-15")));
        assert!(!elegible_para_monta(Sexo::M, nacimiento, fecha("2024-07-14")));
        // 15 months is enough for a female but not for a male.
        assert!(!elegible_para_monta(Sexo::M, nacimiento, fecha("2024-04-15")));
    }

    #[test]
    fn test_candidatos_monta_filtra_sexo_edad_y_borrados() {
        let mut vieja = animal(1, Sexo::H, "2020-05-01");
        let joven = animal(2, Sexo::H, "2024-01-01");
        let macho = animal(3, Sexo::M, "2020-05-01");
        let evento = fecha("2024-06-01");

        let candidatas = candidatos_monta(&[vieja.clone(), joven, macho], Sexo::H, evento);
        assert_eq!(candidatas.len(), 1);
        assert_eq!(candidatas[0].animal_id, 1);

        vieja.deleted_at = Some("2024-01-01T00:00:00Z".to_string());
        assert!(candidatos_monta(&[vieja], Sexo::H, evento).is_empty());
    }

    #[test]
    fn test_insumo_sin_stock_no_es_seleccionable() {
        let agotado = insumo(1, 0);
        let disponible = insumo(2, 3);
        let opciones = insumos_con_stock(&[agotado, disponible]);
        assert_eq!(opciones.len(), 1);
        assert_eq!(opciones[0].insumo_id, 2);
    }

    #[test]
    fn test_animal_con_padres_no_es_comprable() {
        let mut con_madre = animal(1, Sexo::M, "2022-01-01");
        con_madre.animal_madre_id = Some(9);
        let libre = animal(2, Sexo::M, "2022-01-01");

        let opciones = animales_comprables(&[con_madre, libre], &[]);
        assert_eq!(opciones.len(), 1);
        assert_eq!(opciones[0].animal_id, 2);
    }

    #[test]
    fn test_animal_ya_comprado_queda_excluido() {
        use shared::CompraDetalle;
        let comprado = animal(1, Sexo::M, "2022-01-01");
        let libre = animal(2, Sexo::M, "2022-01-01");
        let compra = Compra {
            compra_id: 1,
            numero: "C-00001".to_string(),
            proveedor_id: 1,
            fecha: "2024-01-10".to_string(),
            detalles: vec![CompraDetalle {
                detalle_id: 1,
                animal_id: Some(1),
                insumo_id: None,
                cantidad: None,
                precio: 500.0,
            }],
            total: 500.0,
        };

        let opciones = animales_comprables(&[comprado, libre], &[compra]);
        assert_eq!(opciones.len(), 1);
        assert_eq!(opciones[0].animal_id, 2);
    }

    #[test]
    fn test_padres_validos_excluye_descendientes() {
        let tipo = |id: i64, padre: Option<i64>| TipoMonta {
            tipo_monta_id: id,
            nombre: format!("Tipo {}", id),
            padre_id: padre,
            deleted_at: None,
        };
        // 1 → 2 → 3, and 4 unrelated.
        let tipos = vec![tipo(1, None), tipo(2, Some(1)), tipo(3, Some(2)), tipo(4, None)];

        let opciones = padres_validos(&tipos, Some(1));
        let ids: Vec<i64> = opciones.iter().map(|t| t.tipo_monta_id).collect();
        assert_eq!(ids, vec![4]);

        // Without an edit target nothing is excluded.
        assert_eq!(padres_validos(&tipos, None).len(), 4);
    }

    #[test]
    fn test_total_nueva_compra() {
        let detalles = vec![
            NuevoDetalle {
                animal_id: None,
                insumo_id: Some(1),
                cantidad: Some(5),
                precio: 10.00,
            },
            NuevoDetalle {
                animal_id: None,
                insumo_id: Some(2),
                cantidad: Some(2),
                precio: 25.50,
            },
        ];
        assert_eq!(total_nueva_compra(&detalles), 101.00);
    }
}
