use serde::{Deserialize, Serialize};
use std::fmt;

/// Response envelope used by every REST endpoint: `{ok, data, msg}`.
///
/// `data` carries the payload on success; `msg` carries a human-readable
/// (Spanish) message, present on failures and on some successes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envoltura<T> {
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// A server-backed REST collection: knows its resource path and its id.
pub trait Recurso {
    /// Path segment under `/api/`, e.g. `animales`.
    const RECURSO: &'static str;

    fn id(&self) -> i64;
}

/// Records carrying a soft-delete marker. Soft-deleted rows stay visible in
/// historical data but never appear in selection option lists.
pub trait SoftDelete {
    fn deleted_at(&self) -> Option<&str>;

    fn activo(&self) -> bool {
        self.deleted_at().is_none()
    }
}

/// Animal sex as stored on the wire: `M` (macho) / `H` (hembra).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sexo {
    M,
    H,
}

impl Sexo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sexo::M => "M",
            Sexo::H => "H",
        }
    }
}

impl fmt::Display for Sexo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An animal in the herd. `arete` is the unique ear-tag identifier.
/// Mother/father references are self-referential and absent for animals
/// that did not originate on the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub animal_id: i64,
    pub arete: String,
    pub sexo: Sexo,
    /// Birth date, `YYYY-MM-DD`.
    pub fecha_nacimiento: String,
    /// Weaning date, `YYYY-MM-DD`.
    #[serde(default)]
    pub fecha_destete: Option<String>,
    #[serde(default)]
    pub raza_id: Option<i64>,
    #[serde(default)]
    pub lote_id: Option<i64>,
    #[serde(default)]
    pub animal_madre_id: Option<i64>,
    #[serde(default)]
    pub animal_padre_id: Option<i64>,
    /// Stored image path, if a photo was uploaded.
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Animal {
    /// True when neither parent is recorded, i.e. the animal did not
    /// originate on the farm. Used by the purchase-eligibility filter.
    pub fn sin_padres(&self) -> bool {
        self.animal_madre_id.is_none() && self.animal_padre_id.is_none()
    }
}

impl Recurso for Animal {
    const RECURSO: &'static str = "animales";

    fn id(&self) -> i64 {
        self.animal_id
    }
}

impl SoftDelete for Animal {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// A consumable supply (feed, medicine) tracked by integer stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insumo {
    pub insumo_id: i64,
    /// Unique name, enforced server-side.
    pub nombre: String,
    pub tipo_insumo_id: i64,
    pub unidad_medida_id: i64,
    /// Current stock. Never decremented client-side; the next fetch is the
    /// only source of truth after a consumption is recorded.
    pub cantidad: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Insumo {
    const RECURSO: &'static str = "insumos";

    fn id(&self) -> i64 {
        self.insumo_id
    }
}

impl SoftDelete for Insumo {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// One purchase line: either an animal (`animal_id`, quantity implicitly 1)
/// or a supply (`insumo_id` + `cantidad`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompraDetalle {
    pub detalle_id: i64,
    #[serde(default)]
    pub animal_id: Option<i64>,
    #[serde(default)]
    pub insumo_id: Option<i64>,
    #[serde(default)]
    pub cantidad: Option<i64>,
    pub precio: f64,
}

impl CompraDetalle {
    /// Line subtotal: price × quantity, quantity defaulting to 1 for
    /// animal lines.
    pub fn subtotal(&self) -> f64 {
        self.precio * self.cantidad.unwrap_or(1) as f64
    }
}

/// A purchase of animals or supplies, with server-assigned number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compra {
    pub compra_id: i64,
    /// Auto-generated purchase number, e.g. `C-00042`.
    pub numero: String,
    pub proveedor_id: i64,
    pub fecha: String,
    #[serde(default)]
    pub detalles: Vec<CompraDetalle>,
    pub total: f64,
}

impl Compra {
    /// Total recomputed from the line items.
    pub fn total_calculado(&self) -> f64 {
        self.detalles.iter().map(CompraDetalle::subtotal).sum()
    }
}

impl Recurso for Compra {
    const RECURSO: &'static str = "compras";

    fn id(&self) -> i64 {
        self.compra_id
    }
}

/// Wire payload for a new purchase line. Absent fields are omitted rather
/// than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoDetalle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insumo_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<i64>,
    pub precio: f64,
}

/// Wire payload for creating a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaCompra {
    pub proveedor_id: i64,
    pub fecha: String,
    pub detalles: Vec<NuevoDetalle>,
}

/// A breeding event between a female and (optionally) a male animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monta {
    pub monta_id: i64,
    pub animal_hembra_id: i64,
    #[serde(default)]
    pub animal_macho_id: Option<i64>,
    pub tipo_monta_id: i64,
    pub fecha: String,
    /// Completion state, togglable after creation.
    pub estado: bool,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Recurso for Monta {
    const RECURSO: &'static str = "montas";

    fn id(&self) -> i64 {
        self.monta_id
    }
}

/// Edit payload for a breeding event: only the completion state is
/// editable, and only that field goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MontaEstado {
    pub estado: bool,
}

/// A feeding record: a supply consumed by a batch of animals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alimentacion {
    pub alimentacion_id: i64,
    pub insumo_id: i64,
    pub lote_id: i64,
    pub cantidad: i64,
    pub fecha: String,
}

impl Recurso for Alimentacion {
    const RECURSO: &'static str = "alimentaciones";

    fn id(&self) -> i64 {
        self.alimentacion_id
    }
}

/// A weighing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pesaje {
    pub pesaje_id: i64,
    pub animal_id: i64,
    pub peso: f64,
    pub fecha: String,
}

impl Recurso for Pesaje {
    const RECURSO: &'static str = "pesajes";

    fn id(&self) -> i64 {
        self.pesaje_id
    }
}

/// Milk production record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduccionLeche {
    pub produccion_id: i64,
    pub animal_id: i64,
    pub unidad_medida_id: i64,
    pub cantidad: f64,
    pub fecha: String,
}

impl Recurso for ProduccionLeche {
    const RECURSO: &'static str = "produccion-leche";

    fn id(&self) -> i64 {
        self.produccion_id
    }
}

/// Meat production record, optionally tied to a slaughterhouse and to the
/// weighing that preceded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduccionCarne {
    pub produccion_id: i64,
    pub animal_id: i64,
    #[serde(default)]
    pub matadero_id: Option<i64>,
    #[serde(default)]
    pub pesaje_id: Option<i64>,
    pub peso: f64,
    pub fecha: String,
}

impl Recurso for ProduccionCarne {
    const RECURSO: &'static str = "produccion-carne";

    fn id(&self) -> i64 {
        self.produccion_id
    }
}

/// A batch of animals, optionally tied to a pasture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lote {
    pub lote_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub potrero_id: Option<i64>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Lote {
    const RECURSO: &'static str = "lotes";

    fn id(&self) -> i64 {
        self.lote_id
    }
}

impl SoftDelete for Lote {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// A pasture/paddock location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Potrero {
    pub potrero_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Potrero {
    const RECURSO: &'static str = "potreros";

    fn id(&self) -> i64 {
        self.potrero_id
    }
}

impl SoftDelete for Potrero {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proveedor {
    pub proveedor_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Proveedor {
    const RECURSO: &'static str = "proveedores";

    fn id(&self) -> i64 {
        self.proveedor_id
    }
}

impl SoftDelete for Proveedor {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raza {
    pub raza_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Raza {
    const RECURSO: &'static str = "razas";

    fn id(&self) -> i64 {
        self.raza_id
    }
}

impl SoftDelete for Raza {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipoInsumo {
    pub tipo_insumo_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for TipoInsumo {
    const RECURSO: &'static str = "tipos-insumo";

    fn id(&self) -> i64 {
        self.tipo_insumo_id
    }
}

impl SoftDelete for TipoInsumo {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnidadMedida {
    pub unidad_medida_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for UnidadMedida {
    const RECURSO: &'static str = "unidades-medida";

    fn id(&self) -> i64 {
        self.unidad_medida_id
    }
}

impl SoftDelete for UnidadMedida {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// Slaughterhouse, referenced by meat-production records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matadero {
    pub matadero_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for Matadero {
    const RECURSO: &'static str = "mataderos";

    fn id(&self) -> i64 {
        self.matadero_id
    }
}

impl SoftDelete for Matadero {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// Breeding-event type. `padre_id` makes this a self-referential tree;
/// the client excludes a node's descendants from its own parent selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipoMonta {
    pub tipo_monta_id: i64,
    pub nombre: String,
    #[serde(default)]
    pub padre_id: Option<i64>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Recurso for TipoMonta {
    const RECURSO: &'static str = "tipos-monta";

    fn id(&self) -> i64 {
        self.tipo_monta_id
    }
}

impl SoftDelete for TipoMonta {
    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

/// A user notification, delivered both by fetch and by the push channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notificacion {
    pub notificacion_id: i64,
    pub usuario_id: i64,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    pub fecha: String,
}

impl Recurso for Notificacion {
    const RECURSO: &'static str = "notificaciones";

    fn id(&self) -> i64 {
        self.notificacion_id
    }
}

/// Payload of the notification feed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedNotificaciones {
    pub notificaciones: Vec<Notificacion>,
    pub no_leidas: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envoltura_success() {
        let json = r#"{"ok":true,"data":[{"raza_id":1,"nombre":"Brahman"}]}"#;
        let env: Envoltura<Vec<Raza>> = serde_json::from_str(json).unwrap();
        assert!(env.ok);
        assert_eq!(env.data.unwrap()[0].nombre, "Brahman");
        assert_eq!(env.msg, None);
    }

    #[test]
    fn test_envoltura_failure_carries_msg() {
        let json = r#"{"ok":false,"msg":"El nombre ya existe"}"#;
        let env: Envoltura<Vec<Raza>> = serde_json::from_str(json).unwrap();
        assert!(!env.ok);
        assert!(env.data.is_none());
        assert_eq!(env.msg.as_deref(), Some("El nombre ya existe"));
    }

    #[test]
    fn test_compra_total_from_line_items() {
        let compra = Compra {
            compra_id: 1,
            numero: "C-00001".to_string(),
            proveedor_id: 3,
            fecha: "2024-03-15".to_string(),
            detalles: vec![
                CompraDetalle {
                    detalle_id: 1,
                    animal_id: None,
                    insumo_id: Some(1),
                    cantidad: Some(5),
                    precio: 10.00,
                },
                CompraDetalle {
                    detalle_id: 2,
                    animal_id: None,
                    insumo_id: Some(2),
                    cantidad: Some(2),
                    precio: 25.50,
                },
            ],
            total: 101.00,
        };
        assert_eq!(compra.total_calculado(), 101.00);
    }

    #[test]
    fn test_animal_line_counts_as_quantity_one() {
        let detalle = CompraDetalle {
            detalle_id: 1,
            animal_id: Some(7),
            insumo_id: None,
            cantidad: None,
            precio: 850.0,
        };
        assert_eq!(detalle.subtotal(), 850.0);
    }

    #[test]
    fn test_monta_estado_wire_shape() {
        let payload = MontaEstado { estado: true };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"estado":true}"#
        );
    }

    #[test]
    fn test_nuevo_detalle_omits_absent_fields() {
        let detalle = NuevoDetalle {
            animal_id: Some(4),
            insumo_id: None,
            cantidad: None,
            precio: 900.0,
        };
        let json = serde_json::to_string(&detalle).unwrap();
        assert_eq!(json, r#"{"animal_id":4,"precio":900.0}"#);
    }

    #[test]
    fn test_sexo_wire_values() {
        assert_eq!(serde_json::to_string(&Sexo::M).unwrap(), r#""M""#);
        assert_eq!(serde_json::to_string(&Sexo::H).unwrap(), r#""H""#);
        let parsed: Sexo = serde_json::from_str(r#""H""#).unwrap();
        assert_eq!(parsed, Sexo::H);
    }

    #[test]
    fn test_sin_padres() {
        let mut animal = Animal {
            animal_id: 1,
            arete: "A-001".to_string(),
            sexo: Sexo::H,
            fecha_nacimiento: "2022-01-10".to_string(),
            fecha_destete: None,
            raza_id: None,
            lote_id: None,
            animal_madre_id: None,
            animal_padre_id: None,
            imagen: None,
            deleted_at: None,
        };
        assert!(animal.sin_padres());
        animal.animal_madre_id = Some(9);
        assert!(!animal.sin_padres());
    }

    #[test]
    fn test_soft_delete_activo() {
        let raza = Raza {
            raza_id: 1,
            nombre: "Gyr".to_string(),
            deleted_at: Some("2024-01-01T00:00:00Z".to_string()),
        };
        assert!(!raza.activo());
    }
}
