pub mod api;
pub mod fechas;
pub mod logging;
pub mod notificaciones;
pub mod rules;
pub mod store;
pub mod validation;
