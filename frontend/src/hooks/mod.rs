pub mod use_notificaciones;
pub mod use_resource;

pub use use_notificaciones::use_notificaciones;
pub use use_resource::{use_resource, Envio, Mutacion};
