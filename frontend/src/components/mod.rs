pub mod forms;
pub mod notificaciones;
