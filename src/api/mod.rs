pub mod atenciones;
