pub mod atencion;

pub use atencion::{Atencion, Campo, NuevaAtencion, ValidationError};
