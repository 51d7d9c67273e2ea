//! Client side: the attendance form, the HTTP client, and the session that
//! ties them together.

pub mod api;
pub mod form;
pub mod session;

pub use api::{AtencionesApi, AtencionesClient, ClientError};
pub use form::{Fields, FormError, FormState};
pub use session::{Session, SubmitError};
