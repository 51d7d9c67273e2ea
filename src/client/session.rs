use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::client::api::{AtencionesApi, ClientError};
use crate::client::form::{FormError, FormState};
use crate::export::{self, ExportError};
use crate::model::{Atencion, Campo};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// One person at the counter: the current form plus the last list fetched.
pub struct Session<A> {
    api: A,
    form: FormState,
    atenciones: Vec<Atencion>,
}

impl<A: AtencionesApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: FormState::Idle,
            atenciones: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn atenciones(&self) -> &[Atencion] {
        &self.atenciones
    }

    /// Re-fetches the full list. On failure the current list stays as is.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.api.list().await {
            Ok(atenciones) => {
                self.atenciones = atenciones;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching atenciones");
                Err(e)
            }
        }
    }

    pub fn start(&mut self, now: NaiveDateTime) -> Result<(), FormError> {
        self.form = self.form.start(now)?;
        Ok(())
    }

    pub fn set_field(&mut self, campo: Campo, value: impl Into<String>) -> Result<(), FormError> {
        self.form = self.form.with_field(campo, value)?;
        Ok(())
    }

    /// Sends the record. The form resets and the list is reloaded only when
    /// the server stored it; otherwise the form stays as it was.
    pub async fn submit(&mut self, now: NaiveDateTime) -> Result<i64, SubmitError> {
        let nueva = self.form.prepare_submission(now)?;

        let id = self.api.create(&nueva).await.map_err(|e| {
            tracing::error!(error = %e, rut = %nueva.rut, "Error saving atencion");
            e
        })?;

        self.form = self.form.reset();
        // a failed reload was already logged; the record itself is stored
        let _ = self.refresh().await;

        Ok(id)
    }

    pub fn export(&self, path: &Path) -> Result<(), ExportError> {
        export::export_xlsx(&self.atenciones, path)
    }
}
