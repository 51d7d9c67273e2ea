//! The attendance form as an immutable state machine.
//!
//! `Idle --start--> InProgress --prepare_submission--> (record) --reset--> Idle`
//!
//! Every transition takes `&self` and hands back a new value; the caller
//! decides when the new state replaces the old one (e.g. only after the
//! server accepted the record).

use chrono::{NaiveDateTime, SubsecRound};
use thiserror::Error;

use crate::model::atencion::TIME_FORMAT;
use crate::model::{Campo, NuevaAtencion};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub rut: String,
    pub nombre: String,
    pub comuna: String,
    pub tipo_subsidio: String,
    pub comentario: String,
}

impl Fields {
    pub fn get(&self, campo: Campo) -> &str {
        match campo {
            Campo::Rut => &self.rut,
            Campo::Nombre => &self.nombre,
            Campo::Comuna => &self.comuna,
            Campo::TipoSubsidio => &self.tipo_subsidio,
            Campo::Comentario => &self.comentario,
        }
    }

    fn with(mut self, campo: Campo, value: String) -> Self {
        let slot = match campo {
            Campo::Rut => &mut self.rut,
            Campo::Nombre => &mut self.nombre,
            Campo::Comuna => &mut self.comuna,
            Campo::TipoSubsidio => &mut self.tipo_subsidio,
            Campo::Comentario => &mut self.comentario,
        };
        *slot = value;
        self
    }

    /// Required fields that are still blank.
    pub fn missing(&self) -> Vec<Campo> {
        Campo::REQUIRED
            .into_iter()
            .filter(|campo| self.get(*campo).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    InProgress {
        started_at: NaiveDateTime,
        fields: Fields,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("an atención is already in progress")]
    AlreadyStarted,

    #[error("no atención in progress")]
    NotStarted,

    #[error("missing required fields: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<Campo>),

    #[error("end time {fin} is before start time {inicio}")]
    EndBeforeStart {
        inicio: NaiveDateTime,
        fin: NaiveDateTime,
    },
}

impl FormState {
    pub fn start(&self, now: NaiveDateTime) -> Result<FormState, FormError> {
        match self {
            FormState::Idle => Ok(FormState::InProgress {
                started_at: now.trunc_subsecs(0),
                fields: Fields::default(),
            }),
            FormState::InProgress { .. } => Err(FormError::AlreadyStarted),
        }
    }

    pub fn with_field(&self, campo: Campo, value: impl Into<String>) -> Result<FormState, FormError> {
        match self {
            FormState::Idle => Err(FormError::NotStarted),
            FormState::InProgress { started_at, fields } => Ok(FormState::InProgress {
                started_at: *started_at,
                fields: fields.clone().with(campo, value.into()),
            }),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, FormState::InProgress { .. })
    }

    pub fn is_submittable(&self) -> bool {
        match self {
            FormState::Idle => false,
            FormState::InProgress { fields, .. } => fields.missing().is_empty(),
        }
    }

    pub fn fields(&self) -> Option<&Fields> {
        match self {
            FormState::Idle => None,
            FormState::InProgress { fields, .. } => Some(fields),
        }
    }

    /// Closes the interaction at `now` and builds the record to send.
    /// The state itself is untouched; call [`FormState::reset`] once the
    /// server has stored the record.
    pub fn prepare_submission(&self, now: NaiveDateTime) -> Result<NuevaAtencion, FormError> {
        let (started_at, fields) = match self {
            FormState::Idle => return Err(FormError::NotStarted),
            FormState::InProgress { started_at, fields } => (*started_at, fields),
        };

        let missing = fields.missing();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let fin = now.trunc_subsecs(0);
        if fin < started_at {
            return Err(FormError::EndBeforeStart {
                inicio: started_at,
                fin,
            });
        }

        let millis = (fin - started_at).num_milliseconds();
        let duracion = (millis as f64 / 1000.0).round() as i64;

        Ok(NuevaAtencion {
            rut: fields.rut.clone(),
            nombre: fields.nombre.clone(),
            comuna: fields.comuna.clone(),
            tipo_subsidio: fields.tipo_subsidio.clone(),
            comentario: Some(fields.comentario.clone()),
            hora_inicio: started_at.format(TIME_FORMAT).to_string(),
            hora_fin: fin.format(TIME_FORMAT).to_string(),
            duracion,
        })
    }

    pub fn reset(&self) -> FormState {
        FormState::Idle
    }
}
