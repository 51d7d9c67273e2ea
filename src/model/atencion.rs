use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Wire and storage format of `horaInicio` / `horaFin`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

/// A recorded service interaction. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "rut": "11111111-1",
        "nombre": "Ana",
        "comuna": "Valparaíso",
        "tipoSubsidio": "DS1",
        "comentario": "",
        "horaInicio": "10:00:00",
        "horaFin": "10:00:05",
        "duracion": 5
    })
)]
pub struct Atencion {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "11111111-1")]
    pub rut: String,
    #[schema(example = "Ana")]
    pub nombre: String,
    #[schema(example = "Valparaíso")]
    pub comuna: String,
    #[schema(example = "DS1")]
    pub tipo_subsidio: String,
    #[schema(example = "", nullable = true)]
    pub comentario: Option<String>,
    #[schema(example = "10:00:00", format = "time")]
    pub hora_inicio: String,
    #[schema(example = "10:00:05", format = "time")]
    pub hora_fin: String,
    /// seconds between horaInicio and horaFin
    #[schema(example = 5)]
    pub duracion: i64,
}

/// Create payload: an `Atencion` before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NuevaAtencion {
    #[schema(example = "11111111-1")]
    pub rut: String,
    #[schema(example = "Ana")]
    pub nombre: String,
    #[schema(example = "Valparaíso")]
    pub comuna: String,
    #[schema(example = "DS1")]
    pub tipo_subsidio: String,
    #[serde(default)]
    #[schema(example = "", nullable = true)]
    pub comentario: Option<String>,
    #[schema(example = "10:00:00", format = "time")]
    pub hora_inicio: String,
    #[schema(example = "10:00:05", format = "time")]
    pub hora_fin: String,
    #[schema(example = 5)]
    pub duracion: i64,
}

/// Fields a person fills in on the form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum Campo {
    Rut,
    Nombre,
    Comuna,
    TipoSubsidio,
    Comentario,
}

impl Campo {
    pub const REQUIRED: [Campo; 4] = [Campo::Rut, Campo::Nombre, Campo::Comuna, Campo::TipoSubsidio];

    pub fn is_required(self) -> bool {
        self != Campo::Comentario
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or missing fields: {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

/// Whole seconds from `inicio` to `fin`, wrapping past midnight.
pub fn seconds_between(inicio: NaiveTime, fin: NaiveTime) -> i64 {
    let delta: TimeDelta = fin - inicio;
    delta.num_seconds().rem_euclid(SECONDS_PER_DAY)
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

impl NuevaAtencion {
    pub fn value_of(&self, campo: Campo) -> &str {
        match campo {
            Campo::Rut => &self.rut,
            Campo::Nombre => &self.nombre,
            Campo::Comuna => &self.comuna,
            Campo::TipoSubsidio => &self.tipo_subsidio,
            Campo::Comentario => self.comentario.as_deref().unwrap_or(""),
        }
    }

    /// Presence checks on the required fields, time format checks, and
    /// `duracion` agreement with the two times.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields: Vec<&'static str> = Campo::REQUIRED
            .into_iter()
            .filter(|campo| self.value_of(*campo).trim().is_empty())
            .map(<&'static str>::from)
            .collect();

        let inicio = parse_time(&self.hora_inicio);
        let fin = parse_time(&self.hora_fin);
        if inicio.is_none() {
            fields.push("horaInicio");
        }
        if fin.is_none() {
            fields.push("horaFin");
        }

        let duracion_ok = match (inicio, fin) {
            _ if self.duracion < 0 => false,
            (Some(inicio), Some(fin)) => {
                self.duracion.rem_euclid(SECONDS_PER_DAY) == seconds_between(inicio, fin)
            }
            // nothing to compare against
            _ => true,
        };
        if !duracion_ok {
            fields.push("duracion");
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }

    pub fn with_id(self, id: i64) -> Atencion {
        Atencion {
            id,
            rut: self.rut,
            nombre: self.nombre,
            comuna: self.comuna,
            tipo_subsidio: self.tipo_subsidio,
            comentario: self.comentario,
            hora_inicio: self.hora_inicio,
            hora_fin: self.hora_fin,
            duracion: self.duracion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> NuevaAtencion {
        NuevaAtencion {
            rut: "11111111-1".into(),
            nombre: "Ana".into(),
            comuna: "X".into(),
            tipo_subsidio: "T".into(),
            comentario: Some(String::new()),
            hora_inicio: "10:00:00".into(),
            hora_fin: "10:00:05".into(),
            duracion: 5,
        }
    }

    #[test]
    fn uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["tipoSubsidio"], "T");
        assert_eq!(json["horaInicio"], "10:00:00");
        assert_eq!(json["horaFin"], "10:00:05");
        assert_eq!(json["duracion"], 5);
    }

    #[test]
    fn comentario_may_be_omitted() {
        let body = r#"{"rut":"1","nombre":"a","comuna":"b","tipoSubsidio":"c",
            "horaInicio":"10:00:00","horaFin":"10:00:01","duracion":1}"#;
        let parsed: NuevaAtencion = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.comentario, None);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn valid_payload_passes() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let mut nueva = sample();
        nueva.rut = "   ".into();
        nueva.tipo_subsidio = String::new();
        let err = nueva.validate().unwrap_err();
        assert_eq!(err.fields, vec!["rut", "tipoSubsidio"]);
    }

    #[test]
    fn blank_comentario_is_fine() {
        let mut nueva = sample();
        nueva.comentario = None;
        assert!(nueva.validate().is_ok());
    }

    #[test]
    fn bad_times_and_negative_duration_are_reported() {
        let mut nueva = sample();
        nueva.hora_inicio = "10h".into();
        nueva.duracion = -1;
        let err = nueva.validate().unwrap_err();
        assert_eq!(err.fields, vec!["horaInicio", "duracion"]);
    }

    #[test]
    fn duration_must_match_times() {
        let mut nueva = sample();
        nueva.duracion = 6;
        assert_eq!(nueva.validate().unwrap_err().fields, vec!["duracion"]);
    }

    #[test]
    fn duration_wraps_past_midnight() {
        let mut nueva = sample();
        nueva.hora_inicio = "23:59:58".into();
        nueva.hora_fin = "00:00:03".into();
        nueva.duracion = 5;
        assert!(nueva.validate().is_ok());
    }

    #[test]
    fn seconds_between_is_never_negative() {
        let a = parse_time("12:00:00").unwrap();
        let b = parse_time("11:59:59").unwrap();
        assert_eq!(seconds_between(b, a), 1);
        assert_eq!(seconds_between(a, b), SECONDS_PER_DAY - 1);
        assert_eq!(seconds_between(a, a), 0);
    }

    #[test]
    fn campo_names_match_wire_names() {
        assert_eq!(Campo::TipoSubsidio.to_string(), "tipoSubsidio");
        assert_eq!(Campo::from_str("comentario").unwrap(), Campo::Comentario);
        assert!(Campo::from_str("duracion").is_err());
        assert!(!Campo::Comentario.is_required());
    }

    #[test]
    fn with_id_keeps_every_field() {
        let atencion = sample().with_id(7);
        assert_eq!(atencion.id, 7);
        assert_eq!(atencion.rut, "11111111-1");
        assert_eq!(atencion.duracion, 5);
    }
}
