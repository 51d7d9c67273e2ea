//! Persistence of attendance records: list everything, insert one.

use sqlx::SqlitePool;
use thiserror::Error;

use crate::model::{Atencion, NuevaAtencion};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(#[from] pub sqlx::Error);

/// All records in insertion order.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Atencion>, StoreError> {
    let rows = sqlx::query_as::<_, Atencion>(
        r#"
        SELECT id, rut, nombre, comuna, tipoSubsidio, comentario, horaInicio, horaFin, duracion
        FROM atenciones
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Persists `nueva` and returns the id assigned to it.
pub async fn insert(pool: &SqlitePool, nueva: &NuevaAtencion) -> Result<i64, StoreError> {
    let result = sqlx::query(
        r#"
        INSERT INTO atenciones
        (rut, nombre, comuna, tipoSubsidio, comentario, horaInicio, horaFin, duracion)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&nueva.rut)
    .bind(&nueva.nombre)
    .bind(&nueva.comuna)
    .bind(&nueva.tipo_subsidio)
    .bind(&nueva.comentario)
    .bind(&nueva.hora_inicio)
    .bind(&nueva.hora_fin)
    .bind(nueva.duracion)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
