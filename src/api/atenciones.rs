use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::{Atencion, NuevaAtencion};
use crate::store;

pub const SUCCESS: &str = "success";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AtencionListResponse {
    #[schema(example = "success")]
    pub message: String,
    pub data: Vec<Atencion>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedId {
    #[schema(example = 1)]
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AtencionCreatedResponse {
    #[schema(example = "success")]
    pub message: String,
    pub data: CreatedId,
}

/// List every recorded atención
#[utoipa::path(
    get,
    path = "/records",
    responses(
        (status = 200, description = "All records in insertion order", body = AtencionListResponse),
        (status = 400, description = "Store failure", body = Object, example = json!({
            "error": "no such table: atenciones"
        }))
    ),
    tag = "Atenciones"
)]
pub async fn list_atenciones(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let data = store::list_all(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list atenciones");
        e
    })?;

    Ok(HttpResponse::Ok().json(AtencionListResponse {
        message: SUCCESS.to_string(),
        data,
    }))
}

/// Record a new atención
#[utoipa::path(
    post,
    path = "/records",
    request_body(
        content = NuevaAtencion,
        description = "Record without id",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Record stored", body = AtencionCreatedResponse),
        (status = 400, description = "Invalid payload or store failure", body = Object, example = json!({
            "error": "invalid or missing fields: rut",
            "fields": ["rut"]
        }))
    ),
    tag = "Atenciones"
)]
pub async fn create_atencion(
    pool: web::Data<SqlitePool>,
    payload: web::Json<NuevaAtencion>,
) -> Result<HttpResponse, ApiError> {
    let nueva = payload.into_inner();

    nueva.validate().map_err(|e| {
        tracing::warn!(fields = ?e.fields, rut = %nueva.rut, "Rejected atencion");
        e
    })?;

    let id = store::insert(pool.get_ref(), &nueva).await.map_err(|e| {
        tracing::error!(error = %e, rut = %nueva.rut, "Failed to insert atencion");
        e
    })?;

    tracing::info!(id, duracion = nueva.duracion, "Atencion recorded");

    Ok(HttpResponse::Ok().json(AtencionCreatedResponse {
        message: SUCCESS.to_string(),
        data: CreatedId { id },
    }))
}
