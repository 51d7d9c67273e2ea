use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Every failure the HTTP layer can answer with. All of them render as
/// `{"error": message}`; validation failures also list the offending fields.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid request body: {0}")]
    Payload(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(err) => json!({
                "error": self.to_string(),
                "fields": err.fields,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: ApiError) -> serde_json::Value {
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn store_errors_carry_the_underlying_message() {
        let err = ApiError::from(StoreError(sqlx::Error::RowNotFound));
        let body = body_of(err).await;
        assert_eq!(body["error"], sqlx::Error::RowNotFound.to_string());
        assert!(body.get("fields").is_none());
    }

    #[actix_web::test]
    async fn validation_errors_list_fields() {
        let err = ApiError::from(ValidationError {
            fields: vec!["rut", "duracion"],
        });
        let body = body_of(err).await;
        assert_eq!(body["fields"], json!(["rut", "duracion"]));
        assert!(body["error"].as_str().unwrap().contains("rut, duracion"));
    }
}
