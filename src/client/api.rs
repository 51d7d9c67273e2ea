//! HTTP client for the records API

use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::atenciones::CreatedId;
use crate::model::{Atencion, NuevaAtencion};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response has no data")]
    MissingData,
}

/// The two calls a form session needs. [`AtencionesClient`] is the real one.
#[allow(async_fn_in_trait)]
pub trait AtencionesApi {
    async fn list(&self) -> Result<Vec<Atencion>, ClientError>;

    async fn create(&self, nueva: &NuevaAtencion) -> Result<i64, ClientError>;
}

/// Body shape shared by every endpoint, success or failure.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

pub struct AtencionesClient {
    http: ReqwestClient,
    base_url: String,
}

impl AtencionesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: ReqwestClient::new(),
            base_url,
        }
    }

    pub fn records_url(&self) -> String {
        format!("{}/records", self.base_url)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        let envelope: Option<Envelope<T>> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = envelope
                .and_then(|e| e.error)
                .unwrap_or_else(|| body.trim().to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        envelope
            .and_then(|e| e.data)
            .ok_or(ClientError::MissingData)
    }
}

impl AtencionesApi for AtencionesClient {
    async fn list(&self) -> Result<Vec<Atencion>, ClientError> {
        let response = self.http.get(self.records_url()).send().await?;
        Self::read(response).await
    }

    async fn create(&self, nueva: &NuevaAtencion) -> Result<i64, ClientError> {
        let response = self
            .http
            .post(self.records_url())
            .json(nueva)
            .send()
            .await?;
        let created: CreatedId = Self::read(response).await?;
        Ok(created.id)
    }
}
