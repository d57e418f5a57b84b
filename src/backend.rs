// src/backend.rs

use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::models::PredictionRequest;
use crate::pagination::PageQuery;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Backend responded with status: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("Backend returned an invalid JSON body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Klient usługi predykcji. Każda metoda wykonuje dokładnie jedno żądanie, bez ponowień.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &Url) -> Self {
        BackendClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn fetch_dataset(&self, query: &PageQuery) -> Result<Value, UpstreamError> {
        let request = self
            .http
            .get(self.endpoint("data"))
            .query(&query.as_query_pairs())
            .header(header::CONTENT_TYPE, "application/json");

        send_json(request).await
    }

    pub async fn predict(&self, payload: &PredictionRequest) -> Result<Value, UpstreamError> {
        // .json() ustawia też nagłówek Content-Type: application/json
        let request = self.http.post(self.endpoint("predict")).json(payload);

        send_json(request).await
    }

    pub async fn fetch_labels(&self) -> Result<Value, UpstreamError> {
        send_json(self.http.get(self.endpoint("labels"))).await
    }

    pub async fn fetch_notebook(&self) -> Result<Value, UpstreamError> {
        send_json(self.http.get(self.endpoint("notebook"))).await
    }
}

async fn send_json(request: RequestBuilder) -> Result<Value, UpstreamError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!("Błąd sieci podczas komunikacji z backendem: {:?}", e);
        UpstreamError::Network(e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Brak treści błędu".to_string());
        tracing::error!(
            "Backend zwrócił błąd: Status={}, Treść={}",
            status,
            error_text
        );
        return Err(UpstreamError::Status(status));
    }

    response.json::<Value>().await.map_err(|e| {
        tracing::error!("Błąd deserializacji odpowiedzi backendu: {}", e);
        UpstreamError::Decode(e)
    })
}
