// src/handlers.rs

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use crate::errors::{AppError, Operation};
use crate::models::{HealthResponse, PredictionRequest};
use crate::pagination::PageQuery;
use crate::state::AppState;

/// GET /api/data: stronicowany listing zbioru danych.
pub async fn data_proxy_handler(
    State(app_state): State<Arc<AppState>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    tracing::info!("Obsłużono zapytanie GET /api/data z parametrami: {:?}", params);

    let page_query = PageQuery::from_params(
        first_value(&params, "page"),
        first_value(&params, "size"),
    )?;

    let data = app_state
        .backend
        .fetch_dataset(&page_query)
        .await
        .map_err(AppError::upstream(Operation::FetchData))?;

    tracing::debug!(
        "Pobrano stronę {} (rozmiar {}) z backendu",
        page_query.page,
        page_query.size
    );
    Ok(Json(data))
}

/// POST /api/predict: walidacja wektora cech i przekazanie go do modelu.
pub async fn predict_proxy_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let body = body?;
    let body: Value = serde_json::from_slice(&body).map_err(|e| AppError::Unknown {
        operation: Operation::MakePrediction,
        details: e.to_string(),
    })?;

    let prediction_request = PredictionRequest::from_json(&body)?;
    tracing::info!(
        "Żądanie predykcji dla cech: {:?}",
        prediction_request.features()
    );

    let prediction = app_state
        .backend
        .predict(&prediction_request)
        .await
        .map_err(AppError::upstream(Operation::MakePrediction))?;

    Ok(Json(prediction))
}

/// GET /api/labels: lista etykiet upraw dla galerii.
pub async fn labels_proxy_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let labels = app_state
        .backend
        .fetch_labels()
        .await
        .map_err(AppError::upstream(Operation::FetchLabels))?;

    Ok(Json(labels))
}

/// GET /api/notebook
pub async fn notebook_proxy_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let notebook = app_state
        .backend
        .fetch_notebook()
        .await
        .map_err(AppError::upstream(Operation::FetchNotebook))?;

    Ok(Json(notebook))
}

pub async fn not_found_handler() -> AppError {
    AppError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: "Not found".to_string(),
    }
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::Rejected {
        status: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed".to_string(),
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Przy powtórzonym kluczu liczy się pierwsze wystąpienie.
fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}
