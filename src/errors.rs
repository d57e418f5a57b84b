// src/errors.rs

use axum::{
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use strum::Display;
use thiserror::Error;

use crate::backend::UpstreamError;
use crate::models::ErrorEnvelope;

/// Parametr zapytania listingu, którego dotyczy błąd walidacji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum QueryParam {
    Page,
    Size,
}

impl QueryParam {
    pub fn message(self) -> &'static str {
        match self {
            QueryParam::Page => "Invalid page parameter. Must be a positive integer.",
            QueryParam::Size => "Invalid size parameter. Must be between 1 and 100.",
        }
    }
}

/// Operacja proxy; jej `Display` to ogólny komunikat zwracany przy błędzie 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[strum(serialize = "Failed to fetch data")]
    FetchData,
    #[strum(serialize = "Failed to make prediction")]
    MakePrediction,
    #[strum(serialize = "Failed to fetch labels")]
    FetchLabels,
    #[strum(serialize = "Failed to fetch notebook")]
    FetchNotebook,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", .0.message())]
    InvalidParameter(QueryParam),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Field {0} must be a valid number")]
    InvalidFieldType(&'static str),

    #[error("{operation}: {source}")]
    Upstream {
        operation: Operation,
        #[source]
        source: UpstreamError,
    },

    #[error("{operation}: {details}")]
    Unknown {
        operation: Operation,
        details: String,
    },

    /// Żądanie odrzucone przez axum (ekstraktor, limit rozmiaru, routing).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    pub fn upstream(operation: Operation) -> impl FnOnce(UpstreamError) -> AppError {
        move |source| AppError::Upstream { operation, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_)
            | AppError::MissingFields(_)
            | AppError::InvalidFieldType(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } | AppError::Unknown { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Rejected { status, .. } => *status,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::Upstream { operation, source } => {
                ErrorEnvelope::with_details(operation.to_string(), source.to_string())
            }
            AppError::Unknown { operation, details } => {
                ErrorEnvelope::with_details(operation.to_string(), details.clone())
            }
            client_error => ErrorEnvelope::new(client_error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Błąd komunikacji z backendem: {:?}", self);
        } else {
            tracing::warn!("Odrzucono nieprawidłowe żądanie: {}", self);
        }

        (status, Json(self.envelope())).into_response()
    }
}
