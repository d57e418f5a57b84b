// src/models.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{AppError, Operation};

/// Pola wymagane przez model, w kolejności raportowania błędów i wysyłki do backendu.
pub const REQUIRED_FIELDS: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Jednolity kształt błędu zwracany przeglądarce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorEnvelope {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        ErrorEnvelope {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Zwalidowany wektor cech gleby i klimatu.
///
/// Liczby są przechowywane dokładnie w postaci, w jakiej przyszły (`10` zostaje `10`),
/// a serializacja zawsze daje siedem pól w kolejności `REQUIRED_FIELDS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    #[serde(rename = "N")]
    pub nitrogen: Number,
    #[serde(rename = "P")]
    pub phosphorus: Number,
    #[serde(rename = "K")]
    pub potassium: Number,
    pub temperature: Number,
    pub humidity: Number,
    pub ph: Number,
    pub rainfall: Number,
}

impl PredictionRequest {
    /// Najpierw zbiera wszystkie brakujące pola, dopiero potem sprawdza typy,
    /// zatrzymując się na pierwszym nieliczbowym polu.
    ///
    /// Tablica nie ma żadnego z pól (400), a wartość skalarna nie jest
    /// strukturą z polami w ogóle (500).
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let empty = Map::new();
        let fields = match body {
            Value::Object(fields) => fields,
            Value::Array(_) => &empty,
            scalar => {
                return Err(AppError::Unknown {
                    operation: Operation::MakePrediction,
                    details: format!("Request body must be a JSON object, got: {}", scalar),
                });
            }
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !fields.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let number = |field: &'static str| -> Result<Number, AppError> {
            match fields.get(field) {
                Some(Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => Ok(n.clone()),
                _ => Err(AppError::InvalidFieldType(field)),
            }
        };

        Ok(PredictionRequest {
            nitrogen: number("N")?,
            phosphorus: number("P")?,
            potassium: number("K")?,
            temperature: number("temperature")?,
            humidity: number("humidity")?,
            ph: number("ph")?,
            rainfall: number("rainfall")?,
        })
    }

    pub fn features(&self) -> [f64; 7] {
        [
            &self.nitrogen,
            &self.phosphorus,
            &self.potassium,
            &self.temperature,
            &self.humidity,
            &self.ph,
            &self.rainfall,
        ]
        .map(|n| n.as_f64().unwrap_or(f64::NAN))
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
