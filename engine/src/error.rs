//! Error handling for the Agroinversiones Beto engine
//!
//! Provides consistent error details in English and Spanish. Nothing here
//! is fatal: every error is local to one operation and the caller can
//! recover by re-supplying valid input.

use serde::Serialize;
use shared::conversion::InvalidFactorError;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error on {field}: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("{resource} not found")]
    NotFound {
        resource: String,
        id: Option<Uuid>,
    },

    #[error("Duplicate {resource} with {field}: {value}")]
    Duplicate {
        resource: String,
        field: String,
        value: String,
    },

    // Business logic errors
    #[error("Insufficient stock of {product}: available {available_kg:.2} kg, requested {requested_kg:.2} kg")]
    StockInsuficiente {
        product: String,
        available_kg: f64,
        requested_kg: f64,
    },

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] InvalidFactorError),

    // Storage boundary errors
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Error detail handed to whatever transport embeds the engine
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Duplicate { .. } => "DUPLICATE_ERROR",
            AppError::StockInsuficiente { .. } => "STOCK_INSUFICIENTE",
            AppError::BusinessRule(_) => "BUSINESS_RULE_ERROR",
            AppError::Conversion(_) => "INVALID_FACTOR",
            AppError::Store(_) => "STORE_ERROR",
        }
    }

    /// Bilingual detail for client display
    pub fn detail(&self) -> ErrorDetail {
        let (message_en, message_es, field) = match self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => (message.clone(), message_es.clone(), Some(field.clone())),
            AppError::NotFound { resource, id } => match id {
                Some(id) => (
                    format!("{} with ID {} not found", resource, id),
                    format!("{} con ID {} no encontrado", resource, id),
                    None,
                ),
                None => (
                    format!("{} not found", resource),
                    format!("{} no encontrado", resource),
                    None,
                ),
            },
            AppError::Duplicate {
                resource,
                field,
                value,
            } => (
                format!("A {} with {} '{}' already exists", resource, field, value),
                format!("Ya existe un {} con {}: {}", resource, field, value),
                Some(field.clone()),
            ),
            AppError::StockInsuficiente {
                product,
                available_kg,
                requested_kg,
            } => (
                format!(
                    "Insufficient stock of {}. Available: {:.2} kg, requested: {:.2} kg",
                    product, available_kg, requested_kg
                ),
                format!(
                    "Stock insuficiente de {}. Disponible: {:.2} kg, Solicitado: {:.2} kg",
                    product, available_kg, requested_kg
                ),
                None,
            ),
            AppError::BusinessRule(message) => (
                message.clone(),
                format!("Regla de negocio violada: {}", message),
                None,
            ),
            AppError::Conversion(err) => (
                err.to_string(),
                format!(
                    "Factor de conversión inválido: {} (debe ser mayor a 0)",
                    err.factor
                ),
                Some("conversion_factor".to_string()),
            ),
            AppError::Store(err) => (
                format!("Storage error: {}", err),
                "Error en el almacenamiento de datos".to_string(),
                None,
            ),
        };

        ErrorDetail {
            code: self.code().to_string(),
            message_en,
            message_es,
            field,
        }
    }

    /// JSON body in the shape transports return to clients
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.detail() })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("input".to_string(), "invalid input".to_string()));

        // Derived validation messages are written in the domain language
        AppError::Validation {
            field,
            message: message.clone(),
            message_es: message,
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detail() {
        let err = AppError::NotFound {
            resource: "Producto".to_string(),
            id: None,
        };
        let detail = err.detail();
        assert_eq!(detail.code, "NOT_FOUND");
        assert_eq!(detail.message_es, "Producto no encontrado");
    }

    #[test]
    fn test_stock_detail_includes_amounts() {
        let err = AppError::StockInsuficiente {
            product: "Kion Primera".to_string(),
            available_kg: 12.5,
            requested_kg: 40.0,
        };
        let detail = err.detail();
        assert_eq!(detail.code, "STOCK_INSUFICIENTE");
        assert!(detail.message_es.contains("12.50"));
        assert!(detail.message_es.contains("40.00"));
    }

    #[test]
    fn test_conversion_error_code() {
        let err = AppError::from(InvalidFactorError { factor: 0.0 });
        assert_eq!(err.code(), "INVALID_FACTOR");
        assert_eq!(err.detail().field.as_deref(), Some("conversion_factor"));
    }

    #[test]
    fn test_to_json_shape() {
        let err = AppError::Validation {
            field: "truck_id".to_string(),
            message: "Truck plate is too short".to_string(),
            message_es: "La placa del camión debe tener al menos 3 caracteres".to_string(),
        };
        let body = err.to_json();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "truck_id");
        // Absent fields are omitted, not serialized as null
        let not_found = AppError::NotFound {
            resource: "Venta".to_string(),
            id: None,
        };
        assert!(not_found.to_json()["error"].get("field").is_none());
    }
}
