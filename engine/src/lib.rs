//! Agroinversiones Beto - business logic engine
//!
//! Sales, supplier intake, stock and debt management for an agricultural
//! produce shop that tracks every quantity in two units, kilograms and
//! javas. The engine owns the arithmetic and the business rules;
//! persistence and transport are supplied by the embedder through the
//! [`store::Store`] boundary.

pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorDetail};
