//! Shared types and models for the Agroinversiones Beto management platform
//!
//! This crate contains the domain model, the unit conversion and
//! aggregation engine, and validation helpers shared between the
//! business-logic engine and any embedding frontend.

pub mod conversion;
pub mod models;
pub mod types;
pub mod validation;

pub use conversion::*;
pub use models::*;
pub use types::*;
pub use validation::*;
