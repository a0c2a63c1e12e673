//! Product catalog models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog default for newly registered products, in kg per java
pub const DEFAULT_CONVERSION_FACTOR: f64 = 20.0;

/// Configurable product type (e.g. Kion, Curcuma)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
}

/// Configurable product quality (e.g. Primera, Segunda)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuality {
    pub id: Uuid,
    pub name: String,
}

/// A product in the catalog
///
/// `conversion_factor` is the weight of one java of this product in
/// kilograms. All conversions go through this stored value; call sites
/// never assume a factor of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub product_type: String,
    pub quality: String,
    pub conversion_factor: f64,
}
