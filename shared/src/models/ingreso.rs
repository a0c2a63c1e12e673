//! Supplier intake (ingreso) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supplier delivery batch: one truck, one or more supplier/product lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngresoLote {
    pub id: Uuid,
    /// Truck plate, stored trimmed and uppercased
    pub truck_id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<IngresoItem>,
}

/// One line of a delivery batch, fully resolved to canonical quantities
/// and per-java cost at creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngresoItem {
    pub id: Uuid,
    pub supplier_name: String,
    pub product_id: Uuid,
    pub total_kg: f64,
    /// Kg per java applied for this delivery (may differ from the
    /// product's current catalog factor)
    pub conversion_factor: f64,
    pub total_javas: f64,
    /// Cost is always stored per java
    pub cost_per_java: f64,
    pub total_cost: f64,
}
