//! Sale (venta) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sale channel: cash over the counter or credit order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VentaType {
    Caja,
    Pedido,
}

impl VentaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VentaType::Caja => "CAJA",
            VentaType::Pedido => "PEDIDO",
        }
    }
}

impl std::fmt::Display for VentaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sale transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venta {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub venta_type: VentaType,
    /// Required for PEDIDO, absent for CAJA walk-ins
    pub client_id: Option<Uuid>,
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub is_printed: bool,
    pub items: Vec<VentaItem>,
}

/// One line of a sale, resolved to both units at creation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentaItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity_kg: f64,
    pub quantity_javas: f64,
    pub conversion_factor: f64,
    pub price_per_kg: Decimal,
    pub subtotal: Decimal,
}
