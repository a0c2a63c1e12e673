//! Stock position models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stock position for one product, derived from the full movement history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_ingreso_kg: f64,
    pub total_ingreso_javas: f64,
    pub total_vendido_kg: f64,
    pub total_vendido_javas: f64,
    /// Weighted average intake cost per java, 0 when nothing was received
    pub costo_promedio_java: f64,
}

impl StockInfo {
    /// Available stock in kg, clamped at zero
    pub fn stock_disponible_kg(&self) -> f64 {
        (self.total_ingreso_kg - self.total_vendido_kg).max(0.0)
    }

    /// Available stock in javas, clamped at zero
    pub fn stock_disponible_javas(&self) -> f64 {
        (self.total_ingreso_javas - self.total_vendido_javas).max(0.0)
    }

    /// Display form with every figure rounded to two decimals
    pub fn summary(&self) -> StockSummary {
        StockSummary {
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            total_ingreso_kg: round2(self.total_ingreso_kg),
            total_ingreso_javas: round2(self.total_ingreso_javas),
            total_vendido_kg: round2(self.total_vendido_kg),
            total_vendido_javas: round2(self.total_vendido_javas),
            stock_disponible_kg: round2(self.stock_disponible_kg()),
            stock_disponible_javas: round2(self.stock_disponible_javas()),
            costo_promedio_java: round2(self.costo_promedio_java),
        }
    }
}

/// Rounded stock position as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSummary {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_ingreso_kg: f64,
    pub total_ingreso_javas: f64,
    pub total_vendido_kg: f64,
    pub total_vendido_javas: f64,
    pub stock_disponible_kg: f64,
    pub stock_disponible_javas: f64,
    pub costo_promedio_java: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
