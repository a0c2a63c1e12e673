//! Stock service for centralized stock calculations
//!
//! Single source of truth for all stock-related figures. The position of
//! a product is never stored; it is recomputed from the full movement
//! history (intakes minus sales) on every query.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use shared::models::{StockInfo, StockSummary};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Stock queries over the movement history
#[derive(Clone)]
pub struct StockService {
    store: Arc<dyn Store>,
}

impl StockService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Calculate the stock position of every product
    pub fn stock_by_product(&self) -> AppResult<HashMap<Uuid, StockInfo>> {
        tracing::debug!("calculating stock for all products");

        let products = self.store.products()?;

        // Total intake per product: kg, javas, cost
        let mut ingresos: HashMap<Uuid, (f64, f64, f64)> = HashMap::new();
        for lote in self.store.ingreso_lotes()? {
            for item in lote.items {
                let entry = ingresos.entry(item.product_id).or_default();
                entry.0 += item.total_kg;
                entry.1 += item.total_javas;
                entry.2 += item.total_cost;
            }
        }

        // Total sold per product: kg, javas
        let mut vendidos: HashMap<Uuid, (f64, f64)> = HashMap::new();
        for venta in self.store.ventas()? {
            for item in venta.items {
                let entry = vendidos.entry(item.product_id).or_default();
                entry.0 += item.quantity_kg;
                entry.1 += item.quantity_javas;
            }
        }

        let mut stock_map = HashMap::new();
        for product in products {
            let (total_ingreso_kg, total_ingreso_javas, total_cost) =
                ingresos.get(&product.id).copied().unwrap_or_default();
            let (total_vendido_kg, total_vendido_javas) =
                vendidos.get(&product.id).copied().unwrap_or_default();

            // Weighted average cost per java over everything received
            let costo_promedio_java = if total_ingreso_javas > 0.0 {
                total_cost / total_ingreso_javas
            } else {
                0.0
            };

            stock_map.insert(
                product.id,
                StockInfo {
                    product_id: product.id,
                    product_name: product.name,
                    total_ingreso_kg,
                    total_ingreso_javas,
                    total_vendido_kg,
                    total_vendido_javas,
                    costo_promedio_java,
                },
            );
        }

        tracing::debug!(products = stock_map.len(), "stock calculated");
        Ok(stock_map)
    }

    /// Stock position for a single product
    pub fn product_stock(&self, product_id: Uuid) -> AppResult<StockInfo> {
        self.stock_by_product()?
            .remove(&product_id)
            .ok_or_else(|| AppError::NotFound {
                resource: "Producto".to_string(),
                id: Some(product_id),
            })
    }

    /// Check there is enough stock for a sale of `cantidad_kg`
    pub fn validate_stock_disponible(&self, product_id: Uuid, cantidad_kg: f64) -> AppResult<()> {
        let stock = self.product_stock(product_id)?;
        let available_kg = stock.stock_disponible_kg();

        if available_kg < cantidad_kg {
            return Err(AppError::StockInsuficiente {
                product: stock.product_name,
                available_kg,
                requested_kg: cantidad_kg,
            });
        }

        Ok(())
    }

    /// Weighted average intake cost per java, 0 when nothing was received
    pub fn costo_promedio(&self, product_id: Uuid) -> AppResult<f64> {
        Ok(self.product_stock(product_id)?.costo_promedio_java)
    }

    /// Rounded positions for listings, ordered by product name
    pub fn stock_summaries(&self) -> AppResult<Vec<StockSummary>> {
        let mut summaries: Vec<StockSummary> = self
            .stock_by_product()?
            .values()
            .map(StockInfo::summary)
            .collect();
        summaries.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(summaries)
    }
}
