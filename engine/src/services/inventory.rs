//! Physical inventory count service

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use shared::models::InventorySnapshot;

use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;
use crate::store::Store;

/// Records floor counts against the system's expected stock
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn Store>,
    stock: StockService,
}

impl InventoryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let stock = StockService::new(Arc::clone(&store));
        Self { store, stock }
    }

    /// Record a physical count of javas on the floor. The expected count
    /// is derived from the movement history at the moment of the count.
    pub fn record_snapshot(&self, physical_count: f64) -> AppResult<InventorySnapshot> {
        if !physical_count.is_finite() || physical_count < 0.0 {
            return Err(AppError::Validation {
                field: "physical_count".to_string(),
                message: "Physical count cannot be negative".to_string(),
                message_es: "El conteo físico no puede ser negativo".to_string(),
            });
        }

        let system_expected_count: f64 = self
            .stock
            .stock_by_product()?
            .values()
            .map(|s| s.stock_disponible_javas())
            .sum();

        let snapshot = InventorySnapshot {
            id: Uuid::new_v4(),
            date: Utc::now(),
            physical_count,
            system_expected_count,
            difference: physical_count - system_expected_count,
        };
        self.store.insert_snapshot(snapshot.clone())?;

        tracing::info!(
            physical = physical_count,
            expected = system_expected_count,
            difference = snapshot.difference,
            "recorded inventory snapshot"
        );
        Ok(snapshot)
    }

    /// Snapshot history, newest first
    pub fn list_snapshots(&self) -> AppResult<Vec<InventorySnapshot>> {
        let mut snapshots = self.store.snapshots()?;
        snapshots.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(snapshots)
    }
}
