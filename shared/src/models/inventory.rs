//! Physical inventory count models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical count of javas on the floor, compared against what the
/// movement history says should be there
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub physical_count: f64,
    pub system_expected_count: f64,
    /// physical minus expected; negative means shrinkage
    pub difference: f64,
}
