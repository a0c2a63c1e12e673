//! Client and debt models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client of the shop, with the outstanding balance of their credit
/// purchases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub whatsapp_number: Option<String>,
    /// Outstanding credit balance, never negative
    pub current_debt: Decimal,
}

/// A payment a client made against their debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPayment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}
