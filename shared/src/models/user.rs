//! User and role models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles in the shop: administration, point of sale, warehouse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    #[default]
    Vendedor,
    Inventor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Vendedor => "VENDEDOR",
            UserRole::Inventor => "INVENTOR",
        }
    }
}

/// An operator of the system. Credentials live in the external identity
/// boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}
