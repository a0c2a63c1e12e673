//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unit of product quantity
///
/// Every quantity in the system is expressed either in kilograms or in
/// javas (crates), related per product by its conversion factor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    Kg,
    Java,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "KG",
            Unit::Java => "JAVA",
        }
    }
}

/// A user-entered quantity tagged with the unit it was typed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "unit", content = "value")]
pub enum QuantityInput {
    #[serde(rename = "KG")]
    Kg(f64),
    #[serde(rename = "JAVA")]
    Java(f64),
}

impl QuantityInput {
    pub fn unit(&self) -> Unit {
        match self {
            QuantityInput::Kg(_) => Unit::Kg,
            QuantityInput::Java(_) => Unit::Java,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            QuantityInput::Kg(v) | QuantityInput::Java(v) => *v,
        }
    }
}

/// A user-entered unit price tagged with the pricing mode it was typed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", content = "value")]
pub enum PriceInput {
    #[serde(rename = "KG")]
    PerKg(f64),
    #[serde(rename = "JAVA")]
    PerJava(f64),
}

impl PriceInput {
    /// Unit the price is quoted against
    pub fn unit(&self) -> Unit {
        match self {
            PriceInput::PerKg(_) => Unit::Kg,
            PriceInput::PerJava(_) => Unit::Java,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            PriceInput::PerKg(v) | PriceInput::PerJava(v) => *v,
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
        }
    }
}

impl Pagination {
    /// Number of records to skip for this page
    pub fn offset(&self) -> usize {
        let page = self.page.max(1);
        ((page - 1) * self.per_page) as usize
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Date range for report queries, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
