//! Unit conversion and financial aggregation engine
//!
//! Quantities exist in two units, kilograms and javas, related per product
//! by a conversion factor expressed in kg per java. This module is the
//! single implementation of that arithmetic; forms and services never
//! convert by hand.
//!
//! The engine is pure and total over its inputs. Incomplete form rows
//! contribute zero to the running totals so a form stays usable while the
//! user is still typing; required-field validation happens at submit time
//! in the service layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PriceInput, QuantityInput, Unit};

/// A conversion factor of zero or less is a product configuration error,
/// not a runtime condition to silently tolerate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid conversion factor {factor}: must be greater than 0 kg per java")]
pub struct InvalidFactorError {
    pub factor: f64,
}

/// Reject non-positive factors. NaN fails the comparison and is rejected
/// together with zero and negatives.
fn check_factor(factor: f64) -> Result<f64, InvalidFactorError> {
    if factor > 0.0 {
        Ok(factor)
    } else {
        Err(InvalidFactorError { factor })
    }
}

/// Convert a quantity between kilograms and javas.
///
/// One java weighs `factor` kilograms, so kg -> javas divides and
/// javas -> kg multiplies. Converting to the same unit returns the value
/// unchanged. Non-finite values propagate per IEEE 754.
pub fn convert_quantity(
    value: f64,
    factor: f64,
    from: Unit,
    to: Unit,
) -> Result<f64, InvalidFactorError> {
    let factor = check_factor(factor)?;
    Ok(match (from, to) {
        (Unit::Kg, Unit::Java) => value / factor,
        (Unit::Java, Unit::Kg) => value * factor,
        _ => value,
    })
}

/// Convert a unit price between per-kilogram and per-java.
///
/// Prices move inversely to quantities: a price per java spreads over
/// `factor` kilograms, so per-java -> per-kg divides and
/// per-kg -> per-java multiplies.
pub fn convert_price(
    value: f64,
    factor: f64,
    from: Unit,
    to: Unit,
) -> Result<f64, InvalidFactorError> {
    let factor = check_factor(factor)?;
    Ok(match (from, to) {
        (Unit::Java, Unit::Kg) => value / factor,
        (Unit::Kg, Unit::Java) => value * factor,
        _ => value,
    })
}

/// One form row: the selected product's factor plus whatever the user has
/// typed so far. Blank fields are `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LineItem {
    /// Kg per java for the selected product
    pub conversion_factor: f64,
    pub quantity: Option<QuantityInput>,
    pub price: Option<PriceInput>,
}

impl LineItem {
    pub fn new(conversion_factor: f64) -> Self {
        Self {
            conversion_factor,
            quantity: None,
            price: None,
        }
    }

    pub fn with_quantity(mut self, quantity: QuantityInput) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_price(mut self, price: PriceInput) -> Self {
        self.price = Some(price);
        self
    }
}

/// Canonical resolution of a line: both quantities, both unit prices and
/// the monetary subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LineTotals {
    pub quantity_kg: f64,
    pub quantity_javas: f64,
    pub price_per_kg: f64,
    pub price_per_java: f64,
    pub subtotal: f64,
}

impl LineTotals {
    pub const ZERO: LineTotals = LineTotals {
        quantity_kg: 0.0,
        quantity_javas: 0.0,
        price_per_kg: 0.0,
        price_per_java: 0.0,
        subtotal: 0.0,
    };
}

/// Running totals across all lines of a form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AggregateTotals {
    pub total_kg: f64,
    pub total_javas: f64,
    pub total_amount: f64,
}

impl AggregateTotals {
    pub const ZERO: AggregateTotals = AggregateTotals {
        total_kg: 0.0,
        total_javas: 0.0,
        total_amount: 0.0,
    };

    pub fn accumulate(&self, line: &LineTotals) -> AggregateTotals {
        AggregateTotals {
            total_kg: self.total_kg + line.quantity_kg,
            total_javas: self.total_javas + line.quantity_javas,
            total_amount: self.total_amount + line.subtotal,
        }
    }
}

/// Resolve whichever quantity and price fields were populated into the
/// full canonical set.
///
/// Missing or non-positive values resolve to a zero contribution for that
/// side. An invalid conversion factor zeroes the whole line; the calling
/// form detects that condition through [`convert_quantity`] /
/// [`convert_price`] when it validates for submission.
pub fn compute_line_totals(item: &LineItem) -> LineTotals {
    let factor = match check_factor(item.conversion_factor) {
        Ok(f) => f,
        Err(_) => return LineTotals::ZERO,
    };

    let (quantity_kg, quantity_javas) = match item.quantity {
        Some(q) if q.value() > 0.0 => {
            let kg = match q {
                QuantityInput::Kg(v) => v,
                QuantityInput::Java(v) => v * factor,
            };
            (kg, kg / factor)
        }
        _ => (0.0, 0.0),
    };

    let (price_per_kg, price_per_java) = match item.price {
        Some(p) if p.value() > 0.0 => {
            let per_kg = match p {
                PriceInput::PerKg(v) => v,
                PriceInput::PerJava(v) => v / factor,
            };
            (per_kg, per_kg * factor)
        }
        _ => (0.0, 0.0),
    };

    LineTotals {
        quantity_kg,
        quantity_javas,
        price_per_kg,
        price_per_java,
        subtotal: quantity_javas * price_per_java,
    }
}

/// Sum line totals across a form. The empty list yields all zeros and
/// summation is order independent within floating point tolerance.
pub fn aggregate(items: &[LineItem]) -> AggregateTotals {
    items
        .iter()
        .map(compute_line_totals)
        .fold(AggregateTotals::ZERO, |acc, line| acc.accumulate(&line))
}
