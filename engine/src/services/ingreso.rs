//! Ingreso service for business logic related to supplier intake
//!
//! Handles calculations, validation and persistence of ingreso lotes.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::conversion::{convert_price, convert_quantity};
use shared::models::{IngresoItem, IngresoLote};
use shared::types::{Pagination, PriceInput, QuantityInput, Unit};
use shared::validation::{validate_positive_amount, validate_truck_plate};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Result of intake item cost calculations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatedIntakeItem {
    pub total_kg: f64,
    pub total_javas: f64,
    pub cost_per_java: f64,
    pub total_cost: f64,
}

/// Calculate canonical quantities and costs for an intake item.
///
/// This is the single source of truth for intake calculations. The
/// quantity may be typed in kg or javas and the cost per kg or per java;
/// all four combinations resolve to the same canonical
/// (total_kg, total_javas, cost_per_java, total_cost) set.
pub fn calculate_intake_item(
    quantity: QuantityInput,
    cost: PriceInput,
    conversion_factor: f64,
) -> AppResult<CalculatedIntakeItem> {
    if validate_positive_amount(quantity.value()).is_err() {
        return Err(AppError::Validation {
            field: "quantity".to_string(),
            message: "Quantity must be greater than 0".to_string(),
            message_es: "La cantidad debe ser mayor a 0".to_string(),
        });
    }
    if validate_positive_amount(cost.value()).is_err() {
        return Err(AppError::Validation {
            field: "cost_price_input".to_string(),
            message: "Cost price must be greater than 0".to_string(),
            message_es: "El precio de costo debe ser mayor a 0".to_string(),
        });
    }

    let total_kg = convert_quantity(quantity.value(), conversion_factor, quantity.unit(), Unit::Kg)?;
    let total_javas = convert_quantity(total_kg, conversion_factor, Unit::Kg, Unit::Java)?;

    // Costs are normalized to per java before totalling
    let cost_per_java = convert_price(cost.value(), conversion_factor, cost.unit(), Unit::Java)?;
    let total_cost = cost_per_java * total_javas;

    tracing::debug!(
        total_kg,
        total_javas,
        cost_per_java,
        total_cost,
        "calculated intake item"
    );

    Ok(CalculatedIntakeItem {
        total_kg,
        total_javas,
        cost_per_java,
        total_cost,
    })
}

/// One supplier/product line of a delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngresoItemInput {
    pub supplier_name: String,
    pub product_id: Uuid,
    pub quantity: QuantityInput,
    pub cost: PriceInput,
    /// Overrides the product's catalog factor for this delivery
    pub conversion_factor: Option<f64>,
}

/// Input for registering a delivery batch
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIngresoLoteInput {
    pub truck_id: String,
    #[validate(length(min = 1, message = "Debe incluir al menos un proveedor/producto"))]
    pub items: Vec<IngresoItemInput>,
}

/// Supplier intake registration and queries
#[derive(Clone)]
pub struct IngresoService {
    store: Arc<dyn Store>,
}

impl IngresoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register a delivery batch with its items
    pub fn create_lote(&self, input: CreateIngresoLoteInput) -> AppResult<IngresoLote> {
        input.validate()?;

        validate_truck_plate(&input.truck_id).map_err(|message| AppError::Validation {
            field: "truck_id".to_string(),
            message: message.to_string(),
            message_es: "La placa del camión debe tener al menos 3 caracteres".to_string(),
        })?;
        let truck_id = input.truck_id.trim().to_uppercase();

        tracing::info!(truck = %truck_id, "creating ingreso lote");

        let mut items = Vec::with_capacity(input.items.len());
        for (idx, item) in input.items.into_iter().enumerate() {
            let supplier_name = item.supplier_name.trim().to_string();
            if supplier_name.is_empty() {
                return Err(AppError::Validation {
                    field: "supplier_name".to_string(),
                    message: format!("Supplier is required in item {}", idx + 1),
                    message_es: format!("Proveedor requerido en item {}", idx + 1),
                });
            }

            let product =
                self.store
                    .product(item.product_id)?
                    .ok_or_else(|| AppError::NotFound {
                        resource: "Producto".to_string(),
                        id: Some(item.product_id),
                    })?;

            let conversion_factor = item
                .conversion_factor
                .unwrap_or(product.conversion_factor);
            let calculated = calculate_intake_item(item.quantity, item.cost, conversion_factor)?;

            tracing::debug!(
                supplier = %supplier_name,
                product = %product.name,
                javas = calculated.total_javas,
                "adding ingreso item"
            );

            items.push(IngresoItem {
                id: Uuid::new_v4(),
                supplier_name,
                product_id: item.product_id,
                total_kg: calculated.total_kg,
                conversion_factor,
                total_javas: calculated.total_javas,
                cost_per_java: calculated.cost_per_java,
                total_cost: calculated.total_cost,
            });
        }

        let lote = IngresoLote {
            id: Uuid::new_v4(),
            truck_id,
            date: Utc::now(),
            items,
        };
        self.store.insert_ingreso_lote(lote.clone())?;

        tracing::info!(lote = %lote.id, items = lote.items.len(), "created ingreso lote");
        Ok(lote)
    }

    pub fn get_lote(&self, id: Uuid) -> AppResult<IngresoLote> {
        self.store
            .ingreso_lote(id)?
            .ok_or_else(|| AppError::NotFound {
                resource: "Lote de ingreso".to_string(),
                id: Some(id),
            })
    }

    /// Delivery batches, newest first
    pub fn list_lotes(&self, pagination: Pagination) -> AppResult<Vec<IngresoLote>> {
        let mut lotes = self.store.ingreso_lotes()?;
        lotes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(lotes
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page as usize)
            .collect())
    }

    pub fn delete_lote(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_ingreso_lote(id)? {
            return Err(AppError::NotFound {
                resource: "Lote de ingreso".to_string(),
                id: Some(id),
            });
        }
        tracing::info!(lote = %id, "deleted ingreso lote");
        Ok(())
    }
}
