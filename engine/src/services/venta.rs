//! Venta service for business logic related to sales
//!
//! Handles calculations, validation, stock checks and debt management.

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::conversion::convert_quantity;
use shared::models::{Client, Venta, VentaItem, VentaType};
use shared::types::{DateRange, Pagination, Unit};
use shared::validation::validate_positive_amount;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::stock::StockService;
use crate::store::Store;

/// Result of venta item calculations
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedVentaItem {
    pub quantity_kg: f64,
    pub quantity_javas: f64,
    pub conversion_factor: f64,
    pub price_per_kg: Decimal,
    pub subtotal: Decimal,
}

/// Calculate values for a venta item.
///
/// This is the single source of truth for sale line calculations. Sales
/// are entered in kg; the java quantity is derived for stock tracking.
pub fn calculate_venta_item(
    quantity_kg: f64,
    conversion_factor: f64,
    price_per_kg: f64,
) -> AppResult<CalculatedVentaItem> {
    if validate_positive_amount(quantity_kg).is_err() {
        return Err(AppError::Validation {
            field: "quantity_kg".to_string(),
            message: "Quantity in kg must be greater than 0".to_string(),
            message_es: "La cantidad en KG debe ser mayor a 0".to_string(),
        });
    }
    if validate_positive_amount(price_per_kg).is_err() {
        return Err(AppError::Validation {
            field: "price_per_kg".to_string(),
            message: "Price per kg must be greater than 0".to_string(),
            message_es: "El precio por KG debe ser mayor a 0".to_string(),
        });
    }

    let quantity_javas = convert_quantity(quantity_kg, conversion_factor, Unit::Kg, Unit::Java)?;

    // Money switches to decimal at this boundary; both operands were
    // validated finite above
    let quantity = Decimal::from_f64(quantity_kg).unwrap_or(Decimal::ZERO);
    let price_per_kg = Decimal::from_f64(price_per_kg).unwrap_or(Decimal::ZERO);
    let subtotal = quantity * price_per_kg;

    Ok(CalculatedVentaItem {
        quantity_kg,
        quantity_javas,
        conversion_factor,
        price_per_kg,
        subtotal,
    })
}

/// One line of a sale as entered at the point of sale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VentaItemInput {
    pub product_id: Uuid,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
}

/// Input for registering a sale
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVentaInput {
    pub venta_type: VentaType,
    /// Required for PEDIDO
    pub client_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Debe incluir al menos un producto"))]
    pub items: Vec<VentaItemInput>,
}

/// Input for replacing the lines of an existing sale
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateVentaInput {
    pub client_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Debe incluir al menos un producto"))]
    pub items: Vec<VentaItemInput>,
}

/// Listing filters for sales
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VentaFilter {
    pub venta_type: Option<VentaType>,
    pub user_id: Option<Uuid>,
    /// Filter on the business-local date of the sale
    pub range: Option<DateRange>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Sales registration, voiding and queries
#[derive(Clone)]
pub struct VentaService {
    store: Arc<dyn Store>,
    stock: StockService,
    offset: FixedOffset,
}

impl VentaService {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        let stock = StockService::new(Arc::clone(&store));
        Self {
            store,
            stock,
            offset: config.utc_offset(),
        }
    }

    /// Register a sale. PEDIDO sales require a client and accrue their
    /// debt; every line is checked against available stock.
    pub fn create_venta(&self, user_id: Uuid, input: CreateVentaInput) -> AppResult<Venta> {
        input.validate()?;

        tracing::info!(venta_type = %input.venta_type, user = %user_id, "creating venta");

        if input.venta_type == VentaType::Pedido && input.client_id.is_none() {
            return Err(AppError::Validation {
                field: "client_id".to_string(),
                message: "Credit sales require a client".to_string(),
                message_es: "Las ventas a crédito requieren un cliente".to_string(),
            });
        }

        let client = match input.client_id {
            Some(client_id) => Some(self.fetch_client(client_id)?),
            None => None,
        };

        let mut items = Vec::with_capacity(input.items.len());
        let mut total_amount = Decimal::ZERO;
        for item in &input.items {
            let product =
                self.store
                    .product(item.product_id)?
                    .ok_or_else(|| AppError::NotFound {
                        resource: "Producto".to_string(),
                        id: Some(item.product_id),
                    })?;

            self.stock
                .validate_stock_disponible(item.product_id, item.quantity_kg)?;

            let calculated =
                calculate_venta_item(item.quantity_kg, product.conversion_factor, item.price_per_kg)?;
            total_amount += calculated.subtotal;

            tracing::debug!(
                product = %product.name,
                kg = calculated.quantity_kg,
                subtotal = %calculated.subtotal,
                "adding venta item"
            );

            items.push(VentaItem {
                id: Uuid::new_v4(),
                product_id: item.product_id,
                quantity_kg: calculated.quantity_kg,
                quantity_javas: calculated.quantity_javas,
                conversion_factor: calculated.conversion_factor,
                price_per_kg: calculated.price_per_kg,
                subtotal: calculated.subtotal,
            });
        }

        let venta = Venta {
            id: Uuid::new_v4(),
            date: Utc::now(),
            venta_type: input.venta_type,
            client_id: input.client_id,
            user_id,
            total_amount,
            is_printed: false,
            items,
        };
        self.store.insert_venta(venta.clone())?;

        if venta.venta_type == VentaType::Pedido {
            if let Some(mut client) = client {
                client.current_debt += total_amount;
                self.store.update_client(client.clone())?;
                tracing::info!(
                    client = %client.name,
                    accrued = %total_amount,
                    debt = %client.current_debt,
                    "updated client debt"
                );
            }
        }

        tracing::info!(venta = %venta.id, items = venta.items.len(), total = %total_amount, "created venta");
        Ok(venta)
    }

    pub fn get_venta(&self, id: Uuid) -> AppResult<Venta> {
        self.store.venta(id)?.ok_or_else(|| AppError::NotFound {
            resource: "Venta".to_string(),
            id: Some(id),
        })
    }

    /// List sales with filters, newest first
    pub fn list_ventas(&self, filter: &VentaFilter) -> AppResult<Vec<Venta>> {
        let mut ventas: Vec<Venta> = self
            .store
            .ventas()?
            .into_iter()
            .filter(|v| {
                filter
                    .venta_type
                    .map_or(true, |t| v.venta_type == t)
            })
            .filter(|v| filter.user_id.map_or(true, |u| v.user_id == u))
            .filter(|v| {
                filter.range.map_or(true, |range| {
                    range.contains(v.date.with_timezone(&self.offset).date_naive())
                })
            })
            .collect();
        ventas.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(ventas
            .into_iter()
            .skip(filter.pagination.offset())
            .take(filter.pagination.per_page as usize)
            .collect())
    }

    /// Replace the lines of an existing sale, reverting and re-accruing
    /// client debt for PEDIDO sales
    pub fn update_venta(&self, venta_id: Uuid, input: UpdateVentaInput) -> AppResult<Venta> {
        input.validate()?;

        let venta = self.get_venta(venta_id)?;

        let target_client_id = if venta.venta_type == VentaType::Pedido {
            let client_id = input.client_id.ok_or_else(|| AppError::Validation {
                field: "client_id".to_string(),
                message: "Credit sales require a client".to_string(),
                message_es: "Las ventas a crédito requieren un cliente".to_string(),
            })?;

            // Revert the old client's debt before re-accruing, so moving
            // a sale between clients settles both sides
            if let Some(old_client_id) = venta.client_id {
                if let Some(mut old_client) = self.store.client(old_client_id)? {
                    old_client.current_debt =
                        (old_client.current_debt - venta.total_amount).max(Decimal::ZERO);
                    self.store.update_client(old_client.clone())?;
                    tracing::info!(
                        client = %old_client.name,
                        reverted = %venta.total_amount,
                        "reverted client debt"
                    );
                }
            }
            Some(client_id)
        } else {
            venta.client_id
        };

        let mut items = Vec::with_capacity(input.items.len());
        let mut total_amount = Decimal::ZERO;
        for item in &input.items {
            let product =
                self.store
                    .product(item.product_id)?
                    .ok_or_else(|| AppError::NotFound {
                        resource: "Producto".to_string(),
                        id: Some(item.product_id),
                    })?;

            let calculated =
                calculate_venta_item(item.quantity_kg, product.conversion_factor, item.price_per_kg)?;
            total_amount += calculated.subtotal;

            items.push(VentaItem {
                id: Uuid::new_v4(),
                product_id: item.product_id,
                quantity_kg: calculated.quantity_kg,
                quantity_javas: calculated.quantity_javas,
                conversion_factor: calculated.conversion_factor,
                price_per_kg: calculated.price_per_kg,
                subtotal: calculated.subtotal,
            });
        }

        let mut updated = venta;
        updated.client_id = target_client_id;
        updated.items = items;
        updated.total_amount = total_amount;
        updated.date = Utc::now();

        if updated.venta_type == VentaType::Pedido {
            if let Some(client_id) = updated.client_id {
                let mut client = self.fetch_client(client_id)?;
                client.current_debt += total_amount;
                self.store.update_client(client)?;
            }
        }

        self.store.update_venta(updated.clone())?;
        tracing::info!(venta = %updated.id, total = %updated.total_amount, "updated venta");
        Ok(updated)
    }

    /// Void a sale. PEDIDO debt is reverted, clamped at zero so a partly
    /// paid sale never leaves a negative balance.
    pub fn anular_venta(&self, venta_id: Uuid) -> AppResult<()> {
        let venta = self.get_venta(venta_id)?;

        if venta.venta_type == VentaType::Pedido {
            if let Some(client_id) = venta.client_id {
                if let Some(mut client) = self.store.client(client_id)? {
                    client.current_debt =
                        (client.current_debt - venta.total_amount).max(Decimal::ZERO);
                    self.store.update_client(client.clone())?;
                    tracing::info!(
                        client = %client.name,
                        reverted = %venta.total_amount,
                        "reverted client debt"
                    );
                }
            }
        }

        self.store.delete_venta(venta_id)?;
        tracing::info!(venta = %venta_id, "voided venta");
        Ok(())
    }

    /// Mark the ticket as printed
    pub fn mark_printed(&self, venta_id: Uuid) -> AppResult<Venta> {
        let mut venta = self.get_venta(venta_id)?;
        venta.is_printed = true;
        self.store.update_venta(venta.clone())?;
        Ok(venta)
    }

    fn fetch_client(&self, client_id: Uuid) -> AppResult<Client> {
        self.store
            .client(client_id)?
            .ok_or_else(|| AppError::NotFound {
                resource: "Cliente".to_string(),
                id: Some(client_id),
            })
    }
}
