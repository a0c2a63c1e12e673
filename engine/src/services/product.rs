//! Product catalog service

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use shared::models::{Product, ProductQuality, ProductType, DEFAULT_CONVERSION_FACTOR};
use shared::validation::validate_conversion_factor;

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Input for registering a product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub product_type: String,
    pub quality: String,
    /// Kg per java; the catalog default applies when absent
    pub conversion_factor: Option<f64>,
}

/// Input for updating a product; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub quality: Option<String>,
    pub conversion_factor: Option<f64>,
}

/// Catalog management for products, product types and qualities
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn Store>,
}

impl ProductService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name is required".to_string(),
                message_es: "El nombre del producto es requerido".to_string(),
            });
        }
        let product_type = input.product_type.trim().to_string();
        if product_type.is_empty() {
            return Err(AppError::Validation {
                field: "product_type".to_string(),
                message: "Product type is required".to_string(),
                message_es: "El tipo de producto es requerido".to_string(),
            });
        }
        let quality = input.quality.trim().to_string();
        if quality.is_empty() {
            return Err(AppError::Validation {
                field: "quality".to_string(),
                message: "Product quality is required".to_string(),
                message_es: "La calidad del producto es requerida".to_string(),
            });
        }

        let conversion_factor = input.conversion_factor.unwrap_or(DEFAULT_CONVERSION_FACTOR);
        if let Err(message) = validate_conversion_factor(conversion_factor) {
            return Err(AppError::Validation {
                field: "conversion_factor".to_string(),
                message: message.to_string(),
                message_es: "El factor de conversión debe ser mayor a 0".to_string(),
            });
        }

        // One product per name and quality
        let duplicate = self.store.products()?.into_iter().any(|p| {
            p.name.eq_ignore_ascii_case(&name) && p.quality.eq_ignore_ascii_case(&quality)
        });
        if duplicate {
            return Err(AppError::Duplicate {
                resource: "producto".to_string(),
                field: "name".to_string(),
                value: format!("{} ({})", name, quality),
            });
        }

        let product = Product {
            id: Uuid::new_v4(),
            name,
            product_type,
            quality,
            conversion_factor,
        };
        self.store.insert_product(product.clone())?;

        tracing::info!(product = %product.name, factor = product.conversion_factor, "created product");
        Ok(product)
    }

    pub fn update_product(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let mut product = self.get_product(id)?;

        if let Some(name) = input.name {
            product.name = name.trim().to_string();
        }
        if let Some(product_type) = input.product_type {
            product.product_type = product_type.trim().to_string();
        }
        if let Some(quality) = input.quality {
            product.quality = quality.trim().to_string();
        }
        if let Some(factor) = input.conversion_factor {
            if let Err(message) = validate_conversion_factor(factor) {
                return Err(AppError::Validation {
                    field: "conversion_factor".to_string(),
                    message: message.to_string(),
                    message_es: "El factor de conversión debe ser mayor a 0".to_string(),
                });
            }
            product.conversion_factor = factor;
        }

        self.store.update_product(product.clone())?;
        tracing::info!(product = %product.name, "updated product");
        Ok(product)
    }

    /// Delete a product without movements. Products referenced by intakes
    /// or sales stay, the history depends on them.
    pub fn delete_product(&self, id: Uuid) -> AppResult<()> {
        let product = self.get_product(id)?;

        let referenced = self
            .store
            .ingreso_lotes()?
            .iter()
            .any(|l| l.items.iter().any(|i| i.product_id == id))
            || self
                .store
                .ventas()?
                .iter()
                .any(|v| v.items.iter().any(|i| i.product_id == id));
        if referenced {
            return Err(AppError::BusinessRule(format!(
                "product {} has recorded movements and cannot be deleted",
                product.name
            )));
        }

        self.store.delete_product(id)?;
        tracing::info!(product = %product.name, "deleted product");
        Ok(())
    }

    pub fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.store.product(id)?.ok_or_else(|| AppError::NotFound {
            resource: "Producto".to_string(),
            id: Some(id),
        })
    }

    /// All products ordered by name then quality
    pub fn list_products(&self) -> AppResult<Vec<Product>> {
        let mut products = self.store.products()?;
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.quality.cmp(&b.quality)));
        Ok(products)
    }

    pub fn create_product_type(&self, name: &str) -> AppResult<ProductType> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Type name is required".to_string(),
                message_es: "El nombre del tipo es requerido".to_string(),
            });
        }
        if self
            .store
            .product_types()?
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(&name))
        {
            return Err(AppError::Duplicate {
                resource: "tipo de producto".to_string(),
                field: "name".to_string(),
                value: name,
            });
        }

        let product_type = ProductType {
            id: Uuid::new_v4(),
            name,
        };
        self.store.insert_product_type(product_type.clone())?;
        Ok(product_type)
    }

    pub fn list_product_types(&self) -> AppResult<Vec<ProductType>> {
        let mut types = self.store.product_types()?;
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    pub fn create_product_quality(&self, name: &str) -> AppResult<ProductQuality> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Quality name is required".to_string(),
                message_es: "El nombre de la calidad es requerido".to_string(),
            });
        }
        if self
            .store
            .product_qualities()?
            .iter()
            .any(|q| q.name.eq_ignore_ascii_case(&name))
        {
            return Err(AppError::Duplicate {
                resource: "calidad de producto".to_string(),
                field: "name".to_string(),
                value: name,
            });
        }

        let quality = ProductQuality {
            id: Uuid::new_v4(),
            name,
        };
        self.store.insert_product_quality(quality.clone())?;
        Ok(quality)
    }

    pub fn list_product_qualities(&self) -> AppResult<Vec<ProductQuality>> {
        let mut qualities = self.store.product_qualities()?;
        qualities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(qualities)
    }
}
