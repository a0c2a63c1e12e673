//! Product catalog tests

use std::sync::Arc;

use uuid::Uuid;

use agro_gestion_engine::error::AppError;
use agro_gestion_engine::services::ingreso::{
    CreateIngresoLoteInput, IngresoItemInput, IngresoService,
};
use agro_gestion_engine::services::product::{CreateProductInput, ProductService, UpdateProductInput};
use agro_gestion_engine::store::{MemoryStore, Store};
use shared::models::DEFAULT_CONVERSION_FACTOR;
use shared::types::{PriceInput, QuantityInput};

fn setup() -> (Arc<dyn Store>, ProductService) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let service = ProductService::new(Arc::clone(&store));
    (store, service)
}

fn input(name: &str, quality: &str, factor: Option<f64>) -> CreateProductInput {
    CreateProductInput {
        name: name.to_string(),
        product_type: "Kion".to_string(),
        quality: quality.to_string(),
        conversion_factor: factor,
    }
}

#[test]
fn test_create_product_with_catalog_default() {
    let (_, service) = setup();

    let product = service.create_product(input("Kion", "Primera", None)).unwrap();
    assert_eq!(product.conversion_factor, DEFAULT_CONVERSION_FACTOR);
}

#[test]
fn test_create_product_with_explicit_factor() {
    let (_, service) = setup();

    let product = service
        .create_product(input("Kion", "Segunda", Some(17.0)))
        .unwrap();
    assert_eq!(product.conversion_factor, 17.0);
}

#[test]
fn test_create_product_rejects_bad_factor() {
    let (_, service) = setup();

    for factor in [0.0, -5.0, f64::NAN] {
        let err = service
            .create_product(input("Kion", "Primera", Some(factor)))
            .unwrap_err();
        match err {
            AppError::Validation { field, .. } => assert_eq!(field, "conversion_factor"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

#[test]
fn test_create_product_rejects_duplicate_name_and_quality() {
    let (_, service) = setup();

    service.create_product(input("Kion", "Primera", None)).unwrap();
    // Same name with another quality is a different product
    service.create_product(input("Kion", "Segunda", None)).unwrap();

    let err = service
        .create_product(input("kion", "primera", None))
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_ERROR");
}

#[test]
fn test_update_product_factor() {
    let (_, service) = setup();
    let product = service.create_product(input("Kion", "Primera", None)).unwrap();

    let updated = service
        .update_product(
            product.id,
            UpdateProductInput {
                conversion_factor: Some(18.5),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.conversion_factor, 18.5);

    let err = service
        .update_product(
            product.id,
            UpdateProductInput {
                conversion_factor: Some(0.0),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn test_delete_product_without_movements() {
    let (_, service) = setup();
    let product = service.create_product(input("Kion", "Primera", None)).unwrap();

    service.delete_product(product.id).unwrap();
    assert_eq!(service.get_product(product.id).unwrap_err().code(), "NOT_FOUND");
}

#[test]
fn test_delete_product_with_movements_rejected() {
    let (store, service) = setup();
    let product = service.create_product(input("Kion", "Primera", None)).unwrap();

    let ingresos = IngresoService::new(Arc::clone(&store));
    ingresos
        .create_lote(CreateIngresoLoteInput {
            truck_id: "ABC-123".to_string(),
            items: vec![IngresoItemInput {
                supplier_name: "Proveedor Uno".to_string(),
                product_id: product.id,
                quantity: QuantityInput::Java(10.0),
                cost: PriceInput::PerJava(50.0),
                conversion_factor: None,
            }],
        })
        .unwrap();

    let err = service.delete_product(product.id).unwrap_err();
    assert_eq!(err.code(), "BUSINESS_RULE_ERROR");
}

#[test]
fn test_unknown_product_update_is_not_found() {
    let (_, service) = setup();
    let err = service
        .update_product(Uuid::new_v4(), UpdateProductInput::default())
        .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn test_list_products_sorted() {
    let (_, service) = setup();
    service.create_product(input("Kion", "Segunda", None)).unwrap();
    service.create_product(input("Curcuma", "Primera", None)).unwrap();
    service.create_product(input("Kion", "Primera", None)).unwrap();

    let products = service.list_products().unwrap();
    let names: Vec<_> = products
        .iter()
        .map(|p| format!("{} {}", p.name, p.quality))
        .collect();
    assert_eq!(names, ["Curcuma Primera", "Kion Primera", "Kion Segunda"]);
}

#[test]
fn test_type_and_quality_catalogs() {
    let (_, service) = setup();

    service.create_product_type("Kion").unwrap();
    service.create_product_quality("Primera").unwrap();

    assert_eq!(
        service.create_product_type(" kion ").unwrap_err().code(),
        "DUPLICATE_ERROR"
    );
    assert_eq!(
        service.create_product_quality("primera").unwrap_err().code(),
        "DUPLICATE_ERROR"
    );

    assert_eq!(service.list_product_types().unwrap().len(), 1);
    assert_eq!(service.list_product_qualities().unwrap().len(), 1);
}
