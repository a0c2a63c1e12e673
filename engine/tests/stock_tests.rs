//! Stock calculation tests
//!
//! Covers stock positions derived from the movement history, weighted
//! average cost, availability checks and the rounded listings.

use std::sync::Arc;

use proptest::prelude::*;
use uuid::Uuid;

use agro_gestion_engine::config::Config;
use agro_gestion_engine::error::AppError;
use agro_gestion_engine::services::ingreso::{
    CreateIngresoLoteInput, IngresoItemInput, IngresoService,
};
use agro_gestion_engine::services::venta::{CreateVentaInput, VentaItemInput, VentaService};
use agro_gestion_engine::services::StockService;
use agro_gestion_engine::store::{MemoryStore, Store};
use shared::models::Product;
use shared::types::{PriceInput, QuantityInput};

struct TestContext {
    store: Arc<dyn Store>,
    stock: StockService,
    ingresos: IngresoService,
    ventas: VentaService,
}

fn setup() -> TestContext {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    TestContext {
        stock: StockService::new(Arc::clone(&store)),
        ingresos: IngresoService::new(Arc::clone(&store)),
        ventas: VentaService::new(Arc::clone(&store), &Config::default()),
        store,
    }
}

fn seed_product(store: &Arc<dyn Store>, name: &str, factor: f64) -> Product {
    let product = Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        product_type: "Kion".to_string(),
        quality: "Primera".to_string(),
        conversion_factor: factor,
    };
    store.insert_product(product.clone()).unwrap();
    product
}

fn receive(ctx: &TestContext, product: &Product, javas: f64, cost_per_java: f64) {
    ctx.ingresos
        .create_lote(CreateIngresoLoteInput {
            truck_id: "ABC-123".to_string(),
            items: vec![IngresoItemInput {
                supplier_name: "Proveedor Uno".to_string(),
                product_id: product.id,
                quantity: QuantityInput::Java(javas),
                cost: PriceInput::PerJava(cost_per_java),
                conversion_factor: None,
            }],
        })
        .unwrap();
}

fn sell(ctx: &TestContext, product: &Product, kg: f64) {
    ctx.ventas
        .create_venta(
            Uuid::new_v4(),
            CreateVentaInput {
                venta_type: shared::models::VentaType::Caja,
                client_id: None,
                items: vec![VentaItemInput {
                    product_id: product.id,
                    quantity_kg: kg,
                    price_per_kg: 3.0,
                }],
            },
        )
        .unwrap();
}

#[test]
fn test_empty_store_has_no_stock() {
    let ctx = setup();
    assert!(ctx.stock.stock_by_product().unwrap().is_empty());
}

#[test]
fn test_product_without_movements_is_zero() {
    let ctx = setup();
    let product = seed_product(&ctx.store, "Kion Primera", 20.0);

    let stock = ctx.stock.product_stock(product.id).unwrap();
    assert_eq!(stock.total_ingreso_kg, 0.0);
    assert_eq!(stock.total_vendido_kg, 0.0);
    assert_eq!(stock.stock_disponible_javas(), 0.0);
    assert_eq!(stock.costo_promedio_java, 0.0);
}

#[test]
fn test_stock_after_intake_and_sale() {
    let ctx = setup();
    let product = seed_product(&ctx.store, "Kion Primera", 20.0);

    receive(&ctx, &product, 10.0, 50.0);
    sell(&ctx, &product, 60.0); // 3 javas

    let stock = ctx.stock.product_stock(product.id).unwrap();
    assert_eq!(stock.total_ingreso_kg, 200.0);
    assert_eq!(stock.total_ingreso_javas, 10.0);
    assert_eq!(stock.total_vendido_kg, 60.0);
    assert_eq!(stock.total_vendido_javas, 3.0);
    assert_eq!(stock.stock_disponible_kg(), 140.0);
    assert_eq!(stock.stock_disponible_javas(), 7.0);
}

#[test]
fn test_weighted_average_cost_across_lotes() {
    let ctx = setup();
    let product = seed_product(&ctx.store, "Kion Primera", 20.0);

    // 100 javas at 50 plus 50 javas at 80: (5000 + 4000) / 150
    receive(&ctx, &product, 100.0, 50.0);
    receive(&ctx, &product, 50.0, 80.0);

    let stock = ctx.stock.product_stock(product.id).unwrap();
    assert!((stock.costo_promedio_java - 60.0).abs() < 1e-9);
    assert_eq!(ctx.stock.costo_promedio(product.id).unwrap(), stock.costo_promedio_java);
}

#[test]
fn test_validate_stock_disponible() {
    let ctx = setup();
    let product = seed_product(&ctx.store, "Kion Primera", 20.0);
    receive(&ctx, &product, 2.0, 50.0); // 40 kg

    assert!(ctx.stock.validate_stock_disponible(product.id, 40.0).is_ok());

    let err = ctx
        .stock
        .validate_stock_disponible(product.id, 40.5)
        .unwrap_err();
    match err {
        AppError::StockInsuficiente {
            available_kg,
            requested_kg,
            ..
        } => {
            assert_eq!(available_kg, 40.0);
            assert_eq!(requested_kg, 40.5);
        }
        other => panic!("expected stock error, got {other:?}"),
    }
}

#[test]
fn test_unknown_product_is_not_found() {
    let ctx = setup();
    assert_eq!(
        ctx.stock.product_stock(Uuid::new_v4()).unwrap_err().code(),
        "NOT_FOUND"
    );
}

#[test]
fn test_stock_summaries_sorted_and_rounded() {
    let ctx = setup();
    let kion = seed_product(&ctx.store, "Kion Primera", 20.0);
    let curcuma = seed_product(&ctx.store, "Curcuma Segunda", 17.0);

    receive(&ctx, &kion, 3.333, 50.0);
    receive(&ctx, &curcuma, 1.0, 42.0);

    let summaries = ctx.stock.stock_summaries().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].product_name, "Curcuma Segunda");
    assert_eq!(summaries[1].product_name, "Kion Primera");
    assert_eq!(summaries[1].total_ingreso_javas, 3.33);
}

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// Available stock is never negative and equals intake minus sold
        /// while sales stay within stock
        #[test]
        fn prop_stock_accounting(
            intakes in prop::collection::vec(1.0f64..50.0, 1..5),
            sold_fraction in 0.0f64..0.95
        ) {
            let ctx = setup();
            let product = seed_product(&ctx.store, "Kion Primera", 20.0);

            let mut total_javas = 0.0;
            for javas in &intakes {
                receive(&ctx, &product, *javas, 50.0);
                total_javas += javas;
            }

            let available_kg = ctx.stock.product_stock(product.id).unwrap().stock_disponible_kg();
            let sell_kg = available_kg * sold_fraction;
            if sell_kg > 0.0 {
                sell(&ctx, &product, sell_kg);
            }

            let stock = ctx.stock.product_stock(product.id).unwrap();
            prop_assert!(stock.stock_disponible_kg() >= 0.0);
            prop_assert!(stock.stock_disponible_javas() >= 0.0);

            let expected_javas = total_javas - sell_kg / 20.0;
            prop_assert!((stock.stock_disponible_javas() - expected_javas).abs() <= 1e-6 * total_javas.max(1.0));
        }

        /// Weighted average cost lies between the cheapest and the most
        /// expensive intake
        #[test]
        fn prop_average_cost_bounded(
            lotes in prop::collection::vec((1.0f64..50.0, 10.0f64..100.0), 2..6)
        ) {
            let ctx = setup();
            let product = seed_product(&ctx.store, "Kion Primera", 20.0);

            for (javas, cost) in &lotes {
                receive(&ctx, &product, *javas, *cost);
            }

            let min_cost = lotes.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min);
            let max_cost = lotes.iter().map(|(_, c)| *c).fold(f64::NEG_INFINITY, f64::max);
            let avg = ctx.stock.costo_promedio(product.id).unwrap();

            prop_assert!(avg >= min_cost - 1e-9);
            prop_assert!(avg <= max_cost + 1e-9);
        }
    }
}
