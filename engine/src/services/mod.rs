//! Business logic services for the Agroinversiones Beto engine

pub mod client;
pub mod ingreso;
pub mod inventory;
pub mod product;
pub mod reporting;
pub mod stock;
pub mod venta;

pub use client::ClientService;
pub use ingreso::IngresoService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use stock::StockService;
pub use venta::VentaService;
