//! Storage boundary for the engine
//!
//! The engine never talks to a database directly. Everything it needs
//! from persistence is expressed by the [`Store`] trait; the services are
//! handed an implementation at construction time. [`MemoryStore`] is the
//! bundled implementation used by the test suite and by embedders that
//! have no external backend.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::anyhow;
use uuid::Uuid;

use shared::models::{
    Client, ClientPayment, IngresoLote, InventorySnapshot, Product, ProductQuality, ProductType,
    User, Venta,
};

use crate::error::AppResult;

/// Persistence boundary: product/stock queries on one side, sale and
/// intake submissions on the other. Implementations must be safe to share
/// across threads.
pub trait Store: Send + Sync {
    // Products and catalogs
    fn insert_product(&self, product: Product) -> AppResult<()>;
    fn update_product(&self, product: Product) -> AppResult<bool>;
    fn delete_product(&self, id: Uuid) -> AppResult<bool>;
    fn product(&self, id: Uuid) -> AppResult<Option<Product>>;
    fn products(&self) -> AppResult<Vec<Product>>;
    fn insert_product_type(&self, product_type: ProductType) -> AppResult<()>;
    fn product_types(&self) -> AppResult<Vec<ProductType>>;
    fn insert_product_quality(&self, quality: ProductQuality) -> AppResult<()>;
    fn product_qualities(&self) -> AppResult<Vec<ProductQuality>>;

    // Clients and payments
    fn insert_client(&self, client: Client) -> AppResult<()>;
    fn update_client(&self, client: Client) -> AppResult<bool>;
    fn client(&self, id: Uuid) -> AppResult<Option<Client>>;
    fn clients(&self) -> AppResult<Vec<Client>>;
    fn insert_payment(&self, payment: ClientPayment) -> AppResult<()>;
    fn payments_for_client(&self, client_id: Uuid) -> AppResult<Vec<ClientPayment>>;

    // Users
    fn insert_user(&self, user: User) -> AppResult<()>;
    fn user(&self, id: Uuid) -> AppResult<Option<User>>;

    // Ingresos
    fn insert_ingreso_lote(&self, lote: IngresoLote) -> AppResult<()>;
    fn ingreso_lote(&self, id: Uuid) -> AppResult<Option<IngresoLote>>;
    fn ingreso_lotes(&self) -> AppResult<Vec<IngresoLote>>;
    fn delete_ingreso_lote(&self, id: Uuid) -> AppResult<bool>;

    // Ventas
    fn insert_venta(&self, venta: Venta) -> AppResult<()>;
    fn update_venta(&self, venta: Venta) -> AppResult<bool>;
    fn venta(&self, id: Uuid) -> AppResult<Option<Venta>>;
    fn ventas(&self) -> AppResult<Vec<Venta>>;
    fn delete_venta(&self, id: Uuid) -> AppResult<bool>;

    // Inventory snapshots
    fn insert_snapshot(&self, snapshot: InventorySnapshot) -> AppResult<()>;
    fn snapshots(&self) -> AppResult<Vec<InventorySnapshot>>;
}

#[derive(Default)]
struct Inner {
    products: HashMap<Uuid, Product>,
    product_types: Vec<ProductType>,
    product_qualities: Vec<ProductQuality>,
    clients: HashMap<Uuid, Client>,
    payments: Vec<ClientPayment>,
    users: HashMap<Uuid, User>,
    ingreso_lotes: Vec<IngresoLote>,
    ventas: Vec<Venta>,
    snapshots: Vec<InventorySnapshot>,
}

/// In-memory store backed by a read/write lock
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned").into())
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned").into())
    }
}

impl Store for MemoryStore {
    fn insert_product(&self, product: Product) -> AppResult<()> {
        self.write()?.products.insert(product.id, product);
        Ok(())
    }

    fn update_product(&self, product: Product) -> AppResult<bool> {
        let mut inner = self.write()?;
        if inner.products.contains_key(&product.id) {
            inner.products.insert(product.id, product);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn delete_product(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.write()?.products.remove(&id).is_some())
    }

    fn product(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn products(&self) -> AppResult<Vec<Product>> {
        Ok(self.read()?.products.values().cloned().collect())
    }

    fn insert_product_type(&self, product_type: ProductType) -> AppResult<()> {
        self.write()?.product_types.push(product_type);
        Ok(())
    }

    fn product_types(&self) -> AppResult<Vec<ProductType>> {
        Ok(self.read()?.product_types.clone())
    }

    fn insert_product_quality(&self, quality: ProductQuality) -> AppResult<()> {
        self.write()?.product_qualities.push(quality);
        Ok(())
    }

    fn product_qualities(&self) -> AppResult<Vec<ProductQuality>> {
        Ok(self.read()?.product_qualities.clone())
    }

    fn insert_client(&self, client: Client) -> AppResult<()> {
        self.write()?.clients.insert(client.id, client);
        Ok(())
    }

    fn update_client(&self, client: Client) -> AppResult<bool> {
        let mut inner = self.write()?;
        if inner.clients.contains_key(&client.id) {
            inner.clients.insert(client.id, client);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn client(&self, id: Uuid) -> AppResult<Option<Client>> {
        Ok(self.read()?.clients.get(&id).cloned())
    }

    fn clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.read()?.clients.values().cloned().collect())
    }

    fn insert_payment(&self, payment: ClientPayment) -> AppResult<()> {
        self.write()?.payments.push(payment);
        Ok(())
    }

    fn payments_for_client(&self, client_id: Uuid) -> AppResult<Vec<ClientPayment>> {
        Ok(self
            .read()?
            .payments
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    fn insert_user(&self, user: User) -> AppResult<()> {
        self.write()?.users.insert(user.id, user);
        Ok(())
    }

    fn user(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn insert_ingreso_lote(&self, lote: IngresoLote) -> AppResult<()> {
        self.write()?.ingreso_lotes.push(lote);
        Ok(())
    }

    fn ingreso_lote(&self, id: Uuid) -> AppResult<Option<IngresoLote>> {
        Ok(self
            .read()?
            .ingreso_lotes
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    fn ingreso_lotes(&self) -> AppResult<Vec<IngresoLote>> {
        Ok(self.read()?.ingreso_lotes.clone())
    }

    fn delete_ingreso_lote(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.write()?;
        let before = inner.ingreso_lotes.len();
        inner.ingreso_lotes.retain(|l| l.id != id);
        Ok(inner.ingreso_lotes.len() < before)
    }

    fn insert_venta(&self, venta: Venta) -> AppResult<()> {
        self.write()?.ventas.push(venta);
        Ok(())
    }

    fn update_venta(&self, venta: Venta) -> AppResult<bool> {
        let mut inner = self.write()?;
        match inner.ventas.iter_mut().find(|v| v.id == venta.id) {
            Some(slot) => {
                *slot = venta;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn venta(&self, id: Uuid) -> AppResult<Option<Venta>> {
        Ok(self.read()?.ventas.iter().find(|v| v.id == id).cloned())
    }

    fn ventas(&self) -> AppResult<Vec<Venta>> {
        Ok(self.read()?.ventas.clone())
    }

    fn delete_venta(&self, id: Uuid) -> AppResult<bool> {
        let mut inner = self.write()?;
        let before = inner.ventas.len();
        inner.ventas.retain(|v| v.id != id);
        Ok(inner.ventas.len() < before)
    }

    fn insert_snapshot(&self, snapshot: InventorySnapshot) -> AppResult<()> {
        self.write()?.snapshots.push(snapshot);
        Ok(())
    }

    fn snapshots(&self) -> AppResult<Vec<InventorySnapshot>> {
        Ok(self.read()?.snapshots.clone())
    }
}
