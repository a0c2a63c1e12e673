//! Reporting service for sales, profit and dashboard figures
//!
//! All date bucketing happens in the configured business timezone, not in
//! UTC, so a late-evening sale lands on the day the shop actually made it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use shared::models::VentaType;
use shared::types::DateRange;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::stock::StockService;
use crate::store::Store;

/// Revenue for one business-local day
#[derive(Debug, Clone, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub venta_count: u64,
    pub revenue: Decimal,
}

/// Sales summary over a date range
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub range: DateRange,
    pub venta_count: u64,
    pub total_revenue: Decimal,
    pub caja_revenue: Decimal,
    pub pedido_revenue: Decimal,
    pub total_kg: f64,
    pub total_javas: f64,
    pub daily: Vec<DailySales>,
    pub currency: String,
}

/// Profit over a date range: revenue against cost of goods at the
/// weighted average intake cost
#[derive(Debug, Clone, Serialize)]
pub struct ProfitReport {
    pub range: DateRange,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub profit: Decimal,
    /// Absent when there was no revenue in the range
    pub margin_percent: Option<Decimal>,
    pub currency: String,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub product_count: u64,
    pub total_stock_kg: f64,
    pub total_stock_javas: f64,
    pub outstanding_debt: Decimal,
    pub debtor_count: u64,
    pub today_venta_count: u64,
    pub today_revenue: Decimal,
    pub currency: String,
}

/// Read-only reports over the movement history
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<dyn Store>,
    stock: StockService,
    offset: FixedOffset,
    currency: String,
}

impl ReportingService {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        let stock = StockService::new(Arc::clone(&store));
        Self {
            store,
            stock,
            offset: config.utc_offset(),
            currency: config.currency.clone(),
        }
    }

    fn local_date(&self, date: DateTime<Utc>) -> NaiveDate {
        date.with_timezone(&self.offset).date_naive()
    }

    /// Aggregate sales over a range, split by channel and bucketed by day
    pub fn sales_summary(&self, range: DateRange) -> AppResult<SalesSummary> {
        let mut venta_count = 0u64;
        let mut total_revenue = Decimal::ZERO;
        let mut caja_revenue = Decimal::ZERO;
        let mut pedido_revenue = Decimal::ZERO;
        let mut total_kg = 0.0f64;
        let mut total_javas = 0.0f64;
        let mut daily: BTreeMap<NaiveDate, (u64, Decimal)> = BTreeMap::new();

        for venta in self.store.ventas()? {
            let date = self.local_date(venta.date);
            if !range.contains(date) {
                continue;
            }

            venta_count += 1;
            total_revenue += venta.total_amount;
            match venta.venta_type {
                VentaType::Caja => caja_revenue += venta.total_amount,
                VentaType::Pedido => pedido_revenue += venta.total_amount,
            }
            for item in &venta.items {
                total_kg += item.quantity_kg;
                total_javas += item.quantity_javas;
            }

            let bucket = daily.entry(date).or_insert((0, Decimal::ZERO));
            bucket.0 += 1;
            bucket.1 += venta.total_amount;
        }

        Ok(SalesSummary {
            range,
            venta_count,
            total_revenue,
            caja_revenue,
            pedido_revenue,
            total_kg,
            total_javas,
            daily: daily
                .into_iter()
                .map(|(date, (venta_count, revenue))| DailySales {
                    date,
                    venta_count,
                    revenue,
                })
                .collect(),
            currency: self.currency.clone(),
        })
    }

    /// Profit over a range. Cost of goods is each sold java at the
    /// product's current weighted average intake cost.
    pub fn profit_report(&self, range: DateRange) -> AppResult<ProfitReport> {
        let stock_map = self.stock.stock_by_product()?;

        let mut total_revenue = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;

        for venta in self.store.ventas()? {
            if !range.contains(self.local_date(venta.date)) {
                continue;
            }

            total_revenue += venta.total_amount;
            for item in &venta.items {
                let costo_promedio = stock_map
                    .get(&item.product_id)
                    .map(|s| s.costo_promedio_java)
                    .unwrap_or(0.0);
                let cost = item.quantity_javas * costo_promedio;
                total_cost += Decimal::from_f64(cost).unwrap_or(Decimal::ZERO);
            }
        }

        let profit = total_revenue - total_cost;
        let margin_percent = if total_revenue > Decimal::ZERO {
            Some(profit / total_revenue * Decimal::from(100))
        } else {
            None
        };

        tracing::debug!(
            revenue = %total_revenue,
            cost = %total_cost,
            profit = %profit,
            "calculated profit report"
        );

        Ok(ProfitReport {
            range,
            total_revenue,
            total_cost,
            profit,
            margin_percent,
            currency: self.currency.clone(),
        })
    }

    /// Headline figures: catalog size, stock on hand, debt, today's sales
    pub fn dashboard(&self) -> AppResult<DashboardMetrics> {
        let stock_map = self.stock.stock_by_product()?;
        let total_stock_kg = stock_map.values().map(|s| s.stock_disponible_kg()).sum();
        let total_stock_javas = stock_map
            .values()
            .map(|s| s.stock_disponible_javas())
            .sum();

        let mut outstanding_debt = Decimal::ZERO;
        let mut debtor_count = 0u64;
        for client in self.store.clients()? {
            if client.current_debt > Decimal::ZERO {
                outstanding_debt += client.current_debt;
                debtor_count += 1;
            }
        }

        let today = self.local_date(Utc::now());
        let mut today_venta_count = 0u64;
        let mut today_revenue = Decimal::ZERO;
        for venta in self.store.ventas()? {
            if self.local_date(venta.date) == today {
                today_venta_count += 1;
                today_revenue += venta.total_amount;
            }
        }

        Ok(DashboardMetrics {
            product_count: stock_map.len() as u64,
            total_stock_kg,
            total_stock_javas,
            outstanding_debt,
            debtor_count,
            today_venta_count,
            today_revenue,
            currency: self.currency.clone(),
        })
    }
}
