//! Walks through a short day at the shop against the configured tables and
//! prints the resulting stock and sales report as JSON.

use anyhow::Context;
use partshop::{
    Inventory, InventoryConfig, ItemUpdate, NewStock, SaleOutcome, SalesHistory, SalesSummary,
    StockRecord,
};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct Report {
    stock: Vec<StockRecord>,
    history: SalesHistory,
    summary: SalesSummary,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = InventoryConfig::from_env();
    let inventory = Inventory::open(&config).context("opening inventory")?;

    for (code, quantity, price, brand) in [
        ("NS101", 10, 199.99, "TomTom"),
        ("NS102", 25, 149.50, "Garmin"),
    ] {
        let (outcome, item) = inventory.add_or_restock(NewStock {
            stock_code: code.into(),
            quantity,
            price,
            brand: brand.into(),
        })?;
        info!(stock_code = code, ?outcome, quantity = item.quantity(), "stocked");
    }

    inventory.update(
        "NS102",
        ItemUpdate {
            price: Some(139.99),
            ..ItemUpdate::default()
        },
    )?;

    match inventory.sell("NS101", 3)? {
        SaleOutcome::Sold { sale, .. } => info!(revenue = sale.revenue, "sale recorded"),
        SaleOutcome::Insufficient { available } => warn!(available, "sale declined"),
    }

    if let Err(err) = inventory.update(
        "NS102",
        ItemUpdate {
            add_quantity: Some(100),
            ..ItemUpdate::default()
        },
    ) {
        warn!(%err, rejection = err.is_rejection(), "restock refused");
    }

    let report = Report {
        stock: inventory.records()?,
        history: inventory.sales_history()?,
        summary: inventory.sales_summary()?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
