//! Sales ledger: the append-only record of completed sales.
//!
//! Records are never rewritten or removed. Reports are pure reductions over
//! a full read of the ledger.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One completed sale. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub stock_code: String,
    pub quantity: u32,
    pub price: f64,
    pub brand: String,
    pub revenue: f64,
}

impl SaleRecord {
    /// Build a record, deriving `revenue = quantity * price`.
    pub fn new(
        date: NaiveDate,
        stock_code: impl Into<String>,
        quantity: u32,
        price: f64,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            date,
            stock_code: stock_code.into(),
            quantity,
            price,
            brand: brand.into(),
            revenue: f64::from(quantity) * price,
        }
    }
}

/// Units and revenue for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: u64,
    pub revenue: f64,
}

/// Units and revenue for one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSales {
    pub brand: String,
    pub sales: u64,
    pub revenue: f64,
}

/// Sales grouped by day and by brand, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesHistory {
    pub daily: Vec<DailySales>,
    pub by_brand: Vec<BrandSales>,
}

impl SalesHistory {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let mut history = Self::default();
        let mut day_index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut brand_index: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let day = *day_index.entry(record.date).or_insert_with(|| {
                history.daily.push(DailySales {
                    date: record.date,
                    sales: 0,
                    revenue: 0.0,
                });
                history.daily.len() - 1
            });
            history.daily[day].sales += u64::from(record.quantity);
            history.daily[day].revenue += record.revenue;

            let brand = *brand_index.entry(&record.brand).or_insert_with(|| {
                history.by_brand.push(BrandSales {
                    brand: record.brand.clone(),
                    sales: 0,
                    revenue: 0.0,
                });
                history.by_brand.len() - 1
            });
            history.by_brand[brand].sales += u64::from(record.quantity);
            history.by_brand[brand].revenue += record.revenue;
        }

        history
    }
}

/// Ledger-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub transactions: usize,
    pub units_sold: u64,
    pub revenue: f64,
}

impl SalesSummary {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            acc.transactions += 1;
            acc.units_sold += u64::from(record.quantity);
            acc.revenue += record.revenue;
            acc
        })
    }
}

/// Header row of the export produced by [`export_rows`].
pub const EXPORT_HEADER: [&str; 6] = [
    "Date",
    "Stock Code",
    "Quantity",
    "Price",
    "Brand",
    "Total Revenue",
];

/// Render records for a spreadsheet export: header first, money as `$0.00`.
pub fn export_rows(records: &[SaleRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(EXPORT_HEADER.iter().map(|h| h.to_string()).collect());
    rows.extend(records.iter().map(|r| {
        vec![
            r.date.format("%Y-%m-%d").to_string(),
            r.stock_code.clone(),
            r.quantity.to_string(),
            format!("${:.2}", r.price),
            r.brand.clone(),
            format!("${:.2}", r.revenue),
        ]
    }));
    rows
}

/// The append-only sales ledger.
pub trait SalesLedger: Send + Sync {
    /// Append a sale dated `date`.
    fn record_sale_on(
        &self,
        date: NaiveDate,
        stock_code: &str,
        quantity: u32,
        price: f64,
        brand: &str,
    ) -> Result<SaleRecord>;

    /// Every recorded sale, oldest first.
    fn records(&self) -> Result<Vec<SaleRecord>>;

    /// Append a sale dated today (local time).
    fn record_sale(
        &self,
        stock_code: &str,
        quantity: u32,
        price: f64,
        brand: &str,
    ) -> Result<SaleRecord> {
        let today = chrono::Local::now().date_naive();
        self.record_sale_on(today, stock_code, quantity, price, brand)
    }

    fn history(&self) -> Result<SalesHistory> {
        Ok(SalesHistory::from_records(&self.records()?))
    }

    fn summary(&self) -> Result<SalesSummary> {
        Ok(SalesSummary::from_records(&self.records()?))
    }

    fn all_records_for_export(&self) -> Result<Vec<Vec<String>>> {
        Ok(export_rows(&self.records()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample() -> Vec<SaleRecord> {
        vec![
            SaleRecord::new(date(1), "NS101", 2, 199.99, "TomTom"),
            SaleRecord::new(date(1), "NS102", 1, 299.99, "Garmin"),
            SaleRecord::new(date(2), "NS101", 3, 10.0, "TomTom"),
        ]
    }

    #[test]
    fn test_revenue_is_quantity_times_price() {
        let record = SaleRecord::new(date(1), "NS101", 3, 10.5, "TomTom");
        assert_eq!(record.revenue, 31.5);
    }

    #[test]
    fn test_history_groups_in_first_seen_order() {
        let history = SalesHistory::from_records(&sample());

        assert_eq!(history.daily.len(), 2);
        assert_eq!(history.daily[0].date, date(1));
        assert_eq!(history.daily[0].sales, 3);
        assert!((history.daily[0].revenue - (2.0 * 199.99 + 299.99)).abs() < 1e-9);
        assert_eq!(history.daily[1].sales, 3);
        assert!((history.daily[1].revenue - 30.0).abs() < 1e-9);

        let brands: Vec<_> = history.by_brand.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(brands, ["TomTom", "Garmin"]);
        assert_eq!(history.by_brand[0].sales, 5);
        assert_eq!(history.by_brand[1].sales, 1);
    }

    #[test]
    fn test_history_of_nothing_is_empty() {
        assert_eq!(SalesHistory::from_records(&[]), SalesHistory::default());
    }

    #[test]
    fn test_summary() {
        let summary = SalesSummary::from_records(&sample());
        assert_eq!(summary.transactions, 3);
        assert_eq!(summary.units_sold, 6);
        assert!((summary.revenue - (399.98 + 299.99 + 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_export_rows() {
        let rows = export_rows(&sample());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][5], "Total Revenue");
        assert_eq!(
            rows[1],
            ["2024-03-01", "NS101", "2", "$199.99", "TomTom", "$399.98"]
        );
    }
}
