//! CSV file implementations of the store traits.
//!
//! This is the primary storage backend. The items table is rewritten in
//! full on every save and delete; the sales ledger is only ever appended to.
//! A per-store mutex makes each load-modify-write a single critical section
//! within the process. Cross-process writers are not coordinated.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use partshop_core::StockItem;
use tracing::{debug, info, info_span, Span};

use crate::codec::{self, Row};
use crate::error::{Result, StoreError};
use crate::sales::{SaleRecord, SalesLedger};
use crate::schema::{self, ITEM_HEADER, SALES_HEADER};
use crate::traits::{remove_rows, upsert_row, ItemStore, SaveOutcome};

/// File-backed stock table.
pub struct CsvItemStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    span: Span,
}

impl CsvItemStore {
    /// Open the table at `path`, creating it with a header if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let span = info_span!("item_store", path = %path.display());
        let store = Self {
            path,
            write_lock: Mutex::new(()),
            span,
        };
        store.ensure_exists()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Read the raw rows, recreating the table if it has gone missing.
    fn read_rows(&self) -> Result<Vec<Row>> {
        if schema::ensure_table(&self.path, &ITEM_HEADER)? {
            return Ok(Vec::new());
        }
        let rows = schema::read_table(&self.path, &ITEM_HEADER)?;
        debug!(rows = rows.len(), "loaded item rows");
        Ok(rows)
    }
}

impl ItemStore for CsvItemStore {
    fn ensure_exists(&self) -> Result<bool> {
        let _enter = self.span.enter();
        schema::ensure_table(&self.path, &ITEM_HEADER)
    }

    fn load_all(&self) -> Result<Vec<Row>> {
        let _enter = self.span.enter();
        self.read_rows()
    }

    fn save_item(&self, item: &StockItem) -> Result<SaveOutcome> {
        let _enter = self.span.enter();
        let _guard = self.lock()?;

        let mut rows = self.read_rows()?;
        let outcome = upsert_row(&mut rows, codec::encode(item));
        schema::write_table_atomic(&self.path, &ITEM_HEADER, &rows)?;

        match outcome {
            SaveOutcome::Updated => info!(stock_code = %item.stock_code(), "updated existing item"),
            SaveOutcome::Inserted => info!(stock_code = %item.stock_code(), "added new item"),
        }
        Ok(outcome)
    }

    fn delete_item(&self, stock_code: &str) -> Result<bool> {
        let _enter = self.span.enter();
        let _guard = self.lock()?;

        let mut rows = self.read_rows()?;
        if !remove_rows(&mut rows, stock_code) {
            info!(stock_code, "item not found for deletion");
            return Ok(false);
        }
        schema::write_table_atomic(&self.path, &ITEM_HEADER, &rows)?;

        info!(stock_code, "deleted item");
        Ok(true)
    }
}

/// File-backed, append-only sales ledger.
pub struct CsvSalesLedger {
    path: PathBuf,
    append_lock: Mutex<()>,
    span: Span,
}

impl CsvSalesLedger {
    /// Open the ledger at `path`, creating it with a header if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let span = info_span!("sales_ledger", path = %path.display());
        {
            let _enter = span.enter();
            schema::ensure_table(&path, &SALES_HEADER)?;
        }
        Ok(Self {
            path,
            append_lock: Mutex::new(()),
            span,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SalesLedger for CsvSalesLedger {
    fn record_sale_on(
        &self,
        date: NaiveDate,
        stock_code: &str,
        quantity: u32,
        price: f64,
        brand: &str,
    ) -> Result<SaleRecord> {
        let _enter = self.span.enter();
        let _guard = self.append_lock.lock().map_err(|_| StoreError::Poisoned)?;

        schema::ensure_table(&self.path, &SALES_HEADER)?;
        let record = SaleRecord::new(date, stock_code, quantity, price, brand);

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(&record)?;
        writer.flush()?;

        info!(stock_code, quantity, revenue = record.revenue, "recorded sale");
        Ok(record)
    }

    fn records(&self) -> Result<Vec<SaleRecord>> {
        let _enter = self.span.enter();

        if schema::ensure_table(&self.path, &SALES_HEADER)? {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for (index, result) in reader.deserialize::<SaleRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) if e.is_io_error() => return Err(StoreError::Table(e)),
                Err(e) => {
                    let line = e
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(index as u64 + 2);
                    return Err(StoreError::CorruptLedger {
                        line,
                        reason: e.to_string(),
                    });
                }
            }
        }
        debug!(records = records.len(), "loaded sales ledger");
        Ok(records)
    }
}

/// Whether `file` is empty or its last byte is a newline.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
