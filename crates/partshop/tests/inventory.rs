//! End-to-end inventory behaviour against tables on disk.

use chrono::NaiveDate;
use partshop::store::{ItemStore, SalesLedger};
use partshop::{Inventory, InventoryConfig, ItemUpdate, NewStock, SaleOutcome, Upsert};
use partshop_testkit::{sample_items, TempTables};

const HEADER: &str = "item_type,stock_code,quantity,price,brand\n";

fn nav(code: &str, quantity: u32, price: f64, brand: &str) -> NewStock {
    NewStock {
        stock_code: code.into(),
        quantity,
        price,
        brand: brand.into(),
    }
}

fn codes<S: ItemStore, L: SalesLedger>(inventory: &Inventory<S, L>) -> Vec<String> {
    inventory
        .list()
        .unwrap()
        .iter()
        .map(|item| item.stock_code().to_string())
        .collect()
}

#[test]
fn open_creates_both_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = InventoryConfig::with_data_dir(dir.path().join("data"));

    let inventory = Inventory::open(&config).unwrap();

    assert!(config.items_path.exists());
    assert!(config.sales_path.exists());
    assert!(inventory.list().unwrap().is_empty());
    assert_eq!(inventory.sales_summary().unwrap().transactions, 0);
}

#[test]
fn restock_replaces_row_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = Inventory::open(&InventoryConfig::with_data_dir(dir.path())).unwrap();

    inventory.add_or_restock(nav("A", 1, 10.0, "TomTom")).unwrap();
    inventory.add_or_restock(nav("B", 1, 20.0, "Garmin")).unwrap();
    let (outcome, _) = inventory.add_or_restock(nav("A", 4, 12.5, "TomTom")).unwrap();

    assert_eq!(outcome, Upsert::Restocked);
    assert_eq!(codes(&inventory), ["A", "B"]);

    let a = inventory.get("A").unwrap();
    assert_eq!(a.quantity(), 5);
    assert_eq!(a.price(), 12.5);
}

#[test]
fn state_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = InventoryConfig::with_data_dir(dir.path());

    {
        let inventory = Inventory::open(&config).unwrap();
        inventory.add_or_restock(nav("NS101", 10, 199.99, "TomTom")).unwrap();
        inventory.sell("NS101", 4).unwrap();
    }

    let inventory = Inventory::open(&config).unwrap();
    let item = inventory.get("NS101").unwrap();
    assert_eq!(item.quantity(), 6);
    assert_eq!(item.brand(), Some("TomTom"));
    assert_eq!(inventory.sales_summary().unwrap().units_sold, 4);
}

#[test]
fn delete_only_touches_its_row() {
    let tables = TempTables::new();
    tables.seed(&sample_items());
    let inventory = Inventory::new(tables.items, tables.ledger);

    assert!(inventory.delete("NS102").unwrap());
    assert!(!inventory.delete("NS102").unwrap());
    assert_eq!(codes(&inventory), ["NS101", "NS103", "GEN001"]);
}

#[test]
fn malformed_rows_are_skipped_and_kept() {
    let tables = TempTables::new();
    tables.write_raw_items(&format!(
        "{HEADER}NavSys,NS101,10,199.99,TomTom\n\
         NavSys,BAD1,lots,199.99,TomTom\n\
         NavSys,NS102,5,149.5,Garmin\n"
    ));
    let raw_before = tables.read_raw_items();
    let items_path = tables.path().join(TempTables::ITEMS_FILE);
    let inventory = Inventory::new(tables.items, tables.ledger);

    assert_eq!(codes(&inventory), ["NS101", "NS102"]);
    assert!(inventory.get("BAD1").unwrap_err().is_not_found());

    inventory
        .update(
            "NS101",
            ItemUpdate {
                price: Some(189.99),
                ..ItemUpdate::default()
            },
        )
        .unwrap();

    let raw_after = std::fs::read_to_string(&items_path).unwrap();
    assert_ne!(raw_before, raw_after);
    assert!(raw_after.contains("NavSys,BAD1,lots,199.99,TomTom"));
    assert!(raw_after.contains("NavSys,NS101,10,189.99,TomTom"));
}

#[test]
fn brands_with_delimiters_survive_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = InventoryConfig::with_data_dir(dir.path());
    let brand = "Navman, \"Pro\" Edition";

    Inventory::open(&config)
        .unwrap()
        .add_or_restock(nav("NS101", 3, 99.0, brand))
        .unwrap();

    let inventory = Inventory::open(&config).unwrap();
    assert_eq!(inventory.get("NS101").unwrap().brand(), Some(brand));
}

#[test]
fn sale_flow_updates_stock_and_ledger() {
    let tables = TempTables::new();
    tables.seed(&sample_items());
    let inventory = Inventory::new(tables.items, tables.ledger);

    let outcome = inventory.sell("NS101", 10).unwrap();
    let SaleOutcome::Sold { item, sale } = outcome else {
        panic!("expected a sale, got {outcome:?}");
    };
    assert_eq!(item.quantity(), 0);
    assert_eq!(sale.brand, "TomTom");

    assert_eq!(
        inventory.sell("NS101", 1).unwrap(),
        SaleOutcome::Insufficient { available: 0 }
    );

    let summary = inventory.sales_summary().unwrap();
    assert_eq!(summary.transactions, 1);
    assert_eq!(summary.units_sold, 10);
    assert!((summary.revenue - 1999.9).abs() < 1e-6);

    let export = inventory.export_sales().unwrap();
    assert_eq!(export.len(), 2);
    assert_eq!(export[1][1], "NS101");
}

#[test]
fn history_groups_by_day_and_brand() {
    let tables = TempTables::new();
    let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();

    tables.ledger.record_sale_on(day(1), "NS101", 1, 100.0, "TomTom").unwrap();
    tables.ledger.record_sale_on(day(1), "NS102", 2, 50.0, "Garmin").unwrap();
    tables.ledger.record_sale_on(day(2), "NS101", 1, 100.0, "TomTom").unwrap();

    let inventory = Inventory::new(tables.items, tables.ledger);
    let history = inventory.sales_history().unwrap();

    assert_eq!(history.daily.len(), 2);
    assert_eq!(history.daily[0].date, day(1));
    assert_eq!(history.daily[0].sales, 3);
    assert_eq!(history.daily[0].revenue, 200.0);

    let brands: Vec<_> = history.by_brand.iter().map(|b| b.brand.as_str()).collect();
    assert_eq!(brands, ["TomTom", "Garmin"]);
    assert_eq!(history.by_brand[0].revenue, 200.0);
}

#[test]
fn failed_sale_record_leaves_stock_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = InventoryConfig::with_data_dir(dir.path());
    let inventory = Inventory::open(&config).unwrap();
    inventory.add_or_restock(nav("NS1", 10, 50.0, "TomTom")).unwrap();

    std::fs::remove_file(&config.sales_path).unwrap();
    std::fs::create_dir(&config.sales_path).unwrap();

    let err = inventory.sell("NS1", 4).unwrap_err();
    assert!(err.is_server_fault());
    assert_eq!(inventory.get("NS1").unwrap().quantity(), 10);
}

#[test]
fn unreadable_item_table_is_a_server_fault() {
    let dir = tempfile::tempdir().unwrap();
    let config = InventoryConfig::with_data_dir(dir.path());
    let inventory = Inventory::open(&config).unwrap();

    std::fs::remove_file(&config.items_path).unwrap();
    std::fs::create_dir(&config.items_path).unwrap();

    let err = inventory.list().unwrap_err();
    assert!(err.is_server_fault());
    assert!(!err.is_rejection());

    let err = inventory.add_or_restock(nav("NS1", 1, 1.0, "TomTom")).unwrap_err();
    assert!(err.is_server_fault());
}

#[test]
fn non_utf8_row_does_not_block_the_table() {
    let tables = TempTables::new();
    let mut contents = HEADER.as_bytes().to_vec();
    contents.extend_from_slice(b"NavSys,A,10,199.99,TomTom\n");
    contents.extend_from_slice(b"NavSys,B,5,149.5,Gar\xff\xfemin\n");
    contents.extend_from_slice(b"NavSys,C,1,9.5,Garmin\n");
    std::fs::write(tables.items_path(), &contents).unwrap();
    let inventory = Inventory::new(tables.items, tables.ledger);

    assert_eq!(codes(&inventory), ["A", "C"]);
    assert!(matches!(inventory.sell("C", 1).unwrap(), SaleOutcome::Sold { .. }));
    assert!(inventory.delete("A").unwrap());
    assert_eq!(codes(&inventory), ["C"]);
    assert_eq!(inventory.store().count().unwrap(), 2);
}
