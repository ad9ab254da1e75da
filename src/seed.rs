//! Demo seed data. The store may start empty; these values only back the
//! demo binary and tests.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::models::{InventoryItem, Transaction, TransactionType};
use crate::store::EntityStore;

pub fn initial_categories() -> Vec<String> {
    ["電子產品", "家具", "服飾", "食品", "工具", "其他"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn initial_warehouses() -> Vec<String> {
    vec!["P2 倉".to_string(), "P3 倉".to_string()]
}

pub fn initial_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: "1".into(),
            name: "MacBook Pro 14".into(),
            sku: "MBP-14-2023".into(),
            category: "電子產品".into(),
            quantity: 45,
            min_threshold: 10,
            price: dec!(59000),
            warehouse: "P2 倉".into(),
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
        },
        InventoryItem {
            id: "2".into(),
            name: "Ergonomic Chair".into(),
            sku: "CH-ERG-01".into(),
            category: "家具".into(),
            quantity: 8,
            min_threshold: 15,
            price: dec!(4500),
            warehouse: "P3 倉".into(),
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 24).unwrap(),
        },
        InventoryItem {
            id: "3".into(),
            name: "USB-C Cable 2m".into(),
            sku: "ACC-USBC-02".into(),
            category: "電子產品".into(),
            quantity: 200,
            min_threshold: 50,
            price: dec!(390),
            warehouse: "P2 倉".into(),
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 26).unwrap(),
        },
    ]
}

pub fn initial_transactions() -> Vec<Transaction> {
    vec![Transaction {
        id: "TX-MAINT-001".into(),
        item_id: "1".into(),
        item_name: "MacBook Pro 14 [MBP-14-2023]".into(),
        kind: TransactionType::Out,
        label: Some("維修撥出".into()),
        quantity: 2,
        price_at_time: dec!(59000),
        date: Transaction::now_display(),
        operator: "系統管理員".into(),
    }]
}

/// A store pre-loaded with the demo dataset. Staff stays empty so the
/// first-run bootstrap path is exercised.
pub async fn demo_store() -> Arc<EntityStore> {
    let store = EntityStore::new();
    store.replace_items(initial_inventory()).await;
    store.replace_transactions(initial_transactions()).await;
    store.replace_categories(initial_categories()).await;
    store.replace_warehouses(initial_warehouses()).await;
    store
}
