//! Pure derivations over store snapshots: filtering, bucketing, pagination
//! and dashboard aggregates. Nothing here mutates state.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{InventoryItem, Transaction};

/// Sentinel meaning "no filter" for category/warehouse selectors.
pub const ALL: &str = "ALL";

/// The all-transactions bucket label; short-circuits bucket filtering.
pub const ALL_TRANSACTIONS: &str = "全部";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct InventoryFilter {
    pub search: String,
    pub category: Option<String>,
    pub warehouse: Option<String>,
    pub low_stock_only: bool,
}

/// Case-insensitive substring search over name/SKU, plus exact-match
/// category/warehouse filters and the derived low-stock condition.
pub fn filter_items<'a>(items: &'a [InventoryItem], filter: &InventoryFilter) -> Vec<&'a InventoryItem> {
    let term = filter.search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let matches_search = term.is_empty()
                || item.name.to_lowercase().contains(&term)
                || item.sku.to_lowercase().contains(&term);
            let matches_category = match filter.category.as_deref() {
                None | Some(ALL) => true,
                Some(c) => item.category == c,
            };
            let matches_warehouse = match filter.warehouse.as_deref() {
                None | Some(ALL) => true,
                Some(w) => item.warehouse == w,
            };
            let matches_low_stock = !filter.low_stock_only || item.is_low_stock();
            matches_search && matches_category && matches_warehouse && matches_low_stock
        })
        .collect()
}

/// A named transaction bucket matched by label keywords. Buckets are not
/// mutually exclusive; each is tested independently against the label.
#[derive(Clone, Copy, Debug)]
pub struct TxBucket {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// The fixed, ordered bucket list driving audit-log filtering.
pub const TX_BUCKETS: &[TxBucket] = &[
    TxBucket {
        label: ALL_TRANSACTIONS,
        keywords: &[],
    },
    TxBucket {
        label: "進貨錄入",
        keywords: &["錄入", "入庫"],
    },
    TxBucket {
        label: "領料出庫",
        keywords: &["領料出庫", "領料"],
    },
    TxBucket {
        label: "維修保養",
        keywords: &["維修", "保養", "送修", "返修"],
    },
    TxBucket {
        label: "移倉調撥",
        keywords: &["移倉", "移撥"],
    },
    TxBucket {
        label: "異常調整",
        keywords: &["盤點修正", "調整", "快調", "更新"],
    },
    TxBucket {
        label: "系統刪除",
        keywords: &["刪除"],
    },
];

/// Keeps transactions whose label contains any keyword of the named bucket.
/// The `全部` bucket (or an unknown bucket name) disables filtering.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    bucket_label: &str,
) -> Vec<&'a Transaction> {
    if bucket_label == ALL_TRANSACTIONS {
        return transactions.iter().collect();
    }
    let Some(bucket) = TX_BUCKETS.iter().find(|b| b.label == bucket_label) else {
        return transactions.iter().collect();
    };
    transactions
        .iter()
        .filter(|t| {
            let label = t.label.as_deref().unwrap_or("");
            bucket.keywords.iter().any(|kw| label.contains(kw))
        })
        .collect()
}

/// One page of a filtered result set, 1-indexed.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub entries: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
}

/// Fixed-size pagination. Page numbers below 1 are treated as 1; pages past
/// the end come back empty rather than erroring.
pub fn paginate<T: Clone>(entries: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(per_page);
    let start = (page - 1) * per_page;
    let slice = if start >= total_entries {
        &entries[0..0]
    } else {
        &entries[start..(start + per_page).min(total_entries)]
    };
    Page {
        entries: slice.to_vec(),
        page,
        total_pages,
        total_entries,
    }
}

/// Aggregates rendered on the dashboard, recomputed per read.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub total_value: Decimal,
    pub low_stock_count: usize,
    /// (name, stock value), sorted by value descending.
    pub value_by_category: Vec<(String, Decimal)>,
    pub value_by_warehouse: Vec<(String, Decimal)>,
}

pub fn dashboard_stats(items: &[InventoryItem]) -> DashboardStats {
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();
    let mut by_warehouse: HashMap<&str, Decimal> = HashMap::new();
    let mut total_value = Decimal::ZERO;
    for item in items {
        let value = item.stock_value();
        total_value += value;
        *by_category.entry(item.category.as_str()).or_default() += value;
        *by_warehouse.entry(item.warehouse.as_str()).or_default() += value;
    }

    let mut value_by_category: Vec<(String, Decimal)> = by_category
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    value_by_category.sort_by(|a, b| b.1.cmp(&a.1));
    let mut value_by_warehouse: Vec<(String, Decimal)> = by_warehouse
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    value_by_warehouse.sort_by(|a, b| b.1.cmp(&a.1));

    DashboardStats {
        total_items: items.len(),
        total_value,
        low_stock_count: items.iter().filter(|i| i.is_low_stock()).count(),
        value_by_category,
        value_by_warehouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(id: &str, name: &str, sku: &str, category: &str, warehouse: &str, qty: i64) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            quantity: qty,
            min_threshold: 10,
            price: dec!(100),
            warehouse: warehouse.into(),
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
        }
    }

    fn fixture() -> Vec<InventoryItem> {
        vec![
            item("1", "MacBook Pro 14", "MBP-14-2023", "電子產品", "P2 倉", 45),
            item("2", "Ergonomic Chair", "CH-ERG-01", "家具", "P3 倉", 8),
            item("3", "USB-C Cable 2m", "ACC-USBC-02", "電子產品", "P2 倉", 200),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_sku() {
        let items = fixture();
        let hits = filter_items(
            &items,
            &InventoryFilter {
                search: "usbc".into(),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");

        let hits = filter_items(
            &items,
            &InventoryFilter {
                search: "macbook".into(),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn all_sentinel_disables_category_and_warehouse_filters() {
        let items = fixture();
        let hits = filter_items(
            &items,
            &InventoryFilter {
                category: Some(ALL.into()),
                warehouse: Some("P3 倉".into()),
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn low_stock_filter_uses_strict_threshold() {
        let items = fixture();
        let hits = filter_items(
            &items,
            &InventoryFilter {
                low_stock_only: true,
                ..Default::default()
            },
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn pagination_is_one_indexed_and_tolerates_overflow() {
        let entries: Vec<i32> = (0..30).collect();
        let page = paginate(&entries, 1, 12);
        assert_eq!(page.entries.len(), 12);
        assert_eq!(page.total_pages, 3);
        let page = paginate(&entries, 3, 12);
        assert_eq!(page.entries.len(), 6);
        let page = paginate(&entries, 9, 12);
        assert!(page.entries.is_empty());
        assert_eq!(page.total_entries, 30);
    }

    #[test]
    fn transaction_buckets_match_by_keyword_substring() {
        let tx = |label: &str| Transaction {
            id: "TX-1".into(),
            item_id: "1".into(),
            item_name: "x".into(),
            kind: crate::models::TransactionType::In,
            label: Some(label.into()),
            quantity: 1,
            price_at_time: dec!(0),
            date: "2023/10/26 10:00:00".into(),
            operator: "系統".into(),
        };
        let log = vec![
            tx("初始入庫"),
            tx("領料出庫 [機台: A-07]"),
            tx("維修撥出"),
            tx("批次刪除"),
        ];
        assert_eq!(filter_transactions(&log, "全部").len(), 4);
        assert_eq!(filter_transactions(&log, "進貨錄入").len(), 1);
        assert_eq!(filter_transactions(&log, "領料出庫").len(), 1);
        assert_eq!(filter_transactions(&log, "維修保養").len(), 1);
        assert_eq!(filter_transactions(&log, "系統刪除").len(), 1);
    }

    #[test]
    fn dashboard_stats_aggregate_value_per_dimension() {
        let stats = dashboard_stats(&fixture());
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.total_value, dec!(25300));
        assert_eq!(stats.value_by_category[0].0, "電子產品");
        assert_eq!(stats.value_by_category[0].1, dec!(24500));
    }
}
