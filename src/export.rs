//! Read-only CSV projection of the inventory snapshot. Never feeds back into
//! the core.

use crate::models::InventoryItem;

/// Fixed header order of the inventory report.
pub const EXPORT_HEADERS: [&str; 8] = [
    "品名",
    "SKU",
    "品類",
    "庫存量",
    "單價",
    "總資產金額",
    "存放倉區",
    "最後更新時間",
];

/// Renders the snapshot as CSV, one row per item, with a UTF-8 BOM so
/// spreadsheet tools pick up the encoding.
pub fn inventory_csv(items: &[InventoryItem]) -> String {
    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(format!("\u{feff}{}", EXPORT_HEADERS.join(",")));
    for item in items {
        let fields = [
            item.name.clone(),
            item.sku.clone(),
            item.category.clone(),
            item.quantity.to_string(),
            item.price.to_string(),
            item.stock_value().to_string(),
            item.warehouse.clone(),
            item.last_updated.to_string(),
        ];
        let quoted: Vec<String> = fields.iter().map(|f| quote(f)).collect();
        rows.push(quoted.join(","));
    }
    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\\\""))
}
