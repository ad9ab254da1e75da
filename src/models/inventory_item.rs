use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stock record: one SKU in one warehouse.
///
/// `sku` is not globally unique; uniqueness is only meaningful as the pair
/// `(sku, warehouse)`, and only during merge-style operations. `id` is the
/// stable identity across the store's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub min_threshold: i64,
    pub price: Decimal,
    pub warehouse: String,
    pub last_updated: NaiveDate,
}

impl InventoryItem {
    /// Low stock is derived on every read, never stored.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_threshold
    }

    /// Total value carried by this record.
    pub fn stock_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn touch(&mut self) {
        self.last_updated = Local::now().date_naive();
    }
}

/// Partial update applied by the batch field-update operation. `None` fields
/// are left untouched; the audit label names the fields that were set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub min_threshold: Option<i64>,
    pub price: Option<Decimal>,
    pub warehouse: Option<String>,
}

impl InventoryItemPatch {
    /// Names of the fields this patch sets, in declaration order, using the
    /// wire-format names the audit log has always carried.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.sku.is_some() {
            fields.push("sku");
        }
        if self.category.is_some() {
            fields.push("category");
        }
        if self.quantity.is_some() {
            fields.push("quantity");
        }
        if self.min_threshold.is_some() {
            fields.push("minThreshold");
        }
        if self.price.is_some() {
            fields.push("price");
        }
        if self.warehouse.is_some() {
            fields.push("warehouse");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Merges the set fields into `item`. Quantity clamps at zero.
    pub fn apply(&self, item: &mut InventoryItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            item.sku = sku.clone();
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity.max(0);
        }
        if let Some(min_threshold) = self.min_threshold {
            item.min_threshold = min_threshold;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(warehouse) = &self.warehouse {
            item.warehouse = warehouse.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item() -> InventoryItem {
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
        }
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        let mut it = item();
        it.quantity = 10;
        assert!(!it.is_low_stock());
        it.quantity = 9;
        assert!(it.is_low_stock());
    }

    #[test]
    fn patch_reports_changed_fields_in_order() {
        let patch = InventoryItemPatch {
            warehouse: Some("P3 倉".into()),
            price: Some(dec!(100)),
            ..Default::default()
        };
        assert_eq!(patch.changed_fields(), vec!["price", "warehouse"]);
    }

    #[test]
    fn patch_quantity_clamps_at_zero() {
        let mut it = item();
        let patch = InventoryItemPatch {
            quantity: Some(-5),
            ..Default::default()
        };
        patch.apply(&mut it);
        assert_eq!(it.quantity, 0);
    }
}
