use serde::{Deserialize, Serialize};

use super::inventory_item::InventoryItem;
use super::transaction::labels;

/// Inbound companion of a warehouse transfer: the outbound leg is the
/// primary upsert's quantity decrease, this drives the receiving side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferData {
    pub target_warehouse: String,
    pub quantity: i64,
}

/// The closed set of stock operations an operator can apply to an existing
/// item. Each variant maps exhaustively to a resulting quantity and a ledger
/// label, so direction and magnitude are derived, never guessed from text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum StockOperation {
    /// Edit the quantity field directly to `quantity`.
    Direct { quantity: i64 },
    /// Reset the quantity to a physical count.
    Fix { counted: i64 },
    /// Withdraw stock for production; optional machine number tag.
    Withdraw { quantity: i64, machine: Option<String> },
    /// Send stock out for repair or maintenance.
    Maintenance { quantity: i64, machine: Option<String> },
    /// Receive stock back from repair.
    Return { quantity: i64 },
    /// Additive correction.
    Adjust { quantity: i64 },
    /// Move stock to another warehouse; produces the inbound companion.
    Transfer {
        quantity: i64,
        target_warehouse: String,
    },
}

/// What a `StockOperation` resolves to against a concrete item.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOperation {
    pub final_quantity: i64,
    pub label: String,
    pub transfer: Option<TransferData>,
}

impl StockOperation {
    /// Computes the item's resulting quantity and the ledger label.
    /// Subtractive variants clamp at zero; the item never goes negative.
    pub fn resolve(&self, item: &InventoryItem) -> ResolvedOperation {
        match self {
            StockOperation::Direct { quantity } => ResolvedOperation {
                final_quantity: (*quantity).max(0),
                label: labels::STOCK_EDIT.to_string(),
                transfer: None,
            },
            StockOperation::Fix { counted } => ResolvedOperation {
                final_quantity: (*counted).max(0),
                label: labels::COUNT_FIX.to_string(),
                transfer: None,
            },
            StockOperation::Withdraw { quantity, machine } => ResolvedOperation {
                final_quantity: (item.quantity - quantity).max(0),
                label: labels::withdraw(machine.as_deref()),
                transfer: None,
            },
            StockOperation::Maintenance { quantity, machine } => ResolvedOperation {
                final_quantity: (item.quantity - quantity).max(0),
                label: labels::maintenance_out(machine.as_deref()),
                transfer: None,
            },
            StockOperation::Return { quantity } => ResolvedOperation {
                final_quantity: item.quantity + (*quantity).max(0),
                label: labels::RETURN_IN.to_string(),
                transfer: None,
            },
            StockOperation::Adjust { quantity } => ResolvedOperation {
                final_quantity: (item.quantity + quantity).max(0),
                label: labels::QTY_ADJUST.to_string(),
                transfer: None,
            },
            StockOperation::Transfer {
                quantity,
                target_warehouse,
            } => ResolvedOperation {
                final_quantity: (item.quantity - quantity).max(0),
                label: labels::transfer_out(&item.warehouse, target_warehouse),
                transfer: Some(TransferData {
                    target_warehouse: target_warehouse.clone(),
                    quantity: *quantity,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(quantity: i64) -> InventoryItem {
        InventoryItem {
            id: "1".into(),
            name: "USB-C Cable 2m".into(),
            sku: "ACC-USBC-02".into(),
            category: "電子產品".into(),
            quantity,
            min_threshold: 50,
            price: dec!(390),
            warehouse: "P2 倉".into(),
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 26).unwrap(),
        }
    }

    #[test]
    fn withdraw_clamps_at_zero() {
        let resolved = StockOperation::Withdraw {
            quantity: 500,
            machine: None,
        }
        .resolve(&item(200));
        assert_eq!(resolved.final_quantity, 0);
        assert_eq!(resolved.label, "領料出庫");
    }

    #[test]
    fn transfer_produces_inbound_companion() {
        let resolved = StockOperation::Transfer {
            quantity: 30,
            target_warehouse: "P3 倉".into(),
        }
        .resolve(&item(200));
        assert_eq!(resolved.final_quantity, 170);
        assert_eq!(resolved.label, "移倉撥出 (P2 倉 -> P3 倉)");
        assert_eq!(
            resolved.transfer,
            Some(TransferData {
                target_warehouse: "P3 倉".into(),
                quantity: 30,
            })
        );
    }

    #[test]
    fn fix_sets_the_counted_quantity() {
        let resolved = StockOperation::Fix { counted: 42 }.resolve(&item(200));
        assert_eq!(resolved.final_quantity, 42);
        assert_eq!(resolved.label, "盤點修正");
    }
}
