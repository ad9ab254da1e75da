use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{transaction::labels, Transaction, TransactionType};
use crate::store::EntityStore;

/// Appends normalized entries to the audit ledger.
///
/// Recording never fails: an unresolvable item degrades to a bare name with
/// zero price instead of erroring, and a blank operator falls back to the
/// system label. The ledger is most-recent-first and truncated to `cap`
/// after every insertion.
#[derive(Clone)]
pub struct TransactionRecorder {
    store: Arc<EntityStore>,
    cap: usize,
}

impl TransactionRecorder {
    pub fn new(store: Arc<EntityStore>, cap: usize) -> Self {
        Self { store, cap }
    }

    pub async fn record(
        &self,
        item_id: &str,
        item_name: &str,
        kind: TransactionType,
        quantity: i64,
        operator: &str,
        label: Option<String>,
    ) {
        let items = self.store.items().await;
        let resolved = items.iter().find(|i| i.id == item_id);
        let sku_suffix = resolved
            .map(|i| format!(" [{}]", i.sku))
            .unwrap_or_default();
        let price_at_time = resolved.map(|i| i.price).unwrap_or(Decimal::ZERO);

        let operator = if operator.trim().is_empty() {
            labels::DEFAULT_OPERATOR
        } else {
            operator
        };

        let tx = Transaction {
            id: Transaction::generate_id(),
            item_id: item_id.to_string(),
            item_name: format!("{}{}", item_name, sku_suffix),
            kind,
            label,
            quantity,
            price_at_time,
            date: Transaction::now_display(),
            operator: operator.to_string(),
        };
        debug!(tx_id = %tx.id, kind = tx.kind.as_str(), quantity, "ledger append");

        let mut log = self.store.transactions().await;
        log.insert(0, tx);
        log.truncate(self.cap);
        self.store.replace_transactions(log).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_item_degrades_to_zero_price_and_no_suffix() {
        let store = EntityStore::new();
        let recorder = TransactionRecorder::new(store.clone(), 500);
        recorder
            .record("ghost", "Phantom", TransactionType::Out, 3, "", None)
            .await;

        let log = store.transactions().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].item_name, "Phantom");
        assert_eq!(log[0].price_at_time, Decimal::ZERO);
        assert_eq!(log[0].operator, "系統");
    }

    #[tokio::test]
    async fn ledger_is_capped_keeping_newest() {
        let store = EntityStore::new();
        let recorder = TransactionRecorder::new(store.clone(), 5);
        for n in 0..8 {
            recorder
                .record("x", &format!("item-{}", n), TransactionType::In, n, "op", None)
                .await;
        }
        let log = store.transactions().await;
        assert_eq!(log.len(), 5);
        // Newest first; the oldest three were dropped.
        assert_eq!(log[0].item_name, "item-7");
        assert_eq!(log[4].item_name, "item-3");
    }
}
