use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    transaction::labels, InventoryItem, InventoryItemPatch, StockOperation, TransactionType,
    TransferData,
};
use crate::recorder::TransactionRecorder;
use crate::store::EntityStore;

/// The inventory mutation engine. Every operation derives direction,
/// magnitude and a ledger label from item-state deltas, installs the next
/// collection atomically, and drives the recorder as a side effect.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<EntityStore>,
    recorder: TransactionRecorder,
    events: EventSender,
}

impl InventoryService {
    pub fn new(store: Arc<EntityStore>, recorder: TransactionRecorder, events: EventSender) -> Self {
        Self {
            store,
            recorder,
            events,
        }
    }

    /// Sets an item's quantity directly. Silent no-op on a negative target or
    /// an unknown id; records `庫存快調` only when the quantity actually moved.
    #[instrument(skip(self))]
    pub async fn quick_adjust(&self, item_id: &str, new_quantity: i64, operator: &str) {
        if new_quantity < 0 {
            debug!(item_id, new_quantity, "quick adjust rejected: negative target");
            return;
        }
        let mut items = self.store.items().await;
        let Some(item) = items.iter_mut().find(|i| i.id == item_id) else {
            debug!(item_id, "quick adjust skipped: unknown item");
            return;
        };

        let old_quantity = item.quantity;
        let kind = if new_quantity > old_quantity {
            TransactionType::In
        } else {
            TransactionType::Out
        };
        let magnitude = (new_quantity - old_quantity).abs();
        let (id, name) = (item.id.clone(), item.name.clone());

        item.quantity = new_quantity;
        item.touch();
        self.store.replace_items(items).await;

        if magnitude > 0 {
            self.recorder
                .record(
                    &id,
                    &name,
                    kind,
                    magnitude,
                    operator,
                    Some(labels::QUICK_ADJUST.to_string()),
                )
                .await;
        }
        self.events
            .send(Event::ItemUpdated {
                item_id: id,
                old_quantity,
                new_quantity,
            })
            .await;
    }

    /// Creates or fully replaces an item, optionally carrying the inbound leg
    /// of a warehouse transfer.
    ///
    /// Existing id: direction is `IN` when the quantity did not shrink, and a
    /// transaction is recorded when the quantity moved or the caller supplied
    /// a label (so labeled metadata-only edits still reach the ledger). New
    /// id: appended and always logged as `初始入庫`, zero quantity included.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn upsert_item(
        &self,
        mut item: InventoryItem,
        operator: &str,
        operation_label: Option<String>,
        transfer: Option<TransferData>,
    ) {
        item.quantity = item.quantity.max(0);
        item.touch();

        let mut next = self.store.items().await;
        let existing = next.iter().position(|i| i.id == item.id);

        // Facts captured now, recorded after the atomic install.
        let mut ledger: Vec<(String, String, TransactionType, i64, Option<String>)> = Vec::new();

        match existing {
            Some(idx) => {
                let old_quantity = next[idx].quantity;
                let magnitude = (item.quantity - old_quantity).abs();
                let kind = if item.quantity >= old_quantity {
                    TransactionType::In
                } else {
                    TransactionType::Out
                };
                if magnitude > 0 || operation_label.is_some() {
                    let label = operation_label
                        .clone()
                        .unwrap_or_else(|| labels::DATA_UPDATE.to_string());
                    ledger.push((item.id.clone(), item.name.clone(), kind, magnitude, Some(label)));
                }
                next[idx] = item.clone();
                self.events
                    .send(Event::ItemUpdated {
                        item_id: item.id.clone(),
                        old_quantity,
                        new_quantity: item.quantity,
                    })
                    .await;
            }
            None => {
                ledger.push((
                    item.id.clone(),
                    item.name.clone(),
                    TransactionType::In,
                    item.quantity,
                    Some(labels::INITIAL_STOCK_IN.to_string()),
                ));
                self.events
                    .send(Event::ItemCreated {
                        item_id: item.id.clone(),
                        quantity: item.quantity,
                    })
                    .await;
                next.push(item.clone());
            }
        }

        if let Some(transfer) = transfer.filter(|t| t.quantity > 0) {
            let receipt = labels::transfer_receipt(&item.warehouse);
            let twin = next
                .iter_mut()
                .find(|i| i.sku == item.sku && i.warehouse == transfer.target_warehouse);
            let (twin_id, twin_name) = match twin {
                Some(twin) => {
                    twin.quantity += transfer.quantity;
                    twin.touch();
                    (twin.id.clone(), twin.name.clone())
                }
                None => {
                    let mut clone = item.clone();
                    clone.id = format!("item-{}", Uuid::new_v4());
                    clone.warehouse = transfer.target_warehouse.clone();
                    clone.quantity = transfer.quantity;
                    clone.touch();
                    let ids = (clone.id.clone(), clone.name.clone());
                    next.push(clone);
                    ids
                }
            };
            ledger.push((
                twin_id.clone(),
                twin_name,
                TransactionType::In,
                transfer.quantity,
                Some(receipt),
            ));
            self.events
                .send(Event::TransferReceived {
                    item_id: twin_id,
                    source_warehouse: item.warehouse.clone(),
                    target_warehouse: transfer.target_warehouse.clone(),
                    quantity: transfer.quantity,
                })
                .await;
        }

        self.store.replace_items(next).await;
        for (id, name, kind, quantity, label) in ledger {
            self.recorder
                .record(&id, &name, kind, quantity, operator, label)
                .await;
        }
    }

    /// Resolves a typed stock operation against an existing item and applies
    /// it through the upsert path, transfer companion included.
    #[instrument(skip(self, operation))]
    pub async fn apply_operation(
        &self,
        item_id: &str,
        operation: StockOperation,
        operator: &str,
    ) -> Result<(), ServiceError> {
        let items = self.store.items().await;
        let item = items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| ServiceError::NotFound(format!("item {} not found", item_id)))?;

        let resolved = operation.resolve(item);
        let mut updated = item.clone();
        updated.quantity = resolved.final_quantity;
        self.upsert_item(updated, operator, Some(resolved.label), resolved.transfer)
            .await;
        Ok(())
    }

    /// Batch insert with sequential merge: each row is matched by
    /// `(sku, warehouse)` against the evolving collection, so later rows can
    /// fold into rows inserted earlier in the same batch.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn batch_insert(&self, rows: Vec<InventoryItem>, operator: &str) {
        let mut next = self.store.items().await;
        let mut ledger: Vec<(String, String, i64, &'static str)> = Vec::new();

        for mut row in rows {
            row.quantity = row.quantity.max(0);
            match next
                .iter_mut()
                .find(|i| i.sku == row.sku && i.warehouse == row.warehouse)
            {
                Some(existing) => {
                    existing.quantity += row.quantity;
                    existing.touch();
                    ledger.push((
                        existing.id.clone(),
                        existing.name.clone(),
                        row.quantity,
                        labels::BATCH_APPEND,
                    ));
                }
                None => {
                    row.touch();
                    ledger.push((
                        row.id.clone(),
                        row.name.clone(),
                        row.quantity,
                        labels::BATCH_NEW_ITEM,
                    ));
                    next.push(row);
                }
            }
        }

        self.store.replace_items(next).await;
        let recorded = ledger.len();
        for (id, name, quantity, label) in ledger {
            self.recorder
                .record(
                    &id,
                    &name,
                    TransactionType::In,
                    quantity,
                    operator,
                    Some(label.to_string()),
                )
                .await;
        }
        self.events.send(Event::BatchRecorded { rows: recorded }).await;
        info!(rows = recorded, "batch insert applied");
    }

    /// Merges partial fields into every matched item and records one
    /// zero-quantity audit entry per item naming the changed fields. Not a
    /// stock movement; an empty patch is a silent no-op.
    #[instrument(skip(self, patch))]
    pub async fn batch_update(&self, ids: &[String], patch: InventoryItemPatch, operator: &str) {
        if patch.is_empty() {
            debug!("batch update skipped: empty patch");
            return;
        }
        let label = labels::batch_update(&patch.changed_fields());

        let mut next = self.store.items().await;
        let mut touched: Vec<(String, String)> = Vec::new();
        for item in next.iter_mut().filter(|i| ids.contains(&i.id)) {
            patch.apply(item);
            item.touch();
            touched.push((item.id.clone(), item.name.clone()));
        }
        self.store.replace_items(next).await;

        for (id, name) in &touched {
            self.recorder
                .record(
                    id,
                    name,
                    TransactionType::In,
                    0,
                    operator,
                    Some(label.clone()),
                )
                .await;
        }
        info!(updated = touched.len(), "batch update applied");
    }

    /// Records an `OUT` of each matched item's full remaining quantity, then
    /// removes them in a single pass. Transactions are written before removal
    /// so the ledger entries still resolve SKU and price.
    #[instrument(skip(self))]
    pub async fn batch_delete(&self, ids: &[String], operator: Option<&str>) {
        let items = self.store.items().await;
        let operator = operator.unwrap_or("");
        let doomed: Vec<&InventoryItem> = items.iter().filter(|i| ids.contains(&i.id)).collect();

        for item in &doomed {
            self.recorder
                .record(
                    &item.id,
                    &item.name,
                    TransactionType::Out,
                    item.quantity,
                    operator,
                    Some(labels::BATCH_DELETE.to_string()),
                )
                .await;
        }
        let deleted: Vec<String> = doomed.iter().map(|i| i.id.clone()).collect();

        let next: Vec<InventoryItem> = items
            .iter()
            .filter(|i| !ids.contains(&i.id))
            .cloned()
            .collect();
        self.store.replace_items(next).await;

        info!(deleted = deleted.len(), "batch delete applied");
        self.events.send(Event::ItemsDeleted { item_ids: deleted }).await;
    }
}
