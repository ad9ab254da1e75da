use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{transaction::labels, TransactionType};
use crate::recorder::TransactionRecorder;
use crate::store::EntityStore;

/// Warehouse list management, including delete-with-migration.
#[derive(Clone)]
pub struct WarehouseService {
    store: Arc<EntityStore>,
    recorder: TransactionRecorder,
    events: EventSender,
}

impl WarehouseService {
    pub fn new(store: Arc<EntityStore>, recorder: TransactionRecorder, events: EventSender) -> Self {
        Self {
            store,
            recorder,
            events,
        }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<(), ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "warehouse name cannot be empty".into(),
            ));
        }
        let mut warehouses = self.store.warehouses().await;
        if warehouses.iter().any(|w| w == name) {
            return Err(ServiceError::Conflict(format!(
                "warehouse {} already exists",
                name
            )));
        }
        warehouses.push(name.to_string());
        self.store.replace_warehouses(warehouses).await;
        Ok(())
    }

    /// Renames a warehouse, cascading the new name to every referencing item.
    /// No transaction is recorded for a pure rename. `old == new` is accepted
    /// and leaves the store structurally unchanged.
    #[instrument(skip(self))]
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<(), ServiceError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ServiceError::ValidationError(
                "warehouse name cannot be empty".into(),
            ));
        }
        if old_name == new_name {
            return Ok(());
        }
        let mut warehouses = self.store.warehouses().await;
        if !warehouses.iter().any(|w| w == old_name) {
            return Err(ServiceError::NotFound(format!(
                "warehouse {} not found",
                old_name
            )));
        }
        if warehouses.iter().any(|w| w == new_name) {
            return Err(ServiceError::Conflict(format!(
                "warehouse {} already exists",
                new_name
            )));
        }

        let mut items = self.store.items().await;
        for item in items.iter_mut().filter(|i| i.warehouse == old_name) {
            item.warehouse = new_name.to_string();
        }
        self.store.replace_items(items).await;

        for w in warehouses.iter_mut().filter(|w| w.as_str() == old_name) {
            *w = new_name.to_string();
        }
        self.store.replace_warehouses(warehouses).await;

        self.events
            .send(Event::WarehouseRenamed {
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            })
            .await;
        Ok(())
    }

    /// Removes a warehouse from the list unconditionally.
    ///
    /// With a `target`, every item stored there is relocated to the target
    /// and one zero-quantity `IN` relocation entry is recorded per item.
    /// Without a target the items are deliberately left in place pointing at
    /// a now-nonexistent warehouse; callers that want a guard pass a target.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        name: &str,
        target: Option<&str>,
        operator: &str,
    ) -> Result<usize, ServiceError> {
        let warehouses = self.store.warehouses().await;
        if !warehouses.iter().any(|w| w == name) {
            return Err(ServiceError::NotFound(format!(
                "warehouse {} not found",
                name
            )));
        }

        let mut migrated: Vec<(String, String)> = Vec::new();
        if let Some(target) = target {
            let mut items = self.store.items().await;
            for item in items.iter_mut().filter(|i| i.warehouse == name) {
                item.warehouse = target.to_string();
                item.touch();
                migrated.push((item.id.clone(), item.name.clone()));
            }
            self.store.replace_items(items).await;

            let label = labels::warehouse_relocation(target);
            for (id, item_name) in &migrated {
                self.recorder
                    .record(
                        id,
                        item_name,
                        TransactionType::In,
                        0,
                        operator,
                        Some(label.clone()),
                    )
                    .await;
            }
        }

        let next: Vec<String> = warehouses.into_iter().filter(|w| w != name).collect();
        self.store.replace_warehouses(next).await;

        info!(warehouse = name, migrated = migrated.len(), "warehouse deleted");
        self.events
            .send(Event::WarehouseDeleted {
                name: name.to_string(),
                migrated_items: migrated.len(),
            })
            .await;
        Ok(migrated.len())
    }
}
