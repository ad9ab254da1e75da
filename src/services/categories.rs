use std::sync::Arc;

use tracing::instrument;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::store::EntityStore;

/// Category list management. Deletion is guarded: a category still referenced
/// by any item cannot be removed.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<EntityStore>,
    events: EventSender,
}

impl CategoryService {
    pub fn new(store: Arc<EntityStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<(), ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "category name cannot be empty".into(),
            ));
        }
        let mut categories = self.store.categories().await;
        if categories.iter().any(|c| c == name) {
            return Err(ServiceError::Conflict(format!(
                "category {} already exists",
                name
            )));
        }
        categories.push(name.to_string());
        self.store.replace_categories(categories).await;
        Ok(())
    }

    /// Cascades the new name to every referencing item, then to the list.
    /// No transaction is recorded for a pure rename.
    #[instrument(skip(self))]
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<(), ServiceError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ServiceError::ValidationError(
                "category name cannot be empty".into(),
            ));
        }
        if old_name == new_name {
            return Ok(());
        }
        let mut categories = self.store.categories().await;
        if !categories.iter().any(|c| c == old_name) {
            return Err(ServiceError::NotFound(format!(
                "category {} not found",
                old_name
            )));
        }
        if categories.iter().any(|c| c == new_name) {
            return Err(ServiceError::Conflict(format!(
                "category {} already exists",
                new_name
            )));
        }

        let mut items = self.store.items().await;
        for item in items.iter_mut().filter(|i| i.category == old_name) {
            item.category = new_name.to_string();
        }
        self.store.replace_items(items).await;

        for c in categories.iter_mut().filter(|c| c.as_str() == old_name) {
            *c = new_name.to_string();
        }
        self.store.replace_categories(categories).await;

        self.events
            .send(Event::CategoryRenamed {
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            })
            .await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        let in_use = self
            .store
            .items()
            .await
            .iter()
            .filter(|i| i.category == name)
            .count();
        if in_use > 0 {
            return Err(ServiceError::InvalidOperation(format!(
                "category {} is referenced by {} item(s)",
                name, in_use
            )));
        }
        let next: Vec<String> = self
            .store
            .categories()
            .await
            .into_iter()
            .filter(|c| c != name)
            .collect();
        self.store.replace_categories(next).await;
        Ok(())
    }
}
