use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{InventoryItem, Staff, Transaction};

/// The single owner of all application state: five independent collections
/// with snapshot reads and whole-collection atomic replacement.
///
/// No validation happens here; the services compute a complete next
/// collection and install it in one write, so readers never observe a
/// partially-updated collection.
#[derive(Debug, Default)]
pub struct EntityStore {
    items: RwLock<Vec<InventoryItem>>,
    transactions: RwLock<Vec<Transaction>>,
    categories: RwLock<Vec<String>>,
    warehouses: RwLock<Vec<String>>,
    staff: RwLock<Vec<Staff>>,
}

impl EntityStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn items(&self) -> Vec<InventoryItem> {
        self.items.read().await.clone()
    }

    pub async fn replace_items(&self, next: Vec<InventoryItem>) {
        *self.items.write().await = next;
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.transactions.read().await.clone()
    }

    pub async fn replace_transactions(&self, next: Vec<Transaction>) {
        *self.transactions.write().await = next;
    }

    pub async fn categories(&self) -> Vec<String> {
        self.categories.read().await.clone()
    }

    pub async fn replace_categories(&self, next: Vec<String>) {
        *self.categories.write().await = next;
    }

    pub async fn warehouses(&self) -> Vec<String> {
        self.warehouses.read().await.clone()
    }

    pub async fn replace_warehouses(&self, next: Vec<String>) {
        *self.warehouses.write().await = next;
    }

    pub async fn staff(&self) -> Vec<Staff> {
        self.staff.read().await.clone()
    }

    pub async fn replace_staff(&self, next: Vec<Staff>) {
        *self.staff.write().await = next;
    }
}
