use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Events emitted after each committed mutation. Consumers (the demo binary
/// drains them into the log) never feed back into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ItemCreated {
        item_id: String,
        quantity: i64,
    },
    ItemUpdated {
        item_id: String,
        old_quantity: i64,
        new_quantity: i64,
    },
    ItemsDeleted {
        item_ids: Vec<String>,
    },
    TransferReceived {
        item_id: String,
        source_warehouse: String,
        target_warehouse: String,
        quantity: i64,
    },
    BatchRecorded {
        rows: usize,
    },
    WarehouseDeleted {
        name: String,
        migrated_items: usize,
    },
    WarehouseRenamed {
        old_name: String,
        new_name: String,
    },
    CategoryRenamed {
        old_name: String,
        new_name: String,
    },
    StaffLoggedIn {
        staff_id: String,
    },
    BomDeducted {
        template_id: String,
        multiplier: u32,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Fire-and-forget: a full or closed channel is logged and swallowed so
    /// a slow consumer can never fail a committed mutation.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("event channel dropped: {}", e);
        }
    }
}

/// Builds the event channel the services publish into.
pub fn channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
