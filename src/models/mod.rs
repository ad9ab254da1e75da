pub mod bom;
pub mod inventory_item;
pub mod operation;
pub mod staff;
pub mod transaction;

pub use bom::{BomLine, BomTemplate};
pub use inventory_item::{InventoryItem, InventoryItemPatch};
pub use operation::{ResolvedOperation, StockOperation, TransferData};
pub use staff::{Staff, StaffStatus};
pub use transaction::{Transaction, TransactionType};
