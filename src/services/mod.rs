pub mod assistant;
pub mod categories;
pub mod deduction;
pub mod inventory;
pub mod staff;
pub mod warehouses;

pub use assistant::{AssistantService, GeminiClient, InsightModel, FALLBACK_MESSAGE};
pub use categories::CategoryService;
pub use deduction::{AvailabilityLine, DeductionService};
pub use inventory::InventoryService;
pub use staff::StaffService;
pub use warehouses::WarehouseService;
