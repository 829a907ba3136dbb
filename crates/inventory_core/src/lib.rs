//! Core domain logic for the inventory manager.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::item::{Item, ItemDraft, ItemId, ItemValidationError};
pub use search::filter::{filter_items, filter_positions};
pub use service::inventory_service::{InventoryService, InventoryServiceError, ServiceResult};
pub use store::{
    InventoryStore, JsonFileStore, MemoryStore, StoreError, StoreResult, WriteOutcome,
    DEFAULT_DATA_FILE_NAME,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
