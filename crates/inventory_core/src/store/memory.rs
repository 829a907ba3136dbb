//! In-process inventory store.

use super::{check_encodable, InventoryStore, StoreError, StoreResult};
use crate::model::item::Item;
use std::cell::{Cell, RefCell};

/// Inventory store kept in memory, for tests and embedders without a disk.
///
/// Writes can be switched to fail so callers can exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<Vec<Item>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `items`.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Self::default()
        }
    }

    /// Makes every following `write` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl InventoryStore for MemoryStore {
    fn read(&self) -> Vec<Item> {
        self.items.borrow().clone()
    }

    fn write(&self, items: &[Item]) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        check_encodable(items)?;
        *self.items.borrow_mut() = items.to_vec();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
