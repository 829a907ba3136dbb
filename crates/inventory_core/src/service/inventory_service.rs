//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide add/edit/delete/search entry points for front ends.
//! - Persist the full list through an `InventoryStore` after each mutation.
//!
//! # Invariants
//! - Validation runs before any mutation or persistence.
//! - The in-memory list only changes after the store accepted the new list;
//!   a failed write leaves it exactly as before.
//! - Edits keep the ID of the slot they replace.

use crate::model::item::{Item, ItemId, ItemValidationError};
use crate::search::filter::{filter_items, filter_positions};
use crate::store::{InventoryStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, InventoryServiceError>;

/// Service error for inventory use-cases.
#[derive(Debug)]
pub enum InventoryServiceError {
    /// Item input violates record invariants.
    Validation(ItemValidationError),
    /// Positional operation referenced a slot past the end of the list.
    IndexOutOfRange { index: usize, len: usize },
    /// ID-keyed operation referenced an unknown item.
    ItemNotFound(ItemId),
    /// Persisting the new list failed.
    Store(StoreError),
}

impl Display for InventoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "item index {index} out of range for {len} item(s)")
            }
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InventoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IndexOutOfRange { .. } | Self::ItemNotFound(_) => None,
        }
    }
}

impl From<ItemValidationError> for InventoryServiceError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for InventoryServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// In-memory inventory bound to a persistence backend.
pub struct InventoryService<S: InventoryStore> {
    store: S,
    items: Vec<Item>,
}

impl<S: InventoryStore> InventoryService<S> {
    /// Creates a service and loads the persisted inventory.
    pub fn open(store: S) -> Self {
        let items = store.read();
        Self { store, items }
    }

    /// Discards in-memory state and loads the persisted inventory again.
    pub fn reload(&mut self) {
        self.items = self.store.read();
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Current position of the item with `id`.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends a validated item and persists the list.
    ///
    /// Returns the stable ID of the stored item.
    pub fn add_item(&mut self, item: Item) -> ServiceResult<ItemId> {
        item.validate()?;

        let id = item.id;
        let mut next = self.items.clone();
        next.push(item);
        self.commit(next, "add")?;
        Ok(id)
    }

    /// Replaces the item at `index` and persists the list.
    pub fn edit_item(&mut self, index: usize, item: Item) -> ServiceResult<()> {
        item.validate()?;
        let slot_id = self.checked_slot(index)?.id;

        let mut next = self.items.clone();
        next[index] = Item { id: slot_id, ..item };
        self.commit(next, "edit")
    }

    /// Removes the item at `index`, persists the list and returns the removed item.
    pub fn delete_item(&mut self, index: usize) -> ServiceResult<Item> {
        self.checked_slot(index)?;

        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.commit(next, "delete")?;
        Ok(removed)
    }

    /// Replaces the item with `id`, wherever it currently sits.
    pub fn update_item(&mut self, id: ItemId, item: Item) -> ServiceResult<()> {
        let index = self
            .position_of(id)
            .ok_or(InventoryServiceError::ItemNotFound(id))?;
        self.edit_item(index, item)
    }

    /// Removes the item with `id` and returns it.
    pub fn delete_item_by_id(&mut self, id: ItemId) -> ServiceResult<Item> {
        let index = self
            .position_of(id)
            .ok_or(InventoryServiceError::ItemNotFound(id))?;
        self.delete_item(index)
    }

    /// Items matching `term`; see [`filter_items`].
    pub fn search(&self, term: &str) -> Vec<Item> {
        filter_items(&self.items, term)
    }

    /// Positions of items matching `term`; see [`filter_positions`].
    pub fn search_positions(&self, term: &str) -> Vec<usize> {
        filter_positions(&self.items, term)
    }

    fn checked_slot(&self, index: usize) -> ServiceResult<&Item> {
        self.items
            .get(index)
            .ok_or(InventoryServiceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    fn commit(&mut self, next: Vec<Item>, op: &'static str) -> ServiceResult<()> {
        if let Err(err) = self.store.write(&next) {
            warn!(
                "event=inventory_mutation module=service status=error op={} items={} error={}",
                op,
                self.items.len(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=inventory_mutation module=service status=ok op={} items={}",
            op,
            next.len()
        );
        self.items = next;
        Ok(())
    }
}
