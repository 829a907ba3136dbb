//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the read-all / write-all boundary and CRUD entry points to the UI.
//! - Translate core errors into plain envelopes the UI can show directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the data file fresh; the file is the source of truth
//!   between calls.

use inventory_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, InventoryService,
    InventoryServiceError, InventoryStore, Item, ItemDraft, ItemId, JsonFileStore, WriteOutcome,
    DEFAULT_DATA_FILE_NAME,
};
use log::warn;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

const DATA_PATH_ENV: &str = "INVENTORY_DATA_PATH";
static DATA_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the inventory file used by every following call.
///
/// Must run before the first data call; later calls with the same path are
/// accepted, a different path is rejected. Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_inventory_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "inventory path cannot be empty".to_string();
    }

    let requested = PathBuf::from(trimmed);
    let active = DATA_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "inventory path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One item as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    /// Stable item ID in string form; empty for items the UI just created.
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u64,
    pub unit: String,
}

/// Result envelope for [`write_inventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteInventoryResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Result envelope for single-item commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// ID of the affected item on success.
    pub item_id: Option<String>,
    /// Human-readable message for the UI.
    pub message: String,
}

impl ItemActionResponse {
    fn success(message: impl Into<String>, item_id: ItemId) -> Self {
        Self {
            ok: true,
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Search result envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySearchResponse {
    /// Matching items in stored order.
    pub items: Vec<InventoryItem>,
    /// Stored positions of `items`, index-aligned.
    pub positions: Vec<u32>,
    pub message: String,
}

/// Returns the full persisted inventory, creating an empty file on first use.
///
/// Missing or invalid files yield an empty list; nothing is reported.
#[flutter_rust_bridge::frb(sync)]
pub fn read_inventory() -> Vec<InventoryItem> {
    read_inventory_at(&resolve_data_path())
}

/// Overwrites the persisted inventory with `items`.
#[flutter_rust_bridge::frb(sync)]
pub fn write_inventory(items: Vec<InventoryItem>) -> WriteInventoryResponse {
    write_inventory_at(&resolve_data_path(), items)
}

/// Adds one item from raw form fields.
#[flutter_rust_bridge::frb(sync)]
pub fn add_item(
    name: String,
    category: String,
    price: String,
    quantity: String,
    unit: String,
) -> ItemActionResponse {
    let draft = ItemDraft {
        name,
        category,
        price,
        quantity,
        unit,
    };
    add_item_at(&resolve_data_path(), draft)
}

/// Replaces the item at `index` with raw form fields.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_item(
    index: u32,
    name: String,
    category: String,
    price: String,
    quantity: String,
    unit: String,
) -> ItemActionResponse {
    let draft = ItemDraft {
        name,
        category,
        price,
        quantity,
        unit,
    };
    edit_item_at(&resolve_data_path(), index, draft)
}

/// Replaces the item with stable ID `item_id` with raw form fields.
#[flutter_rust_bridge::frb(sync)]
pub fn update_item_by_id(
    item_id: String,
    name: String,
    category: String,
    price: String,
    quantity: String,
    unit: String,
) -> ItemActionResponse {
    let draft = ItemDraft {
        name,
        category,
        price,
        quantity,
        unit,
    };
    update_item_by_id_at(&resolve_data_path(), item_id.as_str(), draft)
}

/// Removes the item at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_item(index: u32) -> ItemActionResponse {
    delete_item_at(&resolve_data_path(), index)
}

/// Removes the item with stable ID `item_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_item_by_id(item_id: String) -> ItemActionResponse {
    delete_item_by_id_at(&resolve_data_path(), item_id.as_str())
}

/// Filters the persisted inventory by a free-text term.
#[flutter_rust_bridge::frb(sync)]
pub fn search_items(term: String) -> InventorySearchResponse {
    search_items_at(&resolve_data_path(), term.as_str())
}

fn read_inventory_at(path: &Path) -> Vec<InventoryItem> {
    let store = prepared_store(path);
    store.read().into_iter().map(to_inventory_item).collect()
}

fn write_inventory_at(path: &Path, items: Vec<InventoryItem>) -> WriteInventoryResponse {
    let items = items.into_iter().map(from_inventory_item).collect::<Vec<_>>();
    if let Some(err) = items.iter().find_map(|item| item.validate().err()) {
        return WriteInventoryResponse {
            success: false,
            error: Some(err.to_string()),
        };
    }
    let mut seen = HashSet::with_capacity(items.len());
    if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id)) {
        return WriteInventoryResponse {
            success: false,
            error: Some(format!("duplicate item id: {}", duplicate.id)),
        };
    }

    let outcome = WriteOutcome::from(JsonFileStore::new(path).write(&items));
    WriteInventoryResponse {
        success: outcome.success,
        error: outcome.error,
    }
}

fn add_item_at(path: &Path, draft: ItemDraft) -> ItemActionResponse {
    let item = match draft.into_item() {
        Ok(item) => item,
        Err(err) => return ItemActionResponse::failure(err.to_string()),
    };
    let mut service = InventoryService::open(prepared_store(path));
    match service.add_item(item) {
        Ok(id) => ItemActionResponse::success("Item added.", id),
        Err(err) => ItemActionResponse::failure(format!("add_item failed: {err}")),
    }
}

fn edit_item_at(path: &Path, index: u32, draft: ItemDraft) -> ItemActionResponse {
    let item = match draft.into_item() {
        Ok(item) => item,
        Err(err) => return ItemActionResponse::failure(err.to_string()),
    };
    let mut service = InventoryService::open(prepared_store(path));
    let index = index as usize;
    match service.edit_item(index, item) {
        Ok(()) => match service.get(index) {
            Some(updated) => ItemActionResponse::success("Item updated.", updated.id),
            None => ItemActionResponse::failure("edited item missing after write"),
        },
        Err(err) => ItemActionResponse::failure(format!("edit_item failed: {err}")),
    }
}

fn update_item_by_id_at(path: &Path, item_id: &str, draft: ItemDraft) -> ItemActionResponse {
    let id = match Uuid::parse_str(item_id.trim()) {
        Ok(id) => id,
        Err(_) => return ItemActionResponse::failure(format!("invalid item id `{item_id}`")),
    };
    let item = match draft.into_item() {
        Ok(item) => item,
        Err(err) => return ItemActionResponse::failure(err.to_string()),
    };
    let mut service = InventoryService::open(prepared_store(path));
    match service.update_item(id, item) {
        Ok(()) => ItemActionResponse::success("Item updated.", id),
        Err(InventoryServiceError::ItemNotFound(_)) => {
            ItemActionResponse::failure(format!("item not found: {id}"))
        }
        Err(err) => ItemActionResponse::failure(format!("update_item_by_id failed: {err}")),
    }
}

fn delete_item_at(path: &Path, index: u32) -> ItemActionResponse {
    let mut service = InventoryService::open(prepared_store(path));
    match service.delete_item(index as usize) {
        Ok(removed) => ItemActionResponse::success("Item deleted.", removed.id),
        Err(err) => ItemActionResponse::failure(format!("delete_item failed: {err}")),
    }
}

fn delete_item_by_id_at(path: &Path, item_id: &str) -> ItemActionResponse {
    let id = match Uuid::parse_str(item_id.trim()) {
        Ok(id) => id,
        Err(_) => return ItemActionResponse::failure(format!("invalid item id `{item_id}`")),
    };
    let mut service = InventoryService::open(prepared_store(path));
    match service.delete_item_by_id(id) {
        Ok(removed) => ItemActionResponse::success("Item deleted.", removed.id),
        Err(InventoryServiceError::ItemNotFound(_)) => {
            ItemActionResponse::failure(format!("item not found: {id}"))
        }
        Err(err) => ItemActionResponse::failure(format!("delete_item_by_id failed: {err}")),
    }
}

fn search_items_at(path: &Path, term: &str) -> InventorySearchResponse {
    let service = InventoryService::open(prepared_store(path));
    let positions = service.search_positions(term);
    let items = positions
        .iter()
        .filter_map(|index| service.get(*index).cloned())
        .map(to_inventory_item)
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} result(s).", items.len())
    };
    InventorySearchResponse {
        items,
        positions: positions.into_iter().map(|index| index as u32).collect(),
        message,
    }
}

fn prepared_store(path: &Path) -> JsonFileStore {
    let store = JsonFileStore::new(path);
    if let Err(err) = store.ensure_data_file() {
        warn!(
            "event=inventory_init module=ffi status=error path={} error={}",
            path.display(),
            err
        );
    }
    store
}

fn resolve_data_path() -> PathBuf {
    DATA_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DATA_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DATA_FILE_NAME)
        })
        .clone()
}

fn to_inventory_item(item: Item) -> InventoryItem {
    InventoryItem {
        id: item.id.to_string(),
        name: item.name,
        category: item.category,
        price: item.price,
        quantity: item.quantity,
        unit: item.unit,
    }
}

fn from_inventory_item(item: InventoryItem) -> Item {
    let id = Uuid::parse_str(item.id.trim()).unwrap_or_else(|_| Uuid::new_v4());
    Item::with_id(
        id,
        item.name,
        item.category,
        item.price,
        item.quantity,
        item.unit,
    )
}
