//! Inventory persistence layer.
//!
//! # Responsibility
//! - Define the read-all / write-all contract over the inventory document.
//! - Keep file-format and I/O details out of the service layer.
//!
//! # Invariants
//! - `read` never fails: missing or invalid content yields an empty list.
//! - `write` replaces the whole document; there are no partial updates.
//! - A successful `write` followed by `read` returns exactly what was written;
//!   documents JSON cannot represent (non-finite prices) are refused.

use crate::model::item::{Item, ItemValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, DEFAULT_DATA_FILE_NAME};
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Write-side failure of an inventory store.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
    /// Item at `index` has a value the document format cannot hold.
    Unencodable {
        index: usize,
        reason: ItemValidationError,
    },
    /// Store refused the write without touching any backing resource.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize inventory: {err}"),
            Self::Unencodable { index, reason } => {
                write!(f, "item {index} cannot be stored: {reason}")
            }
            Self::Unavailable(message) => write!(f, "inventory store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Unencodable { reason, .. } => Some(reason),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Rejects items whose values would not survive a JSON round trip.
///
/// serde_json writes NaN and infinities as `null`, which reads back as `0`.
pub fn check_encodable(items: &[Item]) -> StoreResult<()> {
    match items
        .iter()
        .enumerate()
        .find(|(_, item)| !item.price.is_finite())
    {
        Some((index, item)) => Err(StoreError::Unencodable {
            index,
            reason: ItemValidationError::NonFinitePrice(item.price),
        }),
        None => Ok(()),
    }
}

/// Read-all / write-all access to the persisted inventory.
pub trait InventoryStore {
    /// Returns every persisted item in stored order.
    fn read(&self) -> Vec<Item>;
    /// Replaces the persisted inventory with `items`.
    fn write(&self, items: &[Item]) -> StoreResult<()>;
}

impl<S: InventoryStore + ?Sized> InventoryStore for &S {
    fn read(&self) -> Vec<Item> {
        (**self).read()
    }

    fn write(&self, items: &[Item]) -> StoreResult<()> {
        (**self).write(items)
    }
}

/// Boundary envelope for write results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl From<StoreResult<()>> for WriteOutcome {
    fn from(value: StoreResult<()>) -> Self {
        match value {
            Ok(()) => Self {
                success: true,
                error: None,
            },
            Err(err) => Self {
                success: false,
                error: Some(err.to_string()),
            },
        }
    }
}
