//! Item domain model.
//!
//! # Responsibility
//! - Define the product record shared by store, search and service layers.
//! - Coerce loosely typed persisted values into the canonical shape.
//! - Turn raw form text (`ItemDraft`) into a validated `Item`.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `name` is non-empty after trimming.
//! - `price` is finite and `>= 0`; `quantity` is a non-negative integer.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an inventory item.
pub type ItemId = Uuid;

/// Validation failures for item records and form input.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    /// Product name is empty or whitespace-only.
    EmptyName,
    /// Price is below zero.
    NegativePrice(f64),
    /// Price is infinite or NaN.
    NonFinitePrice(f64),
    /// Quantity input parsed to a negative integer.
    NegativeQuantity(i64),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name is required"),
            Self::NegativePrice(value) => write!(f, "price must be >= 0, got {value}"),
            Self::NonFinitePrice(value) => write!(f, "price must be a finite number, got {value}"),
            Self::NegativeQuantity(value) => write!(f, "quantity must be >= 0, got {value}"),
        }
    }
}

impl Error for ItemValidationError {}

/// One product record.
///
/// Field names match the persisted JSON document. Missing or `null` fields
/// decode to empty/zero values, and numeric strings are accepted for price and
/// quantity, so hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Assigned on creation; records persisted without one get a fresh id.
    #[serde(default = "fresh_item_id", deserialize_with = "lenient_id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: String,
}

impl Item {
    /// Creates an item with a generated stable ID.
    ///
    /// Does not validate; call [`Item::validate`] or go through the service.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u64,
        unit: impl Into<String>,
    ) -> Self {
        Self::with_id(fresh_item_id(), name, category, price, quantity, unit)
    }

    /// Creates an item with a caller-provided ID.
    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: u64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            unit: unit.into(),
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if !self.price.is_finite() {
            return Err(ItemValidationError::NonFinitePrice(self.price));
        }
        if self.price < 0.0 {
            return Err(ItemValidationError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Price formatted for table display (two decimals).
    pub fn price_label(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// Raw form input for one item, as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub unit: String,
}

impl ItemDraft {
    /// Converts the draft into a validated item with a fresh ID.
    ///
    /// Text fields are trimmed. Price takes the longest leading decimal
    /// number (unparseable input becomes `0`), quantity takes the leading
    /// integer (unparseable input becomes `0`).
    pub fn into_item(self) -> Result<Item, ItemValidationError> {
        let price = parse_price_input(&self.price);
        let quantity = parse_quantity_input(&self.quantity);
        if quantity < 0 {
            return Err(ItemValidationError::NegativeQuantity(quantity));
        }

        let item = Item::new(
            self.name.trim(),
            self.category.trim(),
            price,
            quantity.unsigned_abs(),
            self.unit.trim(),
        );
        item.validate()?;
        Ok(item)
    }
}

/// Parses the leading decimal number of `raw`; `0` when none is present.
///
/// NaN collapses to `0`, infinities are kept so validation can reject them.
pub fn parse_price_input(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let prefix_len = decimal_prefix_len(trimmed);
    let parsed = match trimmed[..prefix_len].parse::<f64>() {
        Ok(value) => value,
        Err(_) => match trimmed.to_ascii_lowercase().as_str() {
            "infinity" | "+infinity" => f64::INFINITY,
            "-infinity" => f64::NEG_INFINITY,
            _ => 0.0,
        },
    };
    if parsed.is_nan() {
        0.0
    } else {
        parsed
    }
}

/// Parses the leading integer of `raw`; `0` when none is present.
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    trimmed[..end].parse::<i64>().unwrap_or(0)
}

fn decimal_prefix_len(value: &str) -> usize {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    end
}

fn fresh_item_id() -> ItemId {
    Uuid::new_v4()
}

// Integer variants come first so whole numbers never pass through `f64`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Unsigned(u64),
    Signed(i64),
    Number(f64),
    Text(String),
    Flag(bool),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ItemId>::deserialize(deserializer)?.unwrap_or_else(fresh_item_id))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseScalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(LooseScalar::Text(value)) => value,
        Some(LooseScalar::Unsigned(value)) => value.to_string(),
        Some(LooseScalar::Signed(value)) => value.to_string(),
        Some(LooseScalar::Number(value)) => value.to_string(),
        Some(LooseScalar::Flag(value)) => value.to_string(),
    })
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseScalar>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(LooseScalar::Unsigned(value)) => Ok(value as f64),
        Some(LooseScalar::Signed(value)) => Ok(value as f64),
        Some(LooseScalar::Number(value)) => Ok(value),
        Some(LooseScalar::Text(value)) if value.trim().is_empty() => Ok(0.0),
        Some(LooseScalar::Text(value)) => value
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid price `{value}`"))),
        Some(LooseScalar::Flag(value)) => Err(de::Error::custom(format!(
            "invalid price `{value}`"
        ))),
    }
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseScalar>::deserialize(deserializer)? {
        None => Ok(0),
        Some(LooseScalar::Unsigned(value)) => Ok(value),
        Some(LooseScalar::Signed(value)) => u64::try_from(value).map_err(|_| {
            de::Error::custom(format!(
                "quantity must be a non-negative integer, got {value}"
            ))
        }),
        Some(LooseScalar::Number(value)) => truncate_quantity(value),
        Some(LooseScalar::Text(value)) if value.trim().is_empty() => Ok(0),
        Some(LooseScalar::Text(value)) => {
            let trimmed = value.trim();
            if let Ok(exact) = trimmed.parse::<u64>() {
                return Ok(exact);
            }
            let parsed = trimmed
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid quantity `{value}`")))?;
            truncate_quantity(parsed)
        }
        Some(LooseScalar::Flag(value)) => {
            Err(de::Error::custom(format!("invalid quantity `{value}`")))
        }
    }
}

fn truncate_quantity<E: de::Error>(value: f64) -> Result<u64, E> {
    if !value.is_finite() || value < 0.0 {
        return Err(E::custom(format!(
            "quantity must be a non-negative integer, got {value}"
        )));
    }
    Ok(value.trunc() as u64)
}
