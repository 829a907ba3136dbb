//! Linear substring filter over items.
//!
//! # Invariants
//! - Matching is case-insensitive against name, category, unit, price and
//!   quantity in their display string forms.
//! - Prices use the ECMAScript number-to-string form (`10`, `0.5`, `1e+21`,
//!   `1e-7`), so terms typed against the desktop table keep matching.
//! - Blank terms match everything; input order is always preserved.

use crate::model::item::Item;

/// Returns the items matching `term`, in input order.
///
/// An empty or whitespace-only term returns the full list unchanged.
pub fn filter_items(items: &[Item], term: &str) -> Vec<Item> {
    match normalize_term(term) {
        None => items.to_vec(),
        Some(needle) => items
            .iter()
            .filter(|item| item_matches(item, &needle))
            .cloned()
            .collect(),
    }
}

/// Returns indices of the items matching `term`, ascending.
///
/// Lets a filtered view address the underlying record by position.
pub fn filter_positions(items: &[Item], term: &str) -> Vec<usize> {
    match normalize_term(term) {
        None => (0..items.len()).collect(),
        Some(needle) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| item_matches(item, &needle))
            .map(|(index, _)| index)
            .collect(),
    }
}

/// Checks one item against an already lowercased, trimmed needle.
pub fn item_matches(item: &Item, needle: &str) -> bool {
    [
        item.name.as_str(),
        item.category.as_str(),
        item.unit.as_str(),
    ]
    .iter()
    .any(|field| contains_folded(field, needle))
        || contains_folded(&price_text(item.price), needle)
        || contains_folded(&item.quantity.to_string(), needle)
}

/// Formats `value` the way ECMAScript `String(number)` does.
///
/// Plain decimal notation in `[1e-6, 1e21)`, exponent notation with an
/// explicit sign outside it. Both use the shortest round-trip digits.
pub fn price_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !value.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_items, filter_positions, price_text};
    use crate::model::item::Item;

    fn sample() -> Vec<Item> {
        vec![
            Item::new("Rice", "Grain", 10.0, 5, "kg"),
            Item::new("Olive Oil", "Pantry", 7.25, 12, "l"),
            Item::new("Apples", "Fruit", 0.5, 40, "pcs"),
        ]
    }

    #[test]
    fn blank_term_returns_everything() {
        let items = sample();
        assert_eq!(filter_items(&items, ""), items);
        assert_eq!(filter_items(&items, "   "), items);
        assert_eq!(filter_positions(&items, "\t"), vec![0, 1, 2]);
    }

    #[test]
    fn matching_is_case_insensitive_across_text_fields() {
        let items = sample();
        assert_eq!(filter_positions(&items, "RIC"), vec![0]);
        assert_eq!(filter_positions(&items, "pantry"), vec![1]);
        assert_eq!(filter_positions(&items, "PCS"), vec![2]);
    }

    #[test]
    fn numbers_match_by_display_form() {
        let items = sample();
        assert_eq!(filter_positions(&items, "7.25"), vec![1]);
        assert_eq!(filter_positions(&items, "40"), vec![2]);
        // price 10.0 displays as "10", quantity 12 contains "1" too
        assert_eq!(filter_positions(&items, "10"), vec![0]);
        assert_eq!(filter_positions(&items, "1"), vec![0, 1]);
    }

    #[test]
    fn term_is_trimmed_before_matching() {
        let items = sample();
        assert_eq!(filter_positions(&items, "  oil "), vec![1]);
    }

    #[test]
    fn price_text_follows_ecmascript_number_strings() {
        assert_eq!(price_text(10.0), "10");
        assert_eq!(price_text(0.5), "0.5");
        assert_eq!(price_text(0.0), "0");
        assert_eq!(price_text(-0.0), "0");
        assert_eq!(price_text(0.000001), "0.000001");
        assert_eq!(price_text(1e-7), "1e-7");
        assert_eq!(price_text(1.5e-7), "1.5e-7");
        assert_eq!(price_text(123456789012345680000.0), "123456789012345680000");
        assert_eq!(price_text(1e21), "1e+21");
        assert_eq!(price_text(2.5e22), "2.5e+22");
    }

    #[test]
    fn exponent_range_prices_match_by_exponent_form() {
        let items = vec![
            Item::new("Gold", "Metal", 1e21, 1, "t"),
            Item::new("Dust", "Misc", 1e-7, 1, "g"),
        ];
        assert_eq!(filter_positions(&items, "e+21"), vec![0]);
        assert_eq!(filter_positions(&items, "1E-7"), vec![1]);
        assert!(filter_positions(&items, "0000000").is_empty());
    }
}
