//! Plain-text table rendering.

use inventory_core::Item;

const HEADERS: [&str; 6] = ["#", "Name", "Category", "Price", "Quantity", "Unit"];
const EMPTY_MESSAGE: &str = "No items in inventory.";
const NO_MATCH_MESSAGE: &str = "No matching items.";

/// Renders the items at `positions` with their stored index in the first column.
pub fn render(items: &[Item], positions: &[usize]) -> String {
    if items.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }
    let rows = positions
        .iter()
        .filter_map(|index| items.get(*index).map(|item| row(*index, item)))
        .collect::<Vec<_>>();
    if rows.is_empty() {
        return format!("{NO_MATCH_MESSAGE}\n");
    }

    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for cells in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn row(index: usize, item: &Item) -> [String; 6] {
    [
        index.to_string(),
        item.name.clone(),
        item.category.clone(),
        item.price_label(),
        item.quantity.to_string(),
        item.unit.clone(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::render;
    use inventory_core::Item;

    #[test]
    fn empty_inventory_prints_placeholder() {
        assert_eq!(render(&[], &[]), "No items in inventory.\n");
    }

    #[test]
    fn rows_keep_stored_index_and_two_decimal_price() {
        let items = vec![
            Item::new("Rice", "Grain", 10.0, 5, "kg"),
            Item::new("Apples", "Fruit", 0.5, 40, "pcs"),
        ];

        let rendered = render(&items, &[1]);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#  Name"));
        assert!(lines[1].starts_with("1  Apples"));
        assert!(lines[1].contains("0.50"));
        assert!(!rendered.contains("Rice"));
    }

    #[test]
    fn no_positions_prints_no_match() {
        let items = vec![Item::new("Rice", "Grain", 10.0, 5, "kg")];
        assert_eq!(render(&items, &[]), "No matching items.\n");
    }
}
