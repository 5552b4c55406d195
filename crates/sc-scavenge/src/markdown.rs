//! Markdown export of adjusted items.

use crate::location::Items;

const HEADERS: [&str; 3] = ["Category", "Minimum", "Maximum"];

/// Render item ranges as an aligned markdown table.
///
/// Rows follow the map's order, which is alphabetical by category key.
/// Every line, including the last, ends with a newline. An empty map
/// renders just the header and divider.
pub fn render_items_table(items: &Items) -> String {
    let rows: Vec<[String; 3]> = items
        .iter()
        .map(|(category, range)| {
            [
                category.display_name(),
                range.min.to_string(),
                range.max.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS, &widths);
    let divider = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &divider, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S; 3], widths: &[usize; 3]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} |", cell.as_ref()));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{ItemCategory, ItemRange};

    fn items(entries: &[(&str, u32, u32)]) -> Items {
        entries
            .iter()
            .map(|&(name, min, max)| (ItemCategory::new(name), ItemRange { min, max }))
            .collect()
    }

    #[test]
    fn single_row() {
        let table = render_items_table(&items(&[("food", 1, 2)]));
        assert_eq!(
            table,
            "| Category | Minimum | Maximum |\n\
             | -------- | ------- | ------- |\n\
             | Food     | 1       | 2       |\n"
        );
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn empty_is_header_only() {
        let table = render_items_table(&Items::new());
        assert_eq!(
            table,
            "| Category | Minimum | Maximum |\n\
             | -------- | ------- | ------- |\n"
        );
    }

    #[test]
    fn widths_grow_with_content() {
        let table = render_items_table(&items(&[("ammunition", 12, 12345678), ("junk", 0, 3)]));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "| Category   | Minimum | Maximum  |");
        assert_eq!(lines[1], "| ---------- | ------- | -------- |");
        assert_eq!(lines[2], "| Ammunition | 12      | 12345678 |");
        assert_eq!(lines[3], "| Junk       | 0       | 3        |");
    }

    #[test]
    fn rows_are_alphabetical() {
        let table = render_items_table(&items(&[
            ("weapons", 1, 1),
            ("armor", 1, 1),
            ("chems", 0, 2),
        ]));
        let names: Vec<&str> = table
            .lines()
            .skip(2)
            .filter_map(|l| l.split('|').nth(1))
            .map(str::trim)
            .collect();
        assert_eq!(names, vec!["Armor", "Chems", "Weapons"]);
    }

    #[test]
    fn camel_case_categories_are_humanized() {
        let table = render_items_table(&items(&[("nukaCola", 1, 1)]));
        assert!(table.contains("| Nuka cola |"));
    }
}
