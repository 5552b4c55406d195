use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use sc_core::sentence_case;
use sc_scavenge::tables::other_item_category;
use sc_scavenge::{DegreeOfSearch, LocationCategory, LocationScale};

pub fn run() -> Result<(), String> {
    println!("  {}", "Location Scale".bold());
    let mut scales = new_table(vec!["Scale", "Multiplier"]);
    for scale in LocationScale::all() {
        scales.add_row(vec![scale.label().to_string(), format!("x{}", scale.multiplier())]);
    }
    println!("{scales}\n");

    println!("  {}", "Location Category".bold());
    let mut categories = new_table(vec!["Category", "Base Items"]);
    for category in LocationCategory::all() {
        let items: Vec<String> = category
            .base_items()
            .iter()
            .map(|(name, count)| format!("{} {count}", sentence_case(name)))
            .collect();
        categories.add_row(vec![category.label().to_string(), items.join(", ")]);
    }
    println!("{categories}\n");

    println!("  {}", "Degree of Search".bold());
    let mut degrees = new_table(vec!["Degree", "Difficulty", "Item Reduction"]);
    for degree in DegreeOfSearch::all() {
        let values = degree.values();
        degrees.add_row(vec![
            sentence_case(degree.key()),
            values.difficulty.to_string(),
            format!("{} per multiplier", values.item_minimum_reduction),
        ]);
    }
    println!("{degrees}\n");

    println!("  {}", "Other Items (d20)".bold());
    let mut others = new_table(vec!["Roll", "Item"]);
    for (from, to, name) in other_item_bands() {
        let roll = if from == to {
            from.to_string()
        } else {
            format!("{from}-{to}")
        };
        others.add_row(vec![roll, sentence_case(name)]);
    }
    println!("{others}");

    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Collapse the d20 faces into contiguous bands with the same result.
fn other_item_bands() -> Vec<(u32, u32, &'static str)> {
    let mut bands: Vec<(u32, u32, &'static str)> = Vec::new();
    for roll in 1..=20 {
        let Some(name) = other_item_category(roll) else {
            continue;
        };
        match bands.last_mut() {
            Some((_, to, last)) if *last == name => *to = roll,
            _ => bands.push((roll, roll, name)),
        }
    }
    bands
}
