use colored::Colorize;

use sc_core::sentence_case;
use sc_scavenge::{
    DegreeOfSearch, LocationCategory, LocationScale, ScavengeConfig, calculate_location,
    render_items_table,
};

pub fn run(scale: &str, category: &str, degree: &str, seed: Option<u64>) -> Result<(), String> {
    let scale =
        LocationScale::parse(scale).ok_or_else(|| format!("invalid location scale: {scale}"))?;
    let category = LocationCategory::parse(category)
        .ok_or_else(|| format!("invalid location category: {category}"))?;
    let degree =
        DegreeOfSearch::parse(degree).ok_or_else(|| format!("invalid degree of search: {degree}"))?;

    let config = ScavengeConfig { seed };
    let location = calculate_location(scale, category, degree, &mut config.rng());

    println!(
        "  {} {} {} location ({})",
        "Scavenging".bold(),
        sentence_case(scale.key()),
        category.key(),
        sentence_case(degree.key()).to_lowercase(),
    );
    println!(
        "  Difficulty: {} | Items to reduce: {}",
        location.difficulty(),
        location.reduction_budget()
    );
    println!();
    println!("{}", super::items_table(&location.items));
    println!();
    print!("{}", render_items_table(&location.items));

    Ok(())
}
