//! Location calculation.
//!
//! Turns a scale, a category and a degree of search into the item ranges a
//! location starts with, resolving wildcard "other" slots on the d20 table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sc_core::sentence_case;
use sc_mechanics::{DicePool, Die, Roller};

use crate::tables::{
    DegreeOfSearch, DegreeOfSearchValue, LocationCategory, LocationScale, item,
    other_item_category,
};

/// An item category such as `food` or `chems`.
///
/// Categories are open-ended: wildcard rolls can add categories a location's
/// base table doesn't list. Ordering is alphabetical by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCategory(String);

impl ItemCategory {
    /// Create a category from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The category name as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name, e.g. `Food`.
    pub fn display_name(&self) -> String {
        sentence_case(&self.0)
    }

    /// Whether this is the unresolved wildcard slot.
    pub fn is_other(&self) -> bool {
        self.0 == item::OTHER
    }
}

impl From<&str> for ItemCategory {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The minimum and maximum number of items of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemRange {
    /// Items guaranteed to be found.
    pub min: u32,
    /// Items that can be found at most.
    pub max: u32,
}

impl ItemRange {
    /// A range with equal minimum and maximum.
    pub fn fixed(count: u32) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// Whether `min <= max` holds.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Item ranges keyed by category, in alphabetical order.
pub type Items = BTreeMap<ItemCategory, ItemRange>;

/// The outcome of a location calculation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedLocation {
    /// Chosen scale.
    #[serde(rename = "locationScale")]
    pub scale: LocationScale,
    /// Chosen category.
    #[serde(rename = "locationCategory")]
    pub category: LocationCategory,
    /// Starting item ranges. These are also the ceilings for later increases.
    #[serde(rename = "locationItems")]
    pub items: Items,
    /// Chosen degree of search.
    #[serde(rename = "degreeOfSearch")]
    pub degree_of_search: DegreeOfSearch,
    /// Difficulty and scaled reduction budget.
    #[serde(rename = "degreeOfSearchValue")]
    pub degree_of_search_value: DegreeOfSearchValue,
}

impl CalculatedLocation {
    /// Number of single-step reductions this location requires.
    pub fn reduction_budget(&self) -> u32 {
        self.degree_of_search_value.item_minimum_reduction
    }

    /// Search difficulty at this location.
    pub fn difficulty(&self) -> u32 {
        self.degree_of_search_value.difficulty
    }

    /// The starting range for `category`, if the location has it.
    pub fn item(&self, category: &ItemCategory) -> Option<ItemRange> {
        self.items.get(category).copied()
    }
}

/// Calculate a location's starting items and search values.
///
/// Every base category starts at `base * multiplier` for both bounds. The
/// wildcard slot is then rolled away: one d20 per wildcard item, each adding
/// one to the category the roll maps to.
pub fn calculate_location<R: Roller + ?Sized>(
    scale: LocationScale,
    category: LocationCategory,
    degree_of_search: DegreeOfSearch,
    roller: &mut R,
) -> CalculatedLocation {
    let multiplier = scale.multiplier();

    let mut items: Items = category
        .base_items()
        .iter()
        .map(|&(name, base)| (ItemCategory::new(name), ItemRange::fixed(base * multiplier)))
        .collect();

    let others = items
        .remove(&ItemCategory::new(item::OTHER))
        .map(|r| r.max)
        .unwrap_or(0);

    if others > 0 {
        let rolls = DicePool::of(Die::D20, others).roll(roller);
        tracing::debug!("resolving {others} other items: {rolls}");

        for value in rolls.values() {
            let Some(name) = other_item_category(value) else {
                tracing::warn!("d20 produced {value}, outside the other-item table");
                continue;
            };
            let range = items.entry(ItemCategory::new(name)).or_default();
            range.min += 1;
            range.max += 1;
        }
    }

    let mut degree_of_search_value = degree_of_search.values();
    degree_of_search_value.item_minimum_reduction *= multiplier;

    tracing::debug!(
        "calculated {scale} {category} location ({degree_of_search}): {} categories, budget {}",
        items.len(),
        degree_of_search_value.item_minimum_reduction
    );

    CalculatedLocation {
        scale,
        category,
        items,
        degree_of_search,
        degree_of_search_value,
    }
}
