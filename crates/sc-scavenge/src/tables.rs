//! Static scavenging tables.
//!
//! Location scales multiply item counts, location categories decide which
//! item categories appear and how many of each, and the degree of search
//! sets the difficulty and how many items must be reduced before the
//! location is ready. The d20 "other" table turns wildcard slots into
//! concrete item categories.

use serde::{Deserialize, Serialize};

/// Item category names used by the tables.
pub mod item {
    /// Ammunition.
    pub const AMMUNITION: &str = "ammunition";
    /// Armor.
    pub const ARMOR: &str = "armor";
    /// Beverages.
    pub const BEVERAGES: &str = "beverages";
    /// Chems.
    pub const CHEMS: &str = "chems";
    /// Clothing.
    pub const CLOTHING: &str = "clothing";
    /// Food.
    pub const FOOD: &str = "food";
    /// Junk.
    pub const JUNK: &str = "junk";
    /// Oddities.
    pub const ODDITIES: &str = "oddities";
    /// Weapons.
    pub const WEAPONS: &str = "weapons";
    /// Wildcard slot resolved on the d20 other-item table.
    pub const OTHER: &str = "other";
}

/// Lowercase and strip separators so `Large`, `heavily Searched` and
/// `partly_searched` all compare equal to their canonical keys.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// How big a location is. Scales every item count and the reduction budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationScale {
    /// A shack or a single room.
    Tiny,
    /// A house or a small shop.
    Small,
    /// A store or a clinic.
    Average,
    /// A factory, a hospital or a base.
    #[serde(alias = "Large")]
    Large,
}

impl LocationScale {
    /// All scales from smallest to largest.
    pub fn all() -> &'static [Self] {
        &[Self::Tiny, Self::Small, Self::Average, Self::Large]
    }

    /// Parse a scale from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "tiny" => Some(Self::Tiny),
            "small" => Some(Self::Small),
            "average" => Some(Self::Average),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    /// The multiplier applied to base item counts and the reduction budget.
    pub fn multiplier(self) -> u32 {
        match self {
            Self::Tiny => 1,
            Self::Small => 2,
            Self::Average => 3,
            Self::Large => 4,
        }
    }

    /// Storage key for this scale.
    pub fn key(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Average => "average",
            Self::Large => "large",
        }
    }

    /// Label shown when choosing a scale.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tiny => "Tiny (6 Items)",
            Self::Small => "Small (12 Items)",
            Self::Average => "Average (18 Items)",
            Self::Large => "Large (24 Items)",
        }
    }
}

impl std::fmt::Display for LocationScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// What kind of place is being scavenged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationCategory {
    /// Homes and gardens.
    Residential,
    /// Shops, restaurants and the like.
    Commercial,
    /// Factories and garages.
    Industry,
    /// Hospitals, clinics and ambulances.
    Medical,
    /// Farms.
    Agriculture,
    /// Bases, checkpoints and armories.
    Military,
}

impl LocationCategory {
    /// All categories in table order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Residential,
            Self::Commercial,
            Self::Industry,
            Self::Medical,
            Self::Agriculture,
            Self::Military,
        ]
    }

    /// Parse a category from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "industry" | "industrial" => Some(Self::Industry),
            "medical" => Some(Self::Medical),
            "agriculture" | "agricultural" => Some(Self::Agriculture),
            "military" => Some(Self::Military),
            _ => None,
        }
    }

    /// Base item counts per item category, before the scale multiplier.
    pub fn base_items(self) -> &'static [(&'static str, u32)] {
        use item::*;
        match self {
            Self::Residential => &[
                (CLOTHING, 1),
                (FOOD, 1),
                (BEVERAGES, 1),
                (JUNK, 2),
                (OTHER, 1),
            ],
            Self::Commercial => &[(FOOD, 1), (BEVERAGES, 1), (JUNK, 2), (OTHER, 2)],
            Self::Industry => &[
                (CLOTHING, 1),
                (ARMOR, 1),
                (BEVERAGES, 1),
                (JUNK, 2),
                (OTHER, 1),
            ],
            Self::Medical => &[(CLOTHING, 1), (CHEMS, 2), (JUNK, 2), (OTHER, 1)],
            Self::Agriculture => &[(FOOD, 3), (BEVERAGES, 1), (JUNK, 1), (OTHER, 1)],
            Self::Military => &[
                (AMMUNITION, 1),
                (ARMOR, 1),
                (CLOTHING, 1),
                (WEAPONS, 1),
                (OTHER, 2),
            ],
        }
    }

    /// Storage key for this category.
    pub fn key(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industry => "industry",
            Self::Medical => "medical",
            Self::Agriculture => "agriculture",
            Self::Military => "military",
        }
    }

    /// Label shown when choosing a category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential (homes and gardens)",
            Self::Commercial => "Commercial (shops, restaurants, etc...)",
            Self::Industry => "Industry (factories, garage)",
            Self::Medical => "Medical (hospitals, clinics, ambulances)",
            Self::Agriculture => "Agriculture",
            Self::Military => "Military",
        }
    }
}

impl std::fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// How thoroughly a location has already been picked over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DegreeOfSearch {
    /// Nobody has been here.
    Untouched,
    /// Someone had a quick look.
    PartlySearched,
    /// Most of the obvious loot is gone.
    MostlySearched,
    /// Stripped nearly bare.
    #[serde(alias = "heavily Searched")]
    HeavilySearched,
}

/// Difficulty and reduction budget for a degree of search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeOfSearchValue {
    /// Difficulty of search tests at the location (0-3).
    pub difficulty: u32,
    /// Number of single-step item reductions required.
    pub item_minimum_reduction: u32,
}

impl DegreeOfSearch {
    /// All degrees from least to most searched.
    pub fn all() -> &'static [Self] {
        &[
            Self::Untouched,
            Self::PartlySearched,
            Self::MostlySearched,
            Self::HeavilySearched,
        ]
    }

    /// Parse a degree of search from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "untouched" => Some(Self::Untouched),
            "partlysearched" | "partly" => Some(Self::PartlySearched),
            "mostlysearched" | "mostly" => Some(Self::MostlySearched),
            "heavilysearched" | "heavily" => Some(Self::HeavilySearched),
            _ => None,
        }
    }

    /// Base difficulty and reduction, before the scale multiplier.
    pub fn values(self) -> DegreeOfSearchValue {
        let (difficulty, item_minimum_reduction) = match self {
            Self::Untouched => (0, 2),
            Self::PartlySearched => (1, 3),
            Self::MostlySearched => (2, 4),
            Self::HeavilySearched => (3, 5),
        };
        DegreeOfSearchValue {
            difficulty,
            item_minimum_reduction,
        }
    }

    /// Storage key for this degree.
    pub fn key(self) -> &'static str {
        match self {
            Self::Untouched => "untouched",
            Self::PartlySearched => "partlySearched",
            Self::MostlySearched => "mostlySearched",
            Self::HeavilySearched => "heavilySearched",
        }
    }
}

impl std::fmt::Display for DegreeOfSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolve a d20 roll on the other-item table.
///
/// Returns `None` for values a d20 can't produce.
pub fn other_item_category(roll: u32) -> Option<&'static str> {
    use item::*;
    match roll {
        1..=3 => Some(AMMUNITION),
        4..=5 => Some(ARMOR),
        6..=8 => Some(CLOTHING),
        9..=11 => Some(FOOD),
        12..=14 => Some(BEVERAGES),
        15..=16 => Some(CHEMS),
        17..=18 => Some(WEAPONS),
        19..=20 => Some(ODDITIES),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multipliers() {
        let m: Vec<u32> = LocationScale::all().iter().map(|s| s.multiplier()).collect();
        assert_eq!(m, vec![1, 2, 3, 4]);
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(LocationScale::parse("Large"), Some(LocationScale::Large));
        assert_eq!(LocationScale::parse(" tiny "), Some(LocationScale::Tiny));
        assert_eq!(
            DegreeOfSearch::parse("heavily Searched"),
            Some(DegreeOfSearch::HeavilySearched)
        );
        assert_eq!(
            DegreeOfSearch::parse("partly_searched"),
            Some(DegreeOfSearch::PartlySearched)
        );
        assert_eq!(
            LocationCategory::parse("MEDICAL"),
            Some(LocationCategory::Medical)
        );
        assert_eq!(LocationScale::parse("huge"), None);
        assert_eq!(LocationCategory::parse(""), None);
    }

    #[test]
    fn keys_round_trip_through_parse() {
        for s in LocationScale::all() {
            assert_eq!(LocationScale::parse(s.key()), Some(*s));
        }
        for c in LocationCategory::all() {
            assert_eq!(LocationCategory::parse(c.key()), Some(*c));
        }
        for d in DegreeOfSearch::all() {
            assert_eq!(DegreeOfSearch::parse(d.key()), Some(*d));
        }
    }

    #[test]
    fn serde_uses_storage_keys() {
        assert_eq!(
            serde_json::to_string(&DegreeOfSearch::HeavilySearched).unwrap(),
            "\"heavilySearched\""
        );
        assert_eq!(
            serde_json::to_string(&LocationScale::Large).unwrap(),
            "\"large\""
        );
    }

    #[test]
    fn serde_accepts_legacy_option_values() {
        let scale: LocationScale = serde_json::from_str("\"Large\"").unwrap();
        assert_eq!(scale, LocationScale::Large);
        let degree: DegreeOfSearch = serde_json::from_str("\"heavily Searched\"").unwrap();
        assert_eq!(degree, DegreeOfSearch::HeavilySearched);
    }

    #[test]
    fn degree_values() {
        let v: Vec<(u32, u32)> = DegreeOfSearch::all()
            .iter()
            .map(|d| {
                let v = d.values();
                (v.difficulty, v.item_minimum_reduction)
            })
            .collect();
        assert_eq!(v, vec![(0, 2), (1, 3), (2, 4), (3, 5)]);
    }

    #[test]
    fn every_category_has_a_wildcard_slot() {
        for c in LocationCategory::all() {
            assert!(c.base_items().iter().any(|(name, _)| *name == item::OTHER));
        }
    }

    #[test]
    fn other_table_covers_the_d20() {
        assert_eq!(other_item_category(1), Some(item::AMMUNITION));
        assert_eq!(other_item_category(5), Some(item::ARMOR));
        assert_eq!(other_item_category(8), Some(item::CLOTHING));
        assert_eq!(other_item_category(9), Some(item::FOOD));
        assert_eq!(other_item_category(14), Some(item::BEVERAGES));
        assert_eq!(other_item_category(15), Some(item::CHEMS));
        assert_eq!(other_item_category(18), Some(item::WEAPONS));
        assert_eq!(other_item_category(20), Some(item::ODDITIES));
        assert_eq!(other_item_category(0), None);
        assert_eq!(other_item_category(21), None);
        for roll in 1..=20 {
            assert!(other_item_category(roll).is_some());
        }
    }
}
