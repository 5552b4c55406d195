//! Storage keys for persisted wizard state.

/// A key the wizard persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Current wizard step.
    Step,
    /// Selected location scale.
    Scale,
    /// Selected location category.
    Category,
    /// Selected degree of search.
    Degree,
    /// JSON calculated location.
    Location,
    /// JSON adjusted items.
    Items,
    /// Remaining reduction budget.
    Reductions,
    /// Player-character level input.
    PcLevel,
    /// Whether the location has a problem.
    Problem,
    /// Calculated location level.
    Level,
    /// Rendered markdown items table.
    ItemsMarkdown,
}

impl StorageKey {
    /// Every key, in the order they are written during a full run.
    pub const ALL: [Self; 11] = [
        Self::Step,
        Self::Scale,
        Self::Category,
        Self::Degree,
        Self::Location,
        Self::Items,
        Self::Reductions,
        Self::PcLevel,
        Self::Problem,
        Self::Level,
        Self::ItemsMarkdown,
    ];

    /// The raw key string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "state",
            Self::Scale => "sc-location-scale",
            Self::Category => "sc-location-category",
            Self::Degree => "sc-location-degree",
            Self::Location => "sc-calculated-location",
            Self::Items => "sc-adjusted-items",
            Self::Reductions => "sc-items-to-reduce",
            Self::PcLevel => "sc-pc-levels",
            Self::Problem => "sc-has-problem",
            Self::Level => "sc-location-level",
            Self::ItemsMarkdown => "sc-items-markdown",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<&str> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), StorageKey::ALL.len());
    }
}
