//! Item adjustment under a reduction budget.
//!
//! After a location is calculated the player must spend its reduction
//! budget one step at a time. A reduction lowers a category's minimum, or
//! its maximum once the minimum is already zero. An increase gives a step
//! back, raising the maximum first and never past the location's original
//! value. Operations that would break a bound are declined, not errors.

use serde::{Deserialize, Serialize};

use crate::location::{CalculatedLocation, ItemCategory, ItemRange, Items};

/// Which bound of a range an adjustment changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    /// The minimum.
    Minimum,
    /// The maximum.
    Maximum,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimum => write!(f, "minimum"),
            Self::Maximum => write!(f, "maximum"),
        }
    }
}

/// Why an adjustment was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decline {
    /// The category is not part of this location.
    UnknownCategory,
    /// No reductions remain in the budget.
    BudgetSpent,
    /// Nothing has been reduced, so there is nothing to give back.
    NothingToRestore,
    /// The category is already at zero items.
    AtFloor,
    /// The category is already back at its original range.
    AtCeiling,
}

impl std::fmt::Display for Decline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory => write!(f, "unknown item category"),
            Self::BudgetSpent => write!(f, "no reductions left"),
            Self::NothingToRestore => write!(f, "nothing has been reduced yet"),
            Self::AtFloor => write!(f, "already at zero"),
            Self::AtCeiling => write!(f, "already at the original amount"),
        }
    }
}

/// The result of a reduce or increase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The given bound moved by one.
    Applied(Bound),
    /// Nothing changed.
    Declined(Decline),
}

impl Adjustment {
    /// Whether state changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Tracks adjusted item ranges against a location's reduction budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTracker {
    original: Items,
    budget: u32,
    adjusted: Items,
    remaining: u32,
}

impl ItemTracker {
    /// Start adjusting a freshly calculated location.
    pub fn new(location: &CalculatedLocation) -> Self {
        let budget = location.reduction_budget();
        Self {
            original: location.items.clone(),
            budget,
            adjusted: location.items.clone(),
            remaining: budget,
        }
    }

    /// Rebuild a tracker from persisted adjusted items and remaining budget.
    ///
    /// Returns `None` if the data can't have been produced by reductions and
    /// increases on `location`.
    pub fn restore(location: &CalculatedLocation, adjusted: Items, remaining: u32) -> Option<Self> {
        let tracker = Self {
            original: location.items.clone(),
            budget: location.reduction_budget(),
            adjusted,
            remaining,
        };
        tracker.is_consistent().then_some(tracker)
    }

    /// Check every invariant the operations maintain.
    pub fn is_consistent(&self) -> bool {
        if self.remaining > self.budget {
            return false;
        }
        if self.adjusted.len() != self.original.len()
            || !self.adjusted.keys().all(|k| self.original.contains_key(k))
        {
            return false;
        }
        let bounded = self.adjusted.iter().all(|(k, r)| {
            let ceiling = self.original[k].max;
            r.min <= r.max && r.max <= ceiling
        });
        bounded && self.spent_steps() == Some(self.budget - self.remaining)
    }

    /// Steps taken away from the original ranges, or `None` if a bound sits
    /// above where it started.
    fn spent_steps(&self) -> Option<u32> {
        self.adjusted.iter().try_fold(0u32, |acc, (k, r)| {
            let o = self.original.get(k)?;
            let max_steps = o.max.checked_sub(r.max)?;
            let min_steps = o.min.checked_sub(r.min)?;
            acc.checked_add(max_steps)?.checked_add(min_steps)
        })
    }

    /// Lower one bound of `category` by one, spending one reduction.
    ///
    /// Minimums go to zero before maximums are touched.
    pub fn reduce(&mut self, category: &ItemCategory) -> Adjustment {
        if !self.adjusted.contains_key(category) {
            return Adjustment::Declined(Decline::UnknownCategory);
        }
        if self.remaining == 0 {
            return Adjustment::Declined(Decline::BudgetSpent);
        }
        let Some(range) = self.adjusted.get_mut(category) else {
            return Adjustment::Declined(Decline::UnknownCategory);
        };

        let bound = if range.min == 0 && range.max > 0 {
            range.max -= 1;
            Bound::Maximum
        } else if range.min > 0 {
            range.min -= 1;
            Bound::Minimum
        } else {
            return Adjustment::Declined(Decline::AtFloor);
        };

        self.remaining -= 1;
        tracing::debug!("reduced {category} {bound}, {} left", self.remaining);
        Adjustment::Applied(bound)
    }

    /// Raise one bound of `category` by one, giving back one reduction.
    ///
    /// The maximum is restored first; neither bound can pass the location's
    /// original maximum.
    pub fn increase(&mut self, category: &ItemCategory) -> Adjustment {
        let Some(potential_max) = self.original.get(category).map(|r| r.max) else {
            return Adjustment::Declined(Decline::UnknownCategory);
        };
        if self.remaining >= self.budget {
            return Adjustment::Declined(Decline::NothingToRestore);
        }
        let Some(range) = self.adjusted.get_mut(category) else {
            return Adjustment::Declined(Decline::UnknownCategory);
        };

        let bound = if range.max < potential_max {
            range.max += 1;
            Bound::Maximum
        } else if range.min < potential_max {
            range.min += 1;
            Bound::Minimum
        } else {
            return Adjustment::Declined(Decline::AtCeiling);
        };

        self.remaining += 1;
        tracing::debug!("increased {category} {bound}, {} left", self.remaining);
        Adjustment::Applied(bound)
    }

    /// Whether reducing `category` would lower its minimum.
    pub fn can_reduce_minimum(&self, category: &ItemCategory) -> bool {
        self.remaining > 0 && self.adjusted.get(category).is_some_and(|r| r.min > 0)
    }

    /// Whether reducing `category` would lower its maximum.
    pub fn can_reduce_maximum(&self, category: &ItemCategory) -> bool {
        self.remaining > 0
            && self
                .adjusted
                .get(category)
                .is_some_and(|r| r.min == 0 && r.max > 0)
    }

    /// Whether increasing `category` would raise its maximum.
    pub fn can_increase_maximum(&self, category: &ItemCategory) -> bool {
        self.remaining < self.budget
            && self
                .ceiling(category)
                .zip(self.adjusted.get(category))
                .is_some_and(|(ceiling, r)| r.max < ceiling)
    }

    /// Whether increasing `category` would raise its minimum.
    pub fn can_increase_minimum(&self, category: &ItemCategory) -> bool {
        self.remaining < self.budget
            && self
                .ceiling(category)
                .zip(self.adjusted.get(category))
                .is_some_and(|(ceiling, r)| r.max == ceiling && r.min < ceiling)
    }

    fn ceiling(&self, category: &ItemCategory) -> Option<u32> {
        self.original.get(category).map(|r| r.max)
    }

    /// The current adjusted ranges.
    pub fn items(&self) -> &Items {
        &self.adjusted
    }

    /// The current range of one category.
    pub fn item(&self, category: &ItemCategory) -> Option<ItemRange> {
        self.adjusted.get(category).copied()
    }

    /// Reductions still to be made.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Total reductions required.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Reductions made so far.
    pub fn spent(&self) -> u32 {
        self.budget - self.remaining
    }

    /// Whether the whole budget has been spent.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::calculate_location;
    use crate::tables::{DegreeOfSearch, LocationCategory, LocationScale};
    use sc_mechanics::ScriptedRoller;

    fn cat(name: &str) -> ItemCategory {
        ItemCategory::new(name)
    }

    /// Tiny residential, untouched: budget 2.
    /// Items: beverages 1, clothing 1, food 1 (+1 from roll 10), junk 2.
    fn tiny_residential() -> CalculatedLocation {
        calculate_location(
            LocationScale::Tiny,
            LocationCategory::Residential,
            DegreeOfSearch::Untouched,
            &mut ScriptedRoller::new([10]),
        )
    }

    #[test]
    fn starts_with_full_budget() {
        let t = ItemTracker::new(&tiny_residential());
        assert_eq!(t.budget(), 2);
        assert_eq!(t.remaining(), 2);
        assert_eq!(t.spent(), 0);
        assert!(!t.is_complete());
        assert_eq!(t.item(&cat("food")), Some(ItemRange::fixed(2)));
    }

    #[test]
    fn reduce_lowers_minimum_first() {
        let mut t = ItemTracker::new(&tiny_residential());
        assert_eq!(t.reduce(&cat("junk")), Adjustment::Applied(Bound::Minimum));
        assert_eq!(t.item(&cat("junk")), Some(ItemRange { min: 1, max: 2 }));
        assert_eq!(t.reduce(&cat("junk")), Adjustment::Applied(Bound::Minimum));
        assert_eq!(t.item(&cat("junk")), Some(ItemRange { min: 0, max: 2 }));
        assert!(t.is_complete());
    }

    #[test]
    fn reduce_lowers_maximum_once_minimum_is_zero() {
        let mut t = ItemTracker::new(&tiny_residential());
        t.reduce(&cat("clothing"));
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange { min: 0, max: 1 }));
        assert_eq!(
            t.reduce(&cat("clothing")),
            Adjustment::Applied(Bound::Maximum)
        );
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange { min: 0, max: 0 }));
    }

    #[test]
    fn reduce_declines_without_budget() {
        let mut t = ItemTracker::new(&tiny_residential());
        t.reduce(&cat("junk"));
        t.reduce(&cat("junk"));
        let before = t.clone();
        assert_eq!(
            t.reduce(&cat("food")),
            Adjustment::Declined(Decline::BudgetSpent)
        );
        assert_eq!(t, before);
    }

    #[test]
    fn reduce_declines_at_floor() {
        // Heavily searched: budget 5, clothing 1.
        let loc = calculate_location(
            LocationScale::Tiny,
            LocationCategory::Residential,
            DegreeOfSearch::HeavilySearched,
            &mut ScriptedRoller::new([10]),
        );
        let mut t = ItemTracker::new(&loc);
        assert!(t.reduce(&cat("clothing")).is_applied());
        assert!(t.reduce(&cat("clothing")).is_applied());
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange { min: 0, max: 0 }));

        assert_eq!(
            t.reduce(&cat("clothing")),
            Adjustment::Declined(Decline::AtFloor)
        );
        assert_eq!(t.remaining(), 3);
    }

    #[test]
    fn reduce_unknown_category() {
        let mut t = ItemTracker::new(&tiny_residential());
        assert_eq!(
            t.reduce(&cat("weapons")),
            Adjustment::Declined(Decline::UnknownCategory)
        );
        assert_eq!(t.remaining(), 2);
    }

    #[test]
    fn increase_restores_maximum_then_minimum() {
        let mut t = ItemTracker::new(&tiny_residential());
        t.reduce(&cat("clothing"));
        t.reduce(&cat("clothing"));
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange { min: 0, max: 0 }));

        assert_eq!(
            t.increase(&cat("clothing")),
            Adjustment::Applied(Bound::Maximum)
        );
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange { min: 0, max: 1 }));
        assert_eq!(
            t.increase(&cat("clothing")),
            Adjustment::Applied(Bound::Minimum)
        );
        assert_eq!(t.item(&cat("clothing")), Some(ItemRange::fixed(1)));
        assert_eq!(t.remaining(), 2);
    }

    #[test]
    fn increase_declines_with_full_budget() {
        let mut t = ItemTracker::new(&tiny_residential());
        assert_eq!(
            t.increase(&cat("food")),
            Adjustment::Declined(Decline::NothingToRestore)
        );
    }

    #[test]
    fn increase_declines_at_ceiling() {
        let mut t = ItemTracker::new(&tiny_residential());
        t.reduce(&cat("junk"));
        assert_eq!(
            t.increase(&cat("food")),
            Adjustment::Declined(Decline::AtCeiling)
        );
        assert_eq!(t.remaining(), 1);
    }

    #[test]
    fn gating_queries_follow_the_rules() {
        let mut t = ItemTracker::new(&tiny_residential());
        let junk = cat("junk");
        assert!(t.can_reduce_minimum(&junk));
        assert!(!t.can_reduce_maximum(&junk));
        assert!(!t.can_increase_maximum(&junk));
        assert!(!t.can_increase_minimum(&junk));

        t.reduce(&junk);
        assert!(t.can_increase_minimum(&junk));
        assert!(!t.can_increase_maximum(&junk));

        t.reduce(&junk);
        assert!(!t.can_reduce_minimum(&junk));
        assert!(!t.can_reduce_maximum(&junk));
    }

    #[test]
    fn restore_accepts_consistent_state() {
        let loc = tiny_residential();
        let mut t = ItemTracker::new(&loc);
        t.reduce(&cat("junk"));

        let restored = ItemTracker::restore(&loc, t.items().clone(), t.remaining()).unwrap();
        assert_eq!(restored, t);
    }

    #[test]
    fn restore_rejects_inconsistent_state() {
        let loc = tiny_residential();
        let mut items = loc.items.clone();

        // Remaining doesn't match the steps taken.
        assert!(ItemTracker::restore(&loc, items.clone(), 1).is_none());

        // Above the original maximum.
        items.insert(cat("junk"), ItemRange { min: 1, max: 3 });
        assert!(ItemTracker::restore(&loc, items.clone(), 2).is_none());

        // Unknown category.
        let mut extra = loc.items.clone();
        extra.insert(cat("weapons"), ItemRange::fixed(0));
        assert!(ItemTracker::restore(&loc, extra, 2).is_none());

        // Remaining above the budget.
        assert!(ItemTracker::restore(&loc, loc.items.clone(), 3).is_none());
    }

    #[test]
    fn restore_rejects_overflowing_ranges() {
        let mut loc = tiny_residential();
        for range in loc.items.values_mut() {
            *range = ItemRange::fixed(u32::MAX);
        }
        let zeroed: Items = loc
            .items
            .keys()
            .map(|k| (k.clone(), ItemRange::fixed(0)))
            .collect();
        assert!(ItemTracker::restore(&loc, zeroed, 0).is_none());
    }

    #[test]
    fn spent_counts_reductions() {
        let loc = tiny_residential();
        let mut t = ItemTracker::new(&loc);
        assert_eq!(t.spent(), 0);
        t.reduce(&cat("junk"));
        assert_eq!(t.spent(), 1);
    }
}
