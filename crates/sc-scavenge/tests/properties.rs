//! Property tests for location calculation and item adjustment.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sc_scavenge::{
    Adjustment, Bound, DegreeOfSearch, ItemCategory, ItemTracker, LocationCategory, LocationScale,
    calculate_location, calculate_location_level,
};

fn location_choice() -> impl Strategy<Value = (LocationScale, LocationCategory, DegreeOfSearch, u64)>
{
    (
        prop::sample::select(LocationScale::all().to_vec()),
        prop::sample::select(LocationCategory::all().to_vec()),
        prop::sample::select(DegreeOfSearch::all().to_vec()),
        any::<u64>(),
    )
}

proptest! {
    #[test]
    fn location_totals_match_table((scale, category, degree, seed) in location_choice()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let loc = calculate_location(scale, category, degree, &mut rng);

        let base_total: u32 = category.base_items().iter().map(|&(_, n)| n).sum();
        let min_total: u32 = loc.items.values().map(|r| r.min).sum();
        let max_total: u32 = loc.items.values().map(|r| r.max).sum();

        prop_assert_eq!(min_total, base_total * scale.multiplier());
        prop_assert_eq!(max_total, base_total * scale.multiplier());
        prop_assert!(loc.items.keys().all(|k| !k.is_other()));
        prop_assert!(loc.items.values().all(|r| r.min == r.max));
        prop_assert_eq!(
            loc.reduction_budget(),
            degree.values().item_minimum_reduction * scale.multiplier()
        );
        prop_assert_eq!(loc.difficulty(), degree.values().difficulty);
    }

    #[test]
    fn adjustments_keep_tracker_consistent(
        (scale, category, degree, seed) in location_choice(),
        ops in prop::collection::vec((any::<bool>(), 0usize..16), 0..64),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let loc = calculate_location(scale, category, degree, &mut rng);
        let keys: Vec<ItemCategory> = loc.items.keys().cloned().collect();
        let mut tracker = ItemTracker::new(&loc);

        for (reduce, idx) in ops {
            let category = &keys[idx % keys.len()];
            let before = tracker.clone();
            let outcome = if reduce {
                tracker.reduce(category)
            } else {
                tracker.increase(category)
            };

            match outcome {
                Adjustment::Applied(bound) => {
                    let old = before.item(category).unwrap_or_default();
                    let new = tracker.item(category).unwrap_or_default();
                    if reduce {
                        prop_assert_eq!(tracker.remaining() + 1, before.remaining());
                        // Minimums reach zero before maximums move.
                        if bound == Bound::Maximum {
                            prop_assert_eq!(old.min, 0);
                        }
                    } else {
                        prop_assert_eq!(tracker.remaining(), before.remaining() + 1);
                        if bound == Bound::Minimum {
                            prop_assert_eq!(Some(old.max), loc.item(category).map(|r| r.max));
                        }
                    }
                    prop_assert_ne!(old, new);
                }
                Adjustment::Declined(_) => prop_assert_eq!(&tracker, &before),
            }

            prop_assert!(tracker.is_consistent());
            prop_assert!(tracker.remaining() <= tracker.budget());
            for (k, r) in tracker.items() {
                prop_assert!(r.is_valid());
                prop_assert!(r.max <= loc.items[k].max);
            }
        }
    }

    #[test]
    fn location_level_is_bounded(pc_level in 0u32..20, has_problem in any::<bool>(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let level = calculate_location_level(pc_level, has_problem, &mut rng);
        prop_assert!(level <= pc_level * 2);
        if pc_level == 0 {
            prop_assert_eq!(level, 0);
        }
    }
}
