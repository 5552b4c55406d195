//! Location level.
//!
//! One d6 per player-character level. Ones add 1, twos add 2, threes and
//! fours add nothing, and fives and sixes add 1, or 2 when the location has
//! a problem (an obstacle, a hazard, or inhabitants).

use sc_mechanics::{Die, Roller};

/// Highest player-character level accepted; one die is rolled per level.
pub const MAX_PC_LEVEL: u32 = 999;

/// How much a single level die adds.
pub fn level_die_value(value: u32, has_problem: bool) -> u32 {
    match value {
        1 => 1,
        2 => 2,
        5 | 6 if has_problem => 2,
        5 | 6 => 1,
        _ => 0,
    }
}

/// Score a set of already rolled level dice.
pub fn score_level_dice(values: &[u32], has_problem: bool) -> u32 {
    values
        .iter()
        .map(|&v| level_die_value(v, has_problem))
        .fold(0, u32::saturating_add)
}

/// Roll `pc_level` d6 and score them into a location level.
pub fn calculate_location_level<R: Roller + ?Sized>(
    pc_level: u32,
    has_problem: bool,
    roller: &mut R,
) -> u32 {
    let level = (0..pc_level)
        .map(|_| level_die_value(roller.roll_die(Die::D6), has_problem))
        .fold(0, u32::saturating_add);
    tracing::debug!("location level {level} from {pc_level}d6 (problem: {has_problem})");
    level
}
