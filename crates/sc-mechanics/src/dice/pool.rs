//! Dice rolled together.

use super::roll::{PoolRoll, Roll};
use super::{Die, Roller};

/// A handful of dice, rolled in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    /// `count` dice of one kind.
    pub fn of(die: Die, count: u32) -> Self {
        Self::default().with(die, count)
    }

    /// Add `count` more dice of one kind.
    pub fn with(mut self, die: Die, count: u32) -> Self {
        self.dice.extend(std::iter::repeat_n(die, count as usize));
        self
    }

    /// The dice, in roll order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Whether there is nothing to roll.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll every die once.
    pub fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> PoolRoll {
        PoolRoll {
            rolls: self
                .dice
                .iter()
                .map(|&die| Roll {
                    die,
                    value: roller.roll_die(die),
                })
                .collect(),
        }
    }
}

/// Written in dice notation, e.g. `2d20 + 3d6`.
impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut runs: Vec<(u32, Die)> = Vec::new();
        for &die in &self.dice {
            match runs.last_mut() {
                Some((n, last)) if *last == die => *n += 1,
                _ => runs.push((1, die)),
            }
        }
        let notation: Vec<String> = runs.iter().map(|(n, die)| format!("{n}{die}")).collect();
        f.write_str(&notation.join(" + "))
    }
}
