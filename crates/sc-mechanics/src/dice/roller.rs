//! Sources of die values.

use rand::Rng;
use rand::rngs::StdRng;

use super::Die;

/// Something that can produce the value of a single die roll.
///
/// Implementations must return a value in `1..=die.sides()`.
pub trait Roller {
    /// Roll one die.
    fn roll_die(&mut self, die: Die) -> u32;
}

impl Roller for StdRng {
    fn roll_die(&mut self, die: Die) -> u32 {
        self.random_range(1..=die.sides().max(1))
    }
}

impl<R: Roller + ?Sized> Roller for Box<R> {
    fn roll_die(&mut self, die: Die) -> u32 {
        (**self).roll_die(die)
    }
}

/// A roller that replays a fixed sequence of values, cycling when exhausted.
///
/// Values are clamped into the rolled die's range, so a script written for a
/// d20 can't produce an impossible result on a d6.
#[derive(Debug, Clone)]
pub struct ScriptedRoller {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRoller {
    /// Create a roller that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
        }
    }

    /// How many values have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl Roller for ScriptedRoller {
    fn roll_die(&mut self, die: Die) -> u32 {
        let sides = die.sides().max(1);
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(1, sides)
    }
}
