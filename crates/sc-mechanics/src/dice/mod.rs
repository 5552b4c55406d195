//! Dice.
//!
//! Table lookups roll the d20 and location levels roll the d6, but any die
//! with two or more sides can be pooled and rolled.

pub mod pool;
pub mod roll;
pub mod roller;

pub use pool::DicePool;
pub use roll::{PoolRoll, Roll};
pub use roller::{Roller, ScriptedRoller};

use serde::{Deserialize, Serialize};

/// A die with some number of sides, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Die(u32);

impl Die {
    /// Six-sided die.
    pub const D6: Self = Self(6);
    /// Twenty-sided die.
    pub const D20: Self = Self(20);

    /// A die with `sides` faces. Needs at least two.
    pub fn new(sides: u32) -> Option<Self> {
        (sides >= 2).then_some(Self(sides))
    }

    /// Highest face.
    pub fn sides(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}
