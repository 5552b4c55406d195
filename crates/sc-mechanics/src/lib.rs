//! Dice rolling for the scavenging engine.
//!
//! Provides the d6 and d20, pools of dice rolled together, and the
//! [`Roller`] capability every calculation draws randomness from. `StdRng`
//! is a roller; [`ScriptedRoller`] replays fixed values for tests and table
//! walkthroughs.

pub mod dice;

pub use dice::{DicePool, Die, PoolRoll, Roll, Roller, ScriptedRoller};
