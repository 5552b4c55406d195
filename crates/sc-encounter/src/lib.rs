//! Encounter tracker for the Fallout 2d20 tabletop game.
//!
//! Keeps actors in initiative order with a current-turn marker, optional hit
//! points, injuries and S.P.E.C.I.A.L. stats, and persists them through a
//! key-value store.

pub mod actor;
pub mod error;
pub mod session;
pub mod tracker;

pub use actor::{Actor, Injuries, Injury, Special};
pub use error::{EncounterError, EncounterResult};
pub use session::EncounterSession;
pub use tracker::{EncounterTracker, Listed};
