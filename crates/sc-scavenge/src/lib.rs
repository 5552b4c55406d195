//! Scavenging location calculator for the Fallout 2d20 tabletop game.
//!
//! Provides the scale, category and degree-of-search tables, location
//! calculation with other-item resolution, the item reduction tracker,
//! location level rolls, markdown export, and a persisted step-by-step
//! wizard session.

pub mod config;
pub mod error;
pub mod items;
pub mod keys;
pub mod level;
pub mod location;
pub mod markdown;
pub mod session;
pub mod tables;

pub use config::ScavengeConfig;
pub use error::{ScavengeError, ScavengeResult};
pub use items::{Adjustment, Bound, Decline, ItemTracker};
pub use keys::StorageKey;
pub use level::{MAX_PC_LEVEL, calculate_location_level, score_level_dice};
pub use location::{CalculatedLocation, ItemCategory, ItemRange, Items, calculate_location};
pub use markdown::render_items_table;
pub use session::{ScavengeSession, WizardStep};
pub use tables::{DegreeOfSearch, DegreeOfSearchValue, LocationCategory, LocationScale};
