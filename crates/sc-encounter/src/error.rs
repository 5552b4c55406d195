//! Error types for the encounter tracker.

use thiserror::Error;

/// Result type for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Errors that can occur while driving an encounter session.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// No actor matches the given position or name.
    #[error("no actor named or numbered: {0}")]
    UnknownActor(String),

    /// Initiative is not a whole number.
    #[error("invalid initiative: {0}")]
    InvalidInitiative(String),

    /// Hit points are not a number.
    #[error("invalid hit points: {0}")]
    InvalidHp(String),

    /// The actor has no hit points to change.
    #[error("{0} does not track hit points")]
    NoHitPoints(String),

    /// The actor has no injuries to toggle.
    #[error("{0} does not track injuries")]
    NoInjuries(String),

    /// Unrecognized body location.
    #[error("unknown injury location: {0}")]
    UnknownInjury(String),

    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Persisting state failed.
    #[error(transparent)]
    Store(#[from] sc_core::StoreError),
}
