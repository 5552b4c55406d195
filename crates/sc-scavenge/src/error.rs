//! Error types for the scavenging wizard.

use thiserror::Error;

use crate::session::WizardStep;

/// Result type for scavenging operations.
pub type ScavengeResult<T> = Result<T, ScavengeError>;

/// Errors that can occur while driving a scavenging session.
///
/// The calculators themselves can't fail; these cover user input and
/// steps taken out of order.
#[derive(Debug, Error)]
pub enum ScavengeError {
    /// A location selection has not been made yet.
    #[error("no location {0} selected")]
    MissingSelection(&'static str),

    /// Unrecognized location scale.
    #[error("invalid location scale: {0}")]
    InvalidScale(String),

    /// Unrecognized location category.
    #[error("invalid location category: {0}")]
    InvalidCategory(String),

    /// Unrecognized degree of search.
    #[error("invalid degree of search: {0}")]
    InvalidDegree(String),

    /// No location has been calculated.
    #[error("no location calculated yet")]
    NoLocation,

    /// The reduction budget has not been spent.
    #[error("{0} item reductions still to make")]
    ItemsRemaining(u32),

    /// Player level is missing or outside `1..=MAX_PC_LEVEL`.
    #[error("invalid player level: {0}")]
    InvalidPcLevel(String),

    /// The level can't be rolled without a player level.
    #[error("no player level entered")]
    NoPcLevel,

    /// The requested step is not reachable yet.
    #[error("the {0} step is not available yet")]
    StepLocked(WizardStep),

    /// Unrecognized wizard step.
    #[error("unknown step: {0}")]
    UnknownStep(String),

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
