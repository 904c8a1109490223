//! Error types for statistics setup.

use thiserror::Error;

/// Errors raised while configuring a statistics run.
///
/// Computing statistics never fails; an empty subset is reported as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Two partial-statistics keys share a label.
    #[error("Duplicate partial stats label '{label}'")]
    DuplicatePartialKey {
        /// The repeated label.
        label: String,
    },

    /// A partial-statistics key has an empty label.
    #[error("Partial stats label must not be empty")]
    EmptyPartialKeyLabel,
}
