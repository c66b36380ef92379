//! Error types for script parsing, field resolution and line execution.
//!
//! The interpreter only ever looks at the variant of an [`OperationError`]
//! to decide how a failed line is reported:
//!
//! ```text
//!  Parse / Filter  ──►  Error: Malformed line <n>: <text>
//!  Aggregate       ──►  Error: <message>
//!  Io              ──►  fatal, ends the run
//! ```

use thiserror::Error;

use crate::data::model::Category;

/// A script line that could not be turned into an [`crate::operation::Operation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("operation '{op}' is missing argument {position}")]
    MissingArgument { op: String, position: usize },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// A `Category.Key` field that could not be resolved on a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The category prefix is not one of the resolvable categories.
    #[error("Field '{0}' not found in entry.")]
    UnknownField(String),

    /// The category exists but the record has no value for the key.
    #[error("Key '{key}' not found in {category}.")]
    MissingKey { category: Category, key: String },
}

/// Failure of a single script line.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Field resolution failed while filtering.
    #[error("filter failed: {0}")]
    Filter(FieldError),

    /// Field resolution failed while computing a population aggregate.
    #[error("{0}")]
    Aggregate(FieldError),

    #[error("failed to write report output: {0}")]
    Io(#[from] std::io::Error),
}

impl OperationError {
    /// Whether the line should be reported with the malformed-line framing.
    pub fn is_malformed_line(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Filter(_))
    }
}

/// Startup configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing operations file argument")]
    MissingOperationsFile,
}
