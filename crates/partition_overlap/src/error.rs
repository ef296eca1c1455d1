//! Error types for classification, overlap tracking and integrity checks.

use thiserror::Error;

/// Errors raised while registering dimensions on a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// The dimension name is already registered. The call was a no-op.
    #[error("Class {0} is already present")]
    DuplicateDimension(String),

    /// Partitions were already queried; the classifier no longer accepts input.
    #[error("Cannot register {0}: partitions were already computed")]
    Frozen(String),

    /// The name would not survive a round trip through a displayed label,
    /// e.g. `"mixed mm"` with the default space separator.
    #[error("Dimension name {name:?} cannot be used with label separator {separator:?}")]
    InvalidName { name: String, separator: String },

    #[error("At most {max} dimensions can be registered")]
    TooManyDimensions { max: usize },
}

impl ClassifierError {
    /// Duplicates leave the classifier untouched, so callers may choose to continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClassifierError::DuplicateDimension(_))
    }
}

/// Errors raised by the overlap tracker. Any of them fails the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlapError {
    #[error("Class {class} has no entry for date {date}")]
    MissingDateEntry { class: String, date: String },

    #[error("Snapshot for date {0} was already recorded")]
    DuplicateDate(String),
}

/// Consistency failures between a partition and the caller's universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("Classes {first} and {second} are not disjoint ({shared} shared elements)")]
    Overlapping {
        first: String,
        second: String,
        shared: usize,
    },

    #[error(
        "Union of classes does not match the universe: {missing} missing, {unexpected} unexpected (e.g. {sample})"
    )]
    InconsistentUniverse {
        missing: usize,
        unexpected: usize,
        sample: String,
    },
}
