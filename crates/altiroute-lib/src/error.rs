use std::path::PathBuf;

use thiserror::Error;

use crate::graph::LocationId;

/// Convenient result alias for the altiroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was absent, out of range, or empty.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The graph has more locations than the declared matrix capacity, or the
    /// relaxation would exceed the configured work budget.
    #[error("capacity exceeded: {requested} exceeds the limit of {capacity}")]
    CapacityExceeded { requested: u64, capacity: u64 },

    /// Reconstruction was requested between locations with no finite distance.
    #[error("no path exists from location {start} to location {goal}")]
    NoPathExists { start: LocationId, goal: LocationId },

    /// A query was issued against matrices that were never relaxed or that
    /// belong to a different graph snapshot.
    #[error("shortest paths not converged: {reason}")]
    NotConverged { reason: String },

    /// Raised when a location name could not be found in the graph.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when two locations share the same name.
    #[error("duplicate location name encountered: {name}")]
    DuplicateLocation { name: String },

    /// Raised when a dataset row could not be interpreted.
    #[error("invalid record in {path} at line {line}: {message}")]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn not_converged(reason: impl Into<String>) -> Self {
        Error::NotConverged {
            reason: reason.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
