//! Error types for grammar compilation, expansion and interpretation.

use crate::path::DrawingPath;
use std::fmt;
use thiserror::Error;

/// The bounded resource named by [`LsysError::ResourceLimitExceeded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// Number of symbols in a generation of the working string.
    Symbols,
    /// Depth of the turtle branch stack.
    StackDepth,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Symbols => write!(f, "expanded symbol count"),
            Resource::StackDepth => write!(f, "branch stack depth"),
        }
    }
}

/// Every failure the pipeline can report.
#[derive(Debug, Error)]
pub enum LsysError {
    /// Malformed rule clause, duplicate head, or out-of-range parameter.
    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),

    /// A pop symbol was met while the branch stack was empty.
    ///
    /// `partial` holds every primitive emitted before the offending symbol.
    #[error("unbalanced branch: pop with empty stack at symbol {index}")]
    UnbalancedBranch { index: usize, partial: DrawingPath },

    /// A configured ceiling would be crossed.
    #[error("{resource} limit exceeded: {requested} > {limit}")]
    ResourceLimitExceeded {
        resource: Resource,
        limit: u128,
        requested: u128,
    },

    /// The catalog holds no grammar under this name.
    #[error("unknown grammar: {0}")]
    UnknownGrammar(String),

    /// The catalog document could not be parsed.
    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LsysError>;
