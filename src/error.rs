//! Error types for graph construction and analysis

use thiserror::Error;

/// Failures surfaced by the graph builder, metrics engine and community detector.
///
/// These are scoped to a single analysis request; callers decide how to
/// report them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No paper records and no seed author: nothing to build.
    #[error("no paper records and no seed author provided")]
    EmptyInput,

    /// A metric or community computation was requested on a graph with zero nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The minimum co-authorship count must be at least 1.
    #[error("minimum co-authorship count must be >= 1, got {value}")]
    InvalidThreshold { value: usize },

    /// An author list handed to the graph constructor names someone twice.
    #[error("author {name:?} is listed more than once")]
    DuplicateAuthor { name: String },

    /// A named edge violates the graph invariants.
    #[error("invalid co-authorship edge {from:?} -- {to:?}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: &'static str,
    },
}
