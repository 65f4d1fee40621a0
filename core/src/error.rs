use thiserror::Error;

/// Failures the ranking core reports to its caller. Empty corpora and queries
/// that match nothing are normal outcomes, not errors, and never appear here.
#[derive(Error, Debug)]
pub enum TalentError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unsafe identifier: {0:?} leaves no usable file name")]
    UnsafeIdentifier(String),
}
