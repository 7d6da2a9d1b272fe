//! crates/gate/src/error.rs
//! Misuse errors surfaced by gate operations.

use thiserror::Error;

/// Result alias for fallible gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors raised by gate operations.
///
/// Every variant describes a programmer error that is surfaced immediately.
/// Chained condition and output calls never produce these; they are total.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GateError {
    /// The reserved aggregate category was defined explicitly.
    #[error("the reporting type \"{0}\" is reserved for turning on all reportings")]
    InvalidCategory(String),

    /// A binding was added under a name the gate already exposes.
    #[error("unable to add {0} function to the gate, because it already exists")]
    DuplicateBinding(String),

    /// The bit-flag registry has no free bits left.
    #[error("cannot define more than {limit} reporting types")]
    CategoryLimit {
        /// Maximum number of type categories.
        limit: u32,
    },

    /// An initialization URL could not be parsed.
    #[error("invalid initialization url: {0}")]
    InvalidUrl(String),
}
