//! Error types for tree construction and code enumeration.

use std::collections::TryReserveError;
use thiserror::Error;

/// Error variants for building Huffman trees and enumerating their codes.
#[derive(Debug, Error)]
pub enum Error {
    /// A traversal stack or code buffer could not be reserved.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// No symbols were supplied.
    #[error("symbol table is empty")]
    EmptyAlphabet,

    /// The summed frequencies do not fit in a u64.
    #[error("total symbol weight overflows u64")]
    WeightOverflow,
}

impl Error {
    /// True for the input-validation errors, which are raised before anything is allocated.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::EmptyAlphabet | Error::WeightOverflow)
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
