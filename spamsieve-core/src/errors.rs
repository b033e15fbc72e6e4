//! errors.rs - Custom error types for the spamsieve-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `spamsieve-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpamSieveError {
    /// A keyword was empty (or became empty after trimming). A zero-length
    /// pattern would match at every position of every text.
    #[error("Empty keyword supplied; a zero-length keyword would match at every position")]
    EmptyKeyword,

    /// Expanding a keyword through the substitution table would produce more
    /// spellings than the configured cap allows.
    #[error("Keyword '{keyword}' expands to more than {limit} variants (reached {reached} after {position} of {length} characters)")]
    VariantLimitExceeded {
        keyword: String,
        limit: usize,
        reached: usize,
        position: usize,
        length: usize,
    },

    /// A substitution table entry could not be interpreted.
    #[error("Invalid substitution entry '{0}': {1}")]
    InvalidSubstitution(String, String),

    #[error("Failed to compile heuristic pattern '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
