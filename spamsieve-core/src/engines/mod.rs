//! Concrete `DetectionEngine` implementations.
//!
//! Each engine lives in its own file and implements the trait from
//! [`crate::engine`].
//!
//! License: MIT OR APACHE 2.0

pub mod heuristic_engine;
pub mod keyword_engine;
