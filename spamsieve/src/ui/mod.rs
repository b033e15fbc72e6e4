//! Terminal rendering helpers.

pub mod output;
