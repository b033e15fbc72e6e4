//! Variant generation: expands a canonical keyword into every spelling
//! reachable by independent per-position substitution.
//!
//! The number of spellings is the product of the alternative counts of each
//! position, so expansion is capped. The cap is checked after every position,
//! so an oversized keyword is rejected before its full expansion is ever
//! materialised.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::SpamSieveError;
use crate::substitution::SubstitutionTable;

/// Default upper bound on the number of spellings a single keyword may expand to.
pub const DEFAULT_MAX_VARIANTS_PER_KEYWORD: usize = 4096;

/// Resource limits applied while expanding keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct VariantLimits {
    pub max_variants_per_keyword: usize,
}

impl Default for VariantLimits {
    fn default() -> Self {
        Self {
            max_variants_per_keyword: DEFAULT_MAX_VARIANTS_PER_KEYWORD,
        }
    }
}

/// Generates all spellings of `keyword` permitted by `table`.
///
/// `keyword` is expected in canonical form (see [`crate::normalize::canonicalize`]).
/// Every returned variant has exactly as many characters as `keyword`.
///
/// # Errors
/// * [`SpamSieveError::EmptyKeyword`] if `keyword` is empty.
/// * [`SpamSieveError::VariantLimitExceeded`] as soon as a partial expansion
///   would exceed `limits.max_variants_per_keyword`.
pub fn generate_variants(
    keyword: &str,
    table: &SubstitutionTable,
    limits: &VariantLimits,
) -> Result<BTreeSet<String>, SpamSieveError> {
    let chars: Vec<char> = keyword.chars().collect();
    if chars.is_empty() {
        return Err(SpamSieveError::EmptyKeyword);
    }

    let limit = limits.max_variants_per_keyword;
    let mut partials: Vec<String> = vec![String::with_capacity(keyword.len())];

    for (position, ch) in chars.iter().enumerate() {
        let alternatives = match table.get(*ch) {
            Some(alts) => alts,
            None => std::slice::from_ref(ch),
        };

        let projected = partials.len().saturating_mul(alternatives.len());
        if projected > limit {
            return Err(SpamSieveError::VariantLimitExceeded {
                keyword: keyword.to_string(),
                limit,
                reached: projected,
                position: position + 1,
                length: chars.len(),
            });
        }

        if alternatives.len() == 1 {
            for prefix in partials.iter_mut() {
                prefix.push(alternatives[0]);
            }
            continue;
        }

        let mut next = Vec::with_capacity(projected);
        for prefix in &partials {
            for alt in alternatives {
                let mut extended = String::with_capacity(prefix.len() + alt.len_utf8());
                extended.push_str(prefix);
                extended.push(*alt);
                next.push(extended);
            }
        }
        partials = next;
    }

    Ok(partials.into_iter().collect())
}

/// Number of spellings `keyword` would expand to, saturating at `usize::MAX`.
pub fn variant_count(keyword: &str, table: &SubstitutionTable) -> usize {
    keyword
        .chars()
        .map(|c| table.get(c).map_or(1, <[char]>::len))
        .fold(1usize, usize::saturating_mul)
}
