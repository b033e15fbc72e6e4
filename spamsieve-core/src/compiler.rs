//! compiler.rs - Builds and caches keyword automata.
//!
//! Building an automaton expands every keyword through the substitution table,
//! which is the expensive part of detector start-up. This module keeps a
//! process-wide cache of resolved automata keyed by everything that shapes
//! them (canonical keywords, substitution table, variant limits), so that
//! repeated engine construction from the same configuration is free.
//!
//! License: MIT OR APACHE 2.0

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use log::debug;

use crate::automaton::Automaton;
use crate::config::DetectorConfig;
use crate::errors::SpamSieveError;
use crate::substitution::SubstitutionTable;
use crate::variants::VariantLimits;

lazy_static! {
    /// Resolved automata, keyed by [`cache_key`].
    static ref AUTOMATON_CACHE: RwLock<HashMap<u64, Arc<Automaton>>> = RwLock::new(HashMap::new());
}

fn cache_key(keywords: &[String], table: &SubstitutionTable, limits: &VariantLimits) -> u64 {
    let mut hasher = DefaultHasher::new();
    keywords.hash(&mut hasher);
    table.hash(&mut hasher);
    limits.hash(&mut hasher);
    hasher.finish()
}

/// Builds a fresh automaton for `config`, bypassing the cache.
pub fn compile_automaton(config: &DetectorConfig) -> Result<Automaton, SpamSieveError> {
    let table = config.substitution_table()?;
    Automaton::build(config.canonical_keywords(), &table, &config.limits)
}

/// Returns the cached automaton for `config`, building it on first use.
pub fn get_or_compile_automaton(config: &DetectorConfig) -> Result<Arc<Automaton>, SpamSieveError> {
    let keywords = config.canonical_keywords();
    let table = config.substitution_table()?;
    let key = cache_key(&keywords, &table, &config.limits);

    {
        let cache = AUTOMATON_CACHE
            .read()
            .map_err(|_| SpamSieveError::Fatal("automaton cache lock poisoned".to_string()))?;
        if let Some(automaton) = cache.get(&key) {
            debug!("Serving automaton from cache for key: {}", key);
            return Ok(Arc::clone(automaton));
        }
    }

    debug!("Automaton not found in cache. Building now.");
    let automaton = Arc::new(Automaton::build(keywords, &table, &config.limits)?);

    let mut cache = AUTOMATON_CACHE
        .write()
        .map_err(|_| SpamSieveError::Fatal("automaton cache lock poisoned".to_string()))?;
    // Another thread may have raced us here; keep whichever landed first.
    let cached = cache.entry(key).or_insert_with(|| Arc::clone(&automaton));
    debug!("Cached automaton for key: {}", key);
    Ok(Arc::clone(cached))
}

/// Drops every cached automaton.
pub fn clear_automaton_cache() {
    if let Ok(mut cache) = AUTOMATON_CACHE.write() {
        cache.clear();
    }
}
