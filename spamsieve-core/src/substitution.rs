//! The leetspeak substitution table.
//!
//! Maps a canonical (lower-case) character to the ordered set of characters
//! that may stand in for it. The character itself is always the first
//! alternative; characters without an entry only match themselves.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::errors::SpamSieveError;
use crate::normalize::fold_single;

/// Built-in look-alike substitutions for the letters spammers most often
/// disguise: the vowels plus `s`, `l` and `t`.
pub const DEFAULT_SUBSTITUTIONS: &[(char, &[char])] = &[
    ('a', &['a', '@', '4']),
    ('e', &['e', '3']),
    ('i', &['i', '1', '!']),
    ('l', &['l', '1', '|']),
    ('o', &['o', '0']),
    ('s', &['s', '$', '5']),
    ('t', &['t', '7', '+']),
    ('u', &['u', 'v']),
];

/// An immutable-after-construction mapping from a character to its stand-ins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SubstitutionTable {
    entries: BTreeMap<char, Vec<char>>,
}

impl SubstitutionTable {
    /// Creates a table with no substitutions: every character matches only itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the built-in leetspeak table (see [`DEFAULT_SUBSTITUTIONS`]).
    pub fn leetspeak() -> Self {
        let mut table = Self::empty();
        for (ch, stand_ins) in DEFAULT_SUBSTITUTIONS {
            table.insert(*ch, stand_ins.iter().copied());
        }
        table
    }

    /// Adds (or replaces) the alternatives for `ch`.
    ///
    /// Both the key and the stand-ins are case-folded, the key is placed
    /// first, and repeated stand-ins are dropped while keeping their order.
    /// Characters whose lowercase form spans several characters are skipped:
    /// an entry keyed by one is ignored entirely.
    pub fn insert<I>(&mut self, ch: char, stand_ins: I) -> &mut Self
    where
        I: IntoIterator<Item = char>,
    {
        let Some(key) = fold_single(ch) else {
            warn!("Ignoring substitutions for '{}': it does not lowercase to a single character.", ch);
            return self;
        };
        let mut alternatives = vec![key];
        for stand_in in stand_ins {
            match fold_single(stand_in) {
                Some(folded) if !alternatives.contains(&folded) => alternatives.push(folded),
                Some(_) => {}
                None => warn!(
                    "Ignoring stand-in '{}' for '{}': it does not lowercase to a single character.",
                    stand_in, key
                ),
            }
        }
        self.entries.insert(key, alternatives);
        self
    }

    /// Builds a table from the string form used in YAML configuration,
    /// where every key and every stand-in must be exactly one character.
    pub fn from_config_map(map: &BTreeMap<String, Vec<String>>) -> Result<Self, SpamSieveError> {
        let mut table = Self::empty();
        for (key, stand_ins) in map {
            let ch = single_char(key).ok_or_else(|| {
                SpamSieveError::InvalidSubstitution(key.clone(), "key must be exactly one character".to_string())
            })?;
            if fold_single(ch).is_none() {
                return Err(SpamSieveError::InvalidSubstitution(
                    key.clone(),
                    "key must lowercase to exactly one character".to_string(),
                ));
            }
            if stand_ins.is_empty() {
                return Err(SpamSieveError::InvalidSubstitution(
                    key.clone(),
                    "stand-in list must not be empty".to_string(),
                ));
            }
            let mut chars = Vec::with_capacity(stand_ins.len());
            for stand_in in stand_ins {
                let c = single_char(stand_in).ok_or_else(|| {
                    SpamSieveError::InvalidSubstitution(
                        key.clone(),
                        format!("stand-in '{}' must be exactly one character", stand_in),
                    )
                })?;
                if fold_single(c).is_none() {
                    return Err(SpamSieveError::InvalidSubstitution(
                        key.clone(),
                        format!("stand-in '{}' must lowercase to exactly one character", stand_in),
                    ));
                }
                chars.push(c);
            }
            table.insert(ch, chars);
        }
        debug!("Built substitution table with {} entries.", table.len());
        Ok(table)
    }

    /// Converts the table back into the YAML string form.
    pub fn to_config_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|(k, alts)| (k.to_string(), alts.iter().map(char::to_string).collect()))
            .collect()
    }

    /// The alternatives registered for `ch`, if any. The first element is `ch` itself.
    pub fn get(&self, ch: char) -> Option<&[char]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[char])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leetspeak_covers_vowels_and_common_consonants() {
        let table = SubstitutionTable::leetspeak();
        for ch in ['a', 'e', 'i', 'o', 'u', 's', 'l', 't'] {
            let alts = table.get(ch).expect("missing default entry");
            assert_eq!(alts[0], ch);
            assert!(alts.len() > 1);
        }
        assert!(table.get('x').is_none());
    }

    #[test]
    fn test_insert_folds_and_deduplicates() {
        let mut table = SubstitutionTable::empty();
        table.insert('E', ['3', 'E', '3', 'e']);
        assert_eq!(table.get('e'), Some(&['e', '3'][..]));
    }

    #[test]
    fn test_from_config_map_rejects_multi_char_entries() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), vec!["/\\".to_string()]);
        let err = SubstitutionTable::from_config_map(&map).unwrap_err();
        assert!(matches!(err, SpamSieveError::InvalidSubstitution(..)));

        let mut map = BTreeMap::new();
        map.insert("ab".to_string(), vec!["4".to_string()]);
        assert!(SubstitutionTable::from_config_map(&map).is_err());

        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Vec::new());
        assert!(SubstitutionTable::from_config_map(&map).is_err());
    }

    #[test]
    fn test_multi_char_lowercase_stand_ins_are_rejected() {
        let mut map = BTreeMap::new();
        map.insert("i".to_string(), vec!["i".to_string(), "İ".to_string()]);
        let err = SubstitutionTable::from_config_map(&map).unwrap_err();
        assert!(matches!(err, SpamSieveError::InvalidSubstitution(..)));

        let mut map = BTreeMap::new();
        map.insert("İ".to_string(), vec!["1".to_string()]);
        assert!(SubstitutionTable::from_config_map(&map).is_err());

        let mut table = SubstitutionTable::empty();
        table.insert('i', ['İ', '1']).insert('İ', ['!']);
        assert_eq!(table.get('i'), Some(&['i', '1'][..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_config_map_round_trip_preserves_order() {
        let table = SubstitutionTable::leetspeak();
        let rebuilt = SubstitutionTable::from_config_map(&table.to_config_map()).unwrap();
        assert_eq!(rebuilt, table);
    }
}
