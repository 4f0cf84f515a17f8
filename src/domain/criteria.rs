//! Watch-order filter criteria and their compiled, query-ready form.
//!
//! A user's stored [`FilterProperties`] are loose per-dimension value
//! lists. [`FilterProperties::compile`] normalizes them into a
//! [`Criteria`] value with explicit sets: excluded part identifiers are
//! folded into the part set as `!`-negated members so the downstream
//! marketplace query sees a single, deterministically ordered part list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Prefix marking a part identifier as excluded.
const NEGATION: char = '!';

/// A user's stored filter dimensions, one-or-more accepted values each.
///
/// Insertion order within a dimension carries no meaning; values within
/// a dimension are a set. Absent dimensions are simply left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterProperties {
    /// Accepted asset classes.
    #[serde(default)]
    pub classes: Vec<String>,
    /// Required part identifiers. May already contain `!`-negated entries.
    #[serde(default)]
    pub parts: Vec<String>,
    /// Part identifiers to exclude, merged into `parts` at compile time.
    #[serde(default)]
    pub exclude_parts: Vec<String>,
    /// Accepted breed-count buckets, stored as strings.
    #[serde(default)]
    pub breed_count: Vec<String>,
    /// Accepted pureness buckets, stored as strings.
    #[serde(default)]
    pub pureness: Vec<String>,
}

impl FilterProperties {
    /// Compile the stored properties into normalized query criteria.
    ///
    /// Compilation is pure: equal inputs always compile to equal
    /// criteria. Absent dimensions are omitted. The only failure mode is
    /// a non-numeric value in a numeric bucket dimension, which is
    /// surfaced to the caller rather than silently dropped.
    pub fn compile(&self) -> Result<Criteria, DomainError> {
        let mut parts: BTreeSet<String> =
            self.parts.iter().map(|p| p.trim().to_string()).collect();
        parts.remove("");

        for excluded in &self.exclude_parts {
            let excluded = excluded.trim();
            if excluded.is_empty() {
                continue;
            }
            let negated = negate(excluded);
            let positive = positive_form(excluded);
            // Rewrite an included part in place; otherwise append.
            parts.remove(positive);
            parts.insert(negated);
        }

        Ok(Criteria {
            classes: self
                .classes
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            parts,
            breed_count: parse_buckets(&self.breed_count, "breed_count")?,
            pureness: parse_buckets(&self.pureness, "pureness")?,
        })
    }
}

/// Compiled, query-ready criteria with explicit optional sets.
///
/// Excluded parts are negated members of [`Criteria::parts`], never a
/// separate list; `BTreeSet` iteration gives the downstream query a
/// stable ordering contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Accepted asset classes.
    pub classes: BTreeSet<String>,
    /// Part identifiers; excluded parts carry a `!` prefix.
    pub parts: BTreeSet<String>,
    /// Accepted breed-count buckets.
    pub breed_count: BTreeSet<u8>,
    /// Accepted pureness buckets.
    pub pureness: BTreeSet<u8>,
}

impl Criteria {
    /// Lower compiled criteria back to storable filter properties.
    ///
    /// Negated parts stay inline in `parts`; re-compiling the result
    /// yields criteria equal to `self`.
    #[must_use]
    pub fn to_filter_properties(&self) -> FilterProperties {
        FilterProperties {
            classes: self.classes.iter().cloned().collect(),
            parts: self.parts.iter().cloned().collect(),
            exclude_parts: Vec::new(),
            breed_count: self.breed_count.iter().map(u8::to_string).collect(),
            pureness: self.pureness.iter().map(u8::to_string).collect(),
        }
    }
}

/// Negate a part identifier. Already-negated identifiers pass through
/// unchanged, so negation never stacks.
fn negate(part: &str) -> String {
    if part.starts_with(NEGATION) {
        part.to_string()
    } else {
        format!("{NEGATION}{part}")
    }
}

/// Strip the negation prefix, if any.
fn positive_form(part: &str) -> &str {
    part.strip_prefix(NEGATION).unwrap_or(part)
}

fn parse_buckets(values: &[String], dimension: &'static str) -> Result<BTreeSet<u8>, DomainError> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u8>().map_err(|_| DomainError::NonNumericBucket {
                dimension,
                value: v.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(parts: &[&str], exclude: &[&str]) -> FilterProperties {
        FilterProperties {
            parts: parts.iter().map(|s| s.to_string()).collect(),
            exclude_parts: exclude.iter().map(|s| s.to_string()).collect(),
            ..FilterProperties::default()
        }
    }

    #[test]
    fn exclusion_rewrites_included_part_in_place() {
        let criteria = props(&["mouth-goda", "ears-nimo"], &["mouth-goda"])
            .compile()
            .unwrap();

        assert!(criteria.parts.contains("!mouth-goda"));
        assert!(!criteria.parts.contains("mouth-goda"));
        assert!(criteria.parts.contains("ears-nimo"));
    }

    #[test]
    fn exclusion_of_unknown_part_is_appended() {
        let criteria = props(&["ears-nimo"], &["tail-koi"]).compile().unwrap();

        assert_eq!(
            criteria.parts.iter().collect::<Vec<_>>(),
            ["!tail-koi", "ears-nimo"]
        );
    }

    #[test]
    fn negation_never_stacks() {
        let criteria = props(&["!mouth-goda"], &["mouth-goda", "!mouth-goda"])
            .compile()
            .unwrap();

        assert_eq!(criteria.parts.iter().collect::<Vec<_>>(), ["!mouth-goda"]);
    }

    #[test]
    fn compile_is_pure_and_deterministic() {
        let p = FilterProperties {
            classes: vec!["beast".into(), "aqua".into()],
            parts: vec!["b".into(), "a".into()],
            exclude_parts: vec!["c".into()],
            breed_count: vec!["0".into(), "1".into()],
            pureness: vec!["6".into()],
        };

        assert_eq!(p.compile().unwrap(), p.compile().unwrap());
    }

    #[test]
    fn compiled_criteria_round_trip_without_double_negation() {
        let original = props(&["ears-nimo"], &["mouth-goda"]).compile().unwrap();
        let round_tripped = original.to_filter_properties().compile().unwrap();

        assert_eq!(round_tripped, original);
    }

    #[test]
    fn absent_dimensions_compile_to_empty_sets() {
        let criteria = FilterProperties::default().compile().unwrap();
        assert_eq!(criteria, Criteria::default());
    }

    #[test]
    fn non_numeric_bucket_is_a_compile_error() {
        let p = FilterProperties {
            breed_count: vec!["virgin".into()],
            ..FilterProperties::default()
        };

        assert_eq!(
            p.compile().unwrap_err(),
            DomainError::NonNumericBucket {
                dimension: "breed_count",
                value: "virgin".into(),
            }
        );
    }

    #[test]
    fn buckets_parse_to_sorted_sets() {
        let p = FilterProperties {
            pureness: vec!["6".into(), "3".into(), "6".into()],
            ..FilterProperties::default()
        };

        let criteria = p.compile().unwrap();
        assert_eq!(criteria.pureness.iter().collect::<Vec<_>>(), [&3, &6]);
    }
}
