//! Pattern normalisation
//!
//! Turns whatever the user supplied as patterns into a non-empty, ordered
//! [`PatternSet`]. Bad input never fails; it falls back to
//! [`DEFAULT_PATTERN`](crate::constants::DEFAULT_PATTERN).

use std::slice::Iter;

use log::debug;
use serde::Deserialize;
use serde_yaml::Value;

use crate::constants::DEFAULT_PATTERN;
use crate::outcome::{Diagnostic, Normalized, Stage};

/// Raw pattern argument as received from the command line or a config file
///
/// Config files are free-form, so a list may hold values that are not strings
/// at all, and the whole entry may be a number or a mapping.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(untagged)]
pub enum PatternInput {
    /// Nothing supplied
    #[default]
    Absent,
    /// A single pattern
    Single(String),
    /// A sequence of values, only the non-blank strings of which are used
    List(Vec<Value>),
    /// Anything else
    Other(Value),
}

impl From<&str> for PatternInput {
    fn from(pattern: &str) -> Self {
        PatternInput::Single(pattern.to_string())
    }
}

impl From<String> for PatternInput {
    fn from(pattern: String) -> Self {
        PatternInput::Single(pattern)
    }
}

impl From<Vec<String>> for PatternInput {
    fn from(patterns: Vec<String>) -> Self {
        PatternInput::List(patterns.into_iter().map(Value::String).collect())
    }
}

impl From<Vec<&str>> for PatternInput {
    fn from(patterns: Vec<&str>) -> Self {
        PatternInput::List(
            patterns
                .into_iter()
                .map(|p| Value::String(p.to_string()))
                .collect(),
        )
    }
}

/// Ordered, never-empty list of glob patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet(Vec<String>);

impl PatternSet {
    /// The set containing only the default pattern
    pub fn fallback() -> Self {
        PatternSet(vec![DEFAULT_PATTERN.to_string()])
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a string contains at least one non-whitespace character
fn is_usable(pattern: &str) -> bool {
    !pattern.trim().is_empty()
}

fn fallback(reason: &str) -> Normalized<PatternSet> {
    Normalized::recovered(
        PatternSet::fallback(),
        Diagnostic::new(
            Stage::Patterns,
            format!("{reason}; using default pattern '{DEFAULT_PATTERN}'"),
        ),
    )
}

/// Normalises a raw pattern argument into a [`PatternSet`]
///
/// - a non-blank string becomes a one-element set, unchanged
/// - a list keeps its non-blank string elements in order
/// - anything else, or a list without usable strings, yields the default
pub fn normalize_patterns(input: &PatternInput) -> Normalized<PatternSet> {
    let normalized = match input {
        PatternInput::Single(pattern) if is_usable(pattern) => {
            Normalized::clean(PatternSet(vec![pattern.clone()]))
        }
        PatternInput::Single(_) => fallback("pattern is blank"),
        PatternInput::Absent => fallback("no pattern given"),
        PatternInput::Other(value) => fallback(&format!(
            "pattern must be a string or a list of strings, got {value:?}"
        )),
        PatternInput::List(items) => {
            let kept: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .filter(|pattern| is_usable(pattern))
                .map(str::to_string)
                .collect();

            let ignored = items.len() - kept.len();
            if kept.is_empty() {
                fallback("pattern list holds no usable strings")
            } else if ignored > 0 {
                Normalized::recovered(
                    PatternSet(kept),
                    Diagnostic::new(
                        Stage::Patterns,
                        format!("ignored {ignored} blank or non-string pattern(s)"),
                    ),
                )
            } else {
                Normalized::clean(PatternSet(kept))
            }
        }
    };

    debug!("Using patterns: {:?}", normalized.value.as_slice());
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(input: PatternInput) -> Vec<String> {
        normalize_patterns(&input).value.into_vec()
    }

    #[test]
    fn test_single_string_is_wrapped() {
        for pattern in ["lang/*.json", "x", " padded/*.json "] {
            assert_eq!(patterns(pattern.into()), vec![pattern.to_string()]);
        }
    }

    #[test]
    fn test_unusable_input_falls_back() {
        let inputs = vec![
            PatternInput::from(""),
            PatternInput::from("   \t"),
            PatternInput::Absent,
            PatternInput::Other(Value::from(42)),
            PatternInput::Other(Value::Bool(true)),
            PatternInput::List(Vec::new()),
            PatternInput::List(vec![Value::from(1), Value::Null, Value::from("  ")]),
        ];

        for input in inputs {
            let normalized = normalize_patterns(&input);
            assert_eq!(normalized.value, PatternSet::fallback(), "input: {input:?}");
            assert!(!normalized.value.is_empty());
            assert!(normalized.is_degraded());
        }
    }

    #[test]
    fn test_list_keeps_non_blank_strings_in_order() {
        let input = PatternInput::from(vec!["", "a/*.json", "  ", "b/*.json"]);
        let normalized = normalize_patterns(&input);

        assert_eq!(normalized.value.as_slice(), ["a/*.json", "b/*.json"]);
        assert_eq!(normalized.diagnostics.len(), 1);
        assert!(normalized.diagnostics[0].message.contains("ignored 2"));
    }

    #[test]
    fn test_clean_list_has_no_diagnostics() {
        let input = PatternInput::from(vec!["a/*.json".to_string(), "b/*.json".to_string()]);
        let normalized = normalize_patterns(&input);

        assert!(!normalized.is_degraded());
        assert_eq!(normalized.value.len(), 2);
        assert!(!normalized.value.is_empty());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let input: PatternInput = serde_yaml::from_str("lang/*.json").unwrap();
        assert_eq!(input, PatternInput::from("lang/*.json"));

        let input: PatternInput = serde_yaml::from_str("[a.json, 3, '']").unwrap();
        assert_eq!(patterns(input), vec!["a.json".to_string()]);

        let input: PatternInput = serde_yaml::from_str("~").unwrap();
        assert_eq!(input, PatternInput::Absent);

        let input: PatternInput = serde_yaml::from_str("{key: value}").unwrap();
        assert!(matches!(input, PatternInput::Other(_)));
    }
}
