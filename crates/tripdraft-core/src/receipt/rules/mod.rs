//! Rule-based field pickers for lodging receipts.

pub mod amounts;
pub mod patterns;

pub use amounts::{parse_amount, parse_count};
pub use patterns::*;

use regex::{Regex, RegexBuilder};

/// An ordered list of patterns for one receipt field.
///
/// Patterns are tried in declaration order and the first one that matches
/// anywhere in the text wins. All patterns are case-insensitive and `.`
/// matches newlines.
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    patterns: Vec<Regex>,
}

impl FieldRule {
    /// Compile a rule from pattern sources.
    pub fn new(name: &'static str, sources: &[&str]) -> Result<Self, regex::Error> {
        let patterns = sources
            .iter()
            .map(|source| {
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, patterns })
    }

    /// Field name this rule extracts.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of patterns in the rule.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pick the field from text.
    ///
    /// The value is the first capture group when the winning pattern has one
    /// (and it took part in the match), otherwise the whole match. It is
    /// trimmed either way.
    pub fn pick(&self, text: &str) -> Option<ExtractionMatch<String>> {
        self.patterns.iter().enumerate().find_map(|(index, pattern)| {
            let caps = pattern.captures(text)?;
            let whole = caps.get(0)?;
            let value = caps.get(1).unwrap_or(whole);

            Some(
                ExtractionMatch::new(value.as_str().trim().to_string(), index, whole.as_str())
                    .with_position(value.start(), value.end()),
            )
        })
    }
}

/// A picked field value with the context it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the winning pattern within its rule.
    pub pattern: usize,
    /// Byte span of the value in the source text.
    pub position: Option<(usize, usize)>,
    /// Whole text matched by the pattern.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, pattern: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            pattern,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Convert the value, dropping the match when conversion fails.
    pub fn try_map<U>(self, f: impl FnOnce(&T) -> Option<U>) -> Option<ExtractionMatch<U>> {
        let value = f(&self.value)?;
        Some(ExtractionMatch {
            value,
            pattern: self.pattern,
            position: self.position,
            source: self.source,
        })
    }
}
