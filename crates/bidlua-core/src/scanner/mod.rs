//! Skip-aware keyword substitution.
//!
//! One left-to-right pass over the text. At every position the protected
//! region rules are checked first; a region is copied through its closer
//! untouched. Outside regions the longest matching mapping pattern is
//! replaced, and anything else is copied one character at a time.

mod region;

pub use region::{match_region, RegionRule, REGION_RULES};

use std::collections::HashMap;

use tracing::{debug, debug_span};

use crate::mapping::{Direction, Mapping};

/// A mapping prepared for one direction.
///
/// Patterns are bucketed by their first character. Each bucket keeps the
/// global descending-length order, so the first hit in a bucket is the
/// longest pattern that matches.
pub struct Substituter<'m> {
    direction: Direction,
    patterns: Vec<(&'m str, &'m str)>,
    by_first_char: HashMap<char, Vec<usize>>,
}

impl<'m> Substituter<'m> {
    pub fn new(mapping: &'m Mapping, direction: Direction) -> Self {
        let patterns = mapping.patterns(direction);
        let mut by_first_char: HashMap<char, Vec<usize>> = HashMap::new();
        for (idx, (pattern, _)) in patterns.iter().enumerate() {
            if let Some(first) = pattern.chars().next() {
                by_first_char.entry(first).or_default().push(idx);
            }
        }
        Self {
            direction,
            patterns,
            by_first_char,
        }
    }

    pub fn substitute(&self, text: &str) -> String {
        let _span = debug_span!(
            "substitute",
            direction = ?self.direction,
            len = text.len(),
            patterns = self.patterns.len()
        )
        .entered();

        let mut out = String::with_capacity(text.len());
        let mut regions = 0usize;
        let mut replaced = 0usize;
        let mut i = 0;

        while i < text.len() {
            let rest = &text[i..];

            if let Some(rule) = match_region(rest) {
                let end = rule.end(text, i);
                out.push_str(&text[i..end]);
                i = end;
                regions += 1;
                continue;
            }

            if let Some((len, replacement)) = self.longest_match(rest) {
                out.push_str(replacement);
                i += len;
                replaced += 1;
                continue;
            }

            let Some(c) = rest.chars().next() else {
                break;
            };
            out.push(c);
            i += c.len_utf8();
        }

        debug!(regions, replaced, out_len = out.len());
        out
    }

    /// Byte length of the matched pattern and its replacement.
    fn longest_match(&self, rest: &str) -> Option<(usize, &'m str)> {
        let first = rest.chars().next()?;
        self.by_first_char
            .get(&first)?
            .iter()
            .map(|&idx| self.patterns[idx])
            .find(|(pattern, _)| rest.starts_with(pattern))
            .map(|(pattern, replacement)| (pattern.len(), replacement))
    }
}

/// Rewrite `text` with `mapping`, leaving protected regions untouched.
pub fn substitute(text: &str, mapping: &Mapping, direction: Direction) -> String {
    Substituter::new(mapping, direction).substitute(text)
}
