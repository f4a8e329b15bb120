//! Licence-expression scanning: parenthesis matching, connective
//! classification, top-level splitting and licence-set trees.
//!
//! Everything here works on byte offsets into the caller's text. Nested
//! groups are skipped by jumping to their matching close rather than by
//! slicing and rescanning, so deeply nested expressions stay linear.

mod classify;
mod paren;
mod split;
mod tree;

use std::fmt;

pub use classify::{Connectives, conj_or_disj_set};
pub use paren::{ParenSet, find_matching_paren_set, find_matching_paren_set_from};
pub use split::split_licence_set;
pub use tree::{LicenceTree, MAX_NESTING_DEPTH};

/// A top-level licence connective.
///
/// Separators are the fixed literals `" and "` and `" or "`; the surrounding
/// spaces keep them from matching inside identifiers such as `Mandoc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// Conjunction, written `" and "`.
    And,
    /// Disjunction, written `" or "`.
    Or,
}

impl Separator {
    /// The literal token, including its surrounding spaces.
    ///
    /// # Examples
    /// ```
    /// use spdx_tag::Separator;
    /// assert_eq!(Separator::And.as_str(), " and ");
    /// assert_eq!(Separator::Or.as_str(), " or ");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => " and ",
            Self::Or => " or ",
        }
    }

    /// The bare keyword without spaces.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    pub(crate) fn matches_at(self, bytes: &[u8], pos: usize) -> bool {
        bytes
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(self.as_str().as_bytes()))
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Half-open byte range into an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub(crate) const fn of(text: &str) -> Self {
        Self::new(0, text.len())
    }

    pub(crate) fn slice(self, text: &str) -> &str {
        text.get(self.start..self.end).unwrap_or_default()
    }

    /// Shrink the span past leading and trailing whitespace.
    pub(crate) fn trim(self, text: &str) -> Self {
        let raw = self.slice(text);
        let start = self.start + (raw.len() - raw.trim_start().len());
        Self::new(start, start + raw.trim().len())
    }

    pub(crate) const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_span_in_place() {
        let text = "x  and ( y ) ";
        let span = Span::new(6, text.len()).trim(text);
        assert_eq!(span, Span::new(7, 12));
        assert_eq!(span.slice(text), "( y )");
    }

    #[test]
    fn whitespace_only_span_trims_to_empty() {
        let text = "a   b";
        assert!(Span::new(1, 4).trim(text).is_empty());
    }

    #[test]
    fn separator_requires_surrounding_spaces() {
        let bytes = b"Mandoc or BSD";
        assert!(!Separator::And.matches_at(bytes, 1));
        assert!(Separator::Or.matches_at(bytes, 6));
    }

    #[test]
    fn displays_bare_keyword() {
        assert_eq!(Separator::Or.to_string(), "or");
    }
}
