//! Top-level connective detection.

use super::paren::{ParenSet, scan_group};
use super::{Separator, Span};

/// Which connectives appear at the top level of an expression.
///
/// Both flags may be set; the classifier reports a mixed expression rather
/// than resolving precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connectives {
    /// `" and "` occurs outside every parenthesized group.
    pub conjunction: bool,
    /// `" or "` occurs outside every parenthesized group.
    pub disjunction: bool,
}

impl Connectives {
    /// Whether any top-level connective was found.
    #[must_use]
    pub const fn any(self) -> bool {
        self.conjunction || self.disjunction
    }
}

/// Detect the connectives used at the top level of `text`.
///
/// Parenthesized groups are skipped whole. An unclosed group swallows the
/// rest of the text instead of failing; only flags found before it count.
///
/// # Examples
/// ```
/// use spdx_tag::{Connectives, conj_or_disj_set};
/// assert_eq!(
///     conj_or_disj_set("(a and b) or c"),
///     Connectives { conjunction: false, disjunction: true }
/// );
/// ```
#[must_use]
pub fn conj_or_disj_set(text: &str) -> Connectives {
    classify_span(text, Span::of(text))
}

pub(crate) fn classify_span(text: &str, span: Span) -> Connectives {
    let bytes = text.as_bytes();
    let mut found = Connectives::default();
    let mut pos = span.start;

    while pos < span.end {
        if bytes.get(pos) == Some(&b'(') {
            match scan_group(bytes, pos, span.end) {
                ParenSet::Matched { close, .. } => {
                    pos = close + 1;
                    continue;
                }
                ParenSet::Unclosed { .. } | ParenSet::Absent => break,
            }
        }
        if Separator::And.matches_at(bytes, pos) {
            found.conjunction = true;
        } else if Separator::Or.matches_at(bytes, pos) {
            found.disjunction = true;
        }
        pos += 1;
    }
    found
}
