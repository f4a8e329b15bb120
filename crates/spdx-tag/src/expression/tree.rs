//! Licence sets built from expressions.

use std::fmt;
use std::str::FromStr;

use crate::errors::FieldError;

use super::classify::classify_span;
use super::paren::{ParenSet, scan_group};
use super::split::operand_spans;
use super::{Separator, Span};

/// Deepest parenthesis nesting [`LicenceTree::parse`] accepts.
///
/// Parsing recurses once per level; deeper input fails with
/// [`FieldError::NestingTooDeep`] before any recursion starts.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A licence expression resolved into nested licence sets.
///
/// Each level holds a single connective. An expression such as
/// `a and b or c` is rejected because the record schema carries no
/// precedence; it must be written `(a and b) or c`.
///
/// # Examples
/// ```
/// use spdx_tag::LicenceTree;
/// let tree: LicenceTree = "MIT or (Apache-2.0 and BSD-3-Clause)"
///     .parse()
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(
///     tree,
///     LicenceTree::Disjunctive(vec![
///         LicenceTree::Reference("MIT".into()),
///         LicenceTree::Conjunctive(vec![
///             LicenceTree::Reference("Apache-2.0".into()),
///             LicenceTree::Reference("BSD-3-Clause".into()),
///         ]),
///     ])
/// );
/// assert_eq!(tree.to_string(), "MIT or (Apache-2.0 and BSD-3-Clause)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LicenceTree {
    /// A single licence identifier.
    Reference(String),
    /// All operands apply.
    Conjunctive(Vec<LicenceTree>),
    /// Any one operand applies.
    Disjunctive(Vec<LicenceTree>),
}

impl LicenceTree {
    /// Parse a licence expression.
    ///
    /// # Errors
    /// Returns [`FieldError::MixedConnectives`] when one level uses both
    /// connectives, [`FieldError::EmptyOperand`] for a missing operand,
    /// [`FieldError::NestingTooDeep`] past [`MAX_NESTING_DEPTH`] levels, and a
    /// parenthesis error when grouping is malformed. Byte positions refer to
    /// `text`.
    pub fn parse(text: &str) -> Result<Self, FieldError> {
        let groups = Groups::index(text)?;
        parse_span(text, &groups, Span::of(text))
    }

    /// The connective joining this level, if it is a set.
    #[must_use]
    pub const fn separator(&self) -> Option<Separator> {
        match self {
            Self::Reference(_) => None,
            Self::Conjunctive(_) => Some(Separator::And),
            Self::Disjunctive(_) => Some(Separator::Or),
        }
    }

    /// Every licence identifier in the tree, left to right.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a str>) {
        match self {
            Self::Reference(id) => found.push(id),
            Self::Conjunctive(operands) | Self::Disjunctive(operands) => {
                for operand in operands {
                    operand.collect_references(found);
                }
            }
        }
    }
}

/// Close offsets of every balanced group, indexed once per expression.
struct Groups {
    /// `(open, close)` pairs sorted by `open`.
    pairs: Vec<(usize, usize)>,
}

impl Groups {
    fn index(text: &str) -> Result<Self, FieldError> {
        let mut pairs = Vec::new();
        let mut pending = Vec::new();
        for (position, byte) in text.bytes().enumerate() {
            match byte {
                b'(' => {
                    if pending.len() == MAX_NESTING_DEPTH {
                        return Err(FieldError::NestingTooDeep { open: position });
                    }
                    pending.push(position);
                }
                b')' => {
                    if let Some(open) = pending.pop() {
                        pairs.push((open, position));
                    }
                }
                _ => {}
            }
        }
        pairs.sort_unstable();
        Ok(Self { pairs })
    }

    fn close_of(&self, open: usize) -> Option<usize> {
        let index = self
            .pairs
            .binary_search_by_key(&open, |&(start, _)| start)
            .ok()?;
        self.pairs.get(index).map(|&(_, close)| close)
    }
}

fn parse_span(text: &str, groups: &Groups, span: Span) -> Result<LicenceTree, FieldError> {
    let span = span.trim(text);
    if span.is_empty() {
        return Err(FieldError::EmptyOperand {
            position: span.start,
        });
    }
    if let Some(inner) = enclosed_group(text, groups, span)? {
        return parse_span(text, groups, inner);
    }

    let connectives = classify_span(text, span);
    let separator = match (connectives.conjunction, connectives.disjunction) {
        (true, true) => return Err(FieldError::MixedConnectives),
        (true, false) => Separator::And,
        (false, true) => Separator::Or,
        (false, false) => return parse_reference(text, span),
    };

    let operands = operand_spans(separator, text, span)?
        .into_iter()
        .map(|operand| parse_span(text, groups, operand))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match separator {
        Separator::And => LicenceTree::Conjunctive(operands),
        Separator::Or => LicenceTree::Disjunctive(operands),
    })
}

/// The inside of `span` when the whole span is one parenthesized group.
fn enclosed_group(
    text: &str,
    groups: &Groups,
    span: Span,
) -> Result<Option<Span>, FieldError> {
    if text.as_bytes().get(span.start) != Some(&b'(') {
        return Ok(None);
    }
    match groups.close_of(span.start) {
        Some(close) if close + 1 == span.end => Ok(Some(Span::new(span.start + 1, close))),
        Some(close) if close < span.end => Ok(None),
        _ => Err(FieldError::UnbalancedParentheses { open: span.start }),
    }
}

fn parse_reference(text: &str, span: Span) -> Result<LicenceTree, FieldError> {
    let id = span.slice(text);
    let bytes = text.as_bytes();
    for position in span.start..span.end {
        match bytes.get(position) {
            Some(b'(') => {
                return Err(match scan_group(bytes, position, span.end) {
                    ParenSet::Unclosed { open } => FieldError::UnbalancedParentheses { open },
                    ParenSet::Matched { .. } | ParenSet::Absent => {
                        FieldError::UnexpectedGroup { open: position }
                    }
                });
            }
            Some(b')') => return Err(FieldError::UnexpectedCloseParenthesis { position }),
            _ => {}
        }
    }
    Ok(LicenceTree::Reference(id.to_owned()))
}

impl FromStr for LicenceTree {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LicenceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (separator, operands) = match self {
            Self::Reference(id) => return f.write_str(id),
            Self::Conjunctive(operands) => (Separator::And, operands),
            Self::Disjunctive(operands) => (Separator::Or, operands),
        };
        for (index, operand) in operands.iter().enumerate() {
            if index > 0 {
                f.write_str(separator.as_str())?;
            }
            match operand {
                Self::Reference(id) => f.write_str(id)?,
                nested => write!(f, "({nested})")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise licence parsing fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reference(id: &str) -> LicenceTree {
        LicenceTree::Reference(id.to_owned())
    }

    #[test]
    fn parses_bare_reference() {
        assert_eq!(LicenceTree::parse(" GPLv3 ").unwrap(), reference("GPLv3"));
    }

    #[test]
    fn unwraps_redundant_parentheses() {
        assert_eq!(
            LicenceTree::parse("((a and b))").unwrap(),
            LicenceTree::Conjunctive(vec![reference("a"), reference("b")])
        );
    }

    #[test]
    fn keeps_same_connective_groups_nested() {
        assert_eq!(
            LicenceTree::parse("a and (b and c) and d").unwrap(),
            LicenceTree::Conjunctive(vec![
                reference("a"),
                LicenceTree::Conjunctive(vec![reference("b"), reference("c")]),
                reference("d"),
            ])
        );
    }

    #[test]
    fn rejects_mixed_connectives_at_one_level() {
        assert_eq!(
            LicenceTree::parse("a and b or c").unwrap_err(),
            FieldError::MixedConnectives
        );
        assert_eq!(
            LicenceTree::parse("x or (a and b or c)").unwrap_err(),
            FieldError::MixedConnectives
        );
    }

    #[rstest]
    #[case("a and (b or c", FieldError::UnbalancedParentheses { open: 6 })]
    #[case("(a or b", FieldError::UnbalancedParentheses { open: 0 })]
    #[case("a or b)", FieldError::UnexpectedCloseParenthesis { position: 6 })]
    #[case("GPL (v2)", FieldError::UnexpectedGroup { open: 4 })]
    #[case("a and and b", FieldError::EmptyOperand { position: 6 })]
    #[case("()", FieldError::EmptyOperand { position: 1 })]
    #[case("   ", FieldError::EmptyOperand { position: 3 })]
    fn reports_positions_in_original_text(#[case] input: &str, #[case] expected: FieldError) {
        assert_eq!(LicenceTree::parse(input).unwrap_err(), expected);
    }

    #[rstest]
    #[case("MIT")]
    #[case("a and b and c")]
    #[case("(a and b) or c")]
    #[case("a or (b and (c or d)) or e")]
    fn display_parses_back_to_equal_tree(#[case] input: &str) {
        let tree = LicenceTree::parse(input).unwrap();
        let rendered = tree.to_string();
        assert_eq!(rendered, input);
        assert_eq!(LicenceTree::parse(&rendered).unwrap(), tree);
    }

    #[test]
    fn accepts_nesting_up_to_the_limit() {
        let text = format!(
            "{}MIT{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        assert_eq!(LicenceTree::parse(&text).unwrap(), reference("MIT"));
    }

    #[rstest]
    #[case::redundant_groups("(", 10_000, MAX_NESTING_DEPTH)]
    #[case::nested_conjunctions("a and (", 50_000, 7 * MAX_NESTING_DEPTH + 6)]
    fn rejects_deep_nesting_without_recursing(
        #[case] opener: &str,
        #[case] levels: usize,
        #[case] open: usize,
    ) {
        let text = format!("{}MIT{}", opener.repeat(levels), ")".repeat(levels));
        assert_eq!(
            LicenceTree::parse(&text).unwrap_err(),
            FieldError::NestingTooDeep { open }
        );
    }

    #[test]
    fn parses_long_flat_expressions() {
        let text = ["(a or b)"; 20_000].join(" and ");
        let tree = LicenceTree::parse(&text).unwrap();
        assert_eq!(tree.references().len(), 40_000);
        assert_eq!(tree.separator(), Some(Separator::And));
    }

    #[test]
    fn lists_references_in_order() {
        let tree = LicenceTree::parse("a or (b and (c or d)) or e").unwrap();
        assert_eq!(tree.references(), ["a", "b", "c", "d", "e"]);
        assert_eq!(tree.separator(), Some(Separator::Or));
    }
}
