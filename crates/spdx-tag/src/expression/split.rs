//! Splitting an expression into its top-level operands.

use crate::errors::FieldError;

use super::paren::{ParenSet, scan_group};
use super::{Separator, Span};

/// Split `text` on every top-level occurrence of `separator`.
///
/// Operands are trimmed and borrow from `text`. Parenthesized operands keep
/// their parentheses. Without a top-level separator the result is the trimmed
/// text as a single operand.
///
/// # Errors
/// Returns [`FieldError::UnbalancedParentheses`] when a group is never
/// closed, and [`FieldError::EmptyOperand`] when a separator has nothing on
/// one of its sides or runs into another connective, as in `a and and b`.
///
/// # Examples
/// ```
/// use spdx_tag::{Separator, split_licence_set};
/// let operands = split_licence_set(Separator::And, "a and (b or c)")
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(operands, ["a", "(b or c)"]);
/// ```
pub fn split_licence_set(separator: Separator, text: &str) -> Result<Vec<&str>, FieldError> {
    Ok(operand_spans(separator, text, Span::of(text))?
        .into_iter()
        .map(|span| span.slice(text))
        .collect())
}

pub(crate) fn operand_spans(
    separator: Separator,
    text: &str,
    span: Span,
) -> Result<Vec<Span>, FieldError> {
    let bytes = text.as_bytes();
    let step = separator.as_str().len();
    let mut operands = Vec::new();
    let mut operand_start = span.start;
    let mut pos = span.start;

    while pos < span.end {
        if bytes.get(pos) == Some(&b'(') {
            match scan_group(bytes, pos, span.end) {
                ParenSet::Matched { close, .. } => {
                    pos = close + 1;
                    continue;
                }
                ParenSet::Unclosed { open } => {
                    return Err(FieldError::UnbalancedParentheses { open });
                }
                ParenSet::Absent => {}
            }
        }
        if pos + step <= span.end && separator.matches_at(bytes, pos) {
            operands.push(non_empty(text, Span::new(operand_start, pos))?);
            pos += step;
            operand_start = pos;
            continue;
        }
        pos += 1;
    }

    let last = Span::new(operand_start, span.end);
    if operands.is_empty() {
        return Ok(vec![last.trim(text)]);
    }
    operands.push(non_empty(text, last)?);
    Ok(operands)
}

fn non_empty(text: &str, span: Span) -> Result<Span, FieldError> {
    let trimmed = span.trim(text);
    if trimmed.is_empty() || has_dangling_keyword(trimmed.slice(text)) {
        return Err(FieldError::EmptyOperand {
            position: span.start,
        });
    }
    Ok(trimmed)
}

/// Whether `operand` begins or ends with a bare `and`/`or` keyword.
fn has_dangling_keyword(operand: &str) -> bool {
    [Separator::And, Separator::Or].into_iter().any(|separator| {
        let keyword = separator.keyword();
        operand == keyword
            || operand
                .strip_prefix(keyword)
                .is_some_and(|rest| rest.starts_with(char::is_whitespace))
            || operand
                .strip_suffix(keyword)
                .is_some_and(|rest| rest.ends_with(char::is_whitespace))
    })
}
