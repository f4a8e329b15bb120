//! Package verification codes with optional exclusion lists.

use std::str::FromStr;

use crate::errors::{ExclusionIssue, FieldError};
use crate::expression::{ParenSet, find_matching_paren_set};

const EXCLUDES_LABEL: &str = "excludes:";

/// A digest over a package's files plus the files left out of it.
///
/// # Examples
/// ```
/// use spdx_tag::VerificationCode;
/// let code = VerificationCode::decode(
///     "d6a770ba38583ed4bb4525bd96e50461655d2758 (excludes: abc.txt, file.spdx)",
/// )
/// .expect("example ensures fallible call succeeds");
/// assert_eq!(code.value, "d6a770ba38583ed4bb4525bd96e50461655d2758");
/// assert_eq!(code.excluded_files, ["abc.txt", "file.spdx"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationCode {
    /// The digest text preceding any exclusion clause.
    pub value: String,
    /// Excluded filenames in source order.
    pub excluded_files: Vec<String>,
}

impl VerificationCode {
    /// Decode `<value> [(excludes: f1, f2, ...)]`.
    ///
    /// The `excludes:` label is optional. Nothing is built unless the whole
    /// field is valid.
    ///
    /// # Errors
    /// Returns [`FieldError::UnbalancedParentheses`] when the clause is never
    /// closed, [`FieldError::MalformedExclusionList`] for an empty entry or
    /// text after the clause, and [`FieldError::MissingValue`] when no digest
    /// precedes the clause.
    pub fn decode(text: &str) -> Result<Self, FieldError> {
        let (value, excluded_files) = match find_matching_paren_set(text) {
            ParenSet::Absent => (text.trim(), Vec::new()),
            ParenSet::Unclosed { open } => {
                return Err(FieldError::UnbalancedParentheses { open });
            }
            ParenSet::Matched { open, close } => {
                check_nothing_follows(text, close + 1)?;
                let clause = text.get(open + 1..close).unwrap_or_default();
                let value = text.get(..open).unwrap_or_default().trim();
                (value, parse_exclusions(clause)?)
            }
        };
        if value.is_empty() {
            return Err(FieldError::MissingValue);
        }
        Ok(Self {
            value: value.to_owned(),
            excluded_files,
        })
    }
}

fn check_nothing_follows(text: &str, from: usize) -> Result<(), FieldError> {
    let rest = text.get(from..).unwrap_or_default();
    rest.find(|c: char| !c.is_whitespace())
        .map_or(Ok(()), |offset| {
            Err(FieldError::MalformedExclusionList {
                reason: ExclusionIssue::TrailingText {
                    position: from + offset,
                },
            })
        })
}

fn parse_exclusions(clause: &str) -> Result<Vec<String>, FieldError> {
    let clause = clause.trim();
    let list = clause.strip_prefix(EXCLUDES_LABEL).unwrap_or(clause);
    list.split(',')
        .enumerate()
        .map(|(index, entry)| {
            let name = entry.trim();
            if name.is_empty() {
                Err(FieldError::MalformedExclusionList {
                    reason: ExclusionIssue::EmptyEntry { index },
                })
            } else {
                Ok(name.to_owned())
            }
        })
        .collect()
}

impl FromStr for VerificationCode {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise decoder fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    const DIGEST: &str = "d6a770ba38583ed4bb4525bd96e50461655d2758";

    #[test]
    fn decodes_digest_without_clause() {
        let code = VerificationCode::decode(DIGEST).unwrap();
        assert_eq!(code.value, DIGEST);
        assert!(code.excluded_files.is_empty());
    }

    #[rstest]
    #[case(" (excludes: abc.txt, file.spdx)")]
    #[case(" (abc.txt, file.spdx)")]
    #[case("(excludes:abc.txt,file.spdx)  ")]
    fn decodes_exclusions_with_optional_label(#[case] clause: &str) {
        let code = VerificationCode::decode(&format!("{DIGEST}{clause}")).unwrap();
        assert_eq!(code.value, DIGEST);
        assert_eq!(code.excluded_files, ["abc.txt", "file.spdx"]);
    }

    #[test]
    fn keeps_duplicate_exclusions_in_order() {
        let code = VerificationCode::decode(&format!("{DIGEST} (b.txt, a.txt, b.txt)")).unwrap();
        assert_eq!(code.excluded_files, ["b.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn rejects_unclosed_clause() {
        let err = VerificationCode::decode(&format!("{DIGEST} (")).unwrap_err();
        assert_eq!(
            err,
            FieldError::UnbalancedParentheses {
                open: DIGEST.len() + 1
            }
        );
    }

    #[rstest]
    #[case(" (abc.txt, )", 1)]
    #[case(" (excludes: , abc.txt)", 0)]
    #[case(" ()", 0)]
    fn rejects_empty_entries(#[case] clause: &str, #[case] index: usize) {
        let err = VerificationCode::decode(&format!("{DIGEST}{clause}")).unwrap_err();
        assert_eq!(
            err,
            FieldError::MalformedExclusionList {
                reason: ExclusionIssue::EmptyEntry { index }
            }
        );
    }

    #[test]
    fn rejects_text_after_clause() {
        let err = VerificationCode::decode(&format!("{DIGEST} (a.txt) junk")).unwrap_err();
        assert_eq!(
            err,
            FieldError::MalformedExclusionList {
                reason: ExclusionIssue::TrailingText {
                    position: DIGEST.len() + 9
                }
            }
        );
    }

    #[test]
    fn rejects_clause_without_digest() {
        let err = "  (excludes: a.txt)".parse::<VerificationCode>().unwrap_err();
        assert_eq!(err, FieldError::MissingValue);
    }
}
