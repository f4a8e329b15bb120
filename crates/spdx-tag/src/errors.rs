//! Error types shared by the expression, field and document modules.

use std::fmt;
use thiserror::Error;

use crate::expression::MAX_NESTING_DEPTH;
use crate::field::DIGEST_LEN;

/// Why a checksum field failed to decode.
///
/// # Examples
/// ```
/// use spdx_tag::ChecksumIssue;
/// let issue = ChecksumIssue::DigestLength { found: 18 };
/// assert_eq!(issue.to_string(), "digest has 18 characters, expected 40");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumIssue {
    /// No `:` separates the algorithm from the digest.
    MissingSeparator,
    /// Nothing precedes the `:`.
    MissingAlgorithm,
    /// The digest is not exactly [`DIGEST_LEN`] characters long.
    DigestLength {
        /// Number of characters found after trimming.
        found: usize,
    },
    /// The digest contains a character that is not a hexadecimal digit.
    NonHexDigit {
        /// Byte offset within the trimmed digest.
        position: usize,
    },
}

impl fmt::Display for ChecksumIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => f.write_str("missing ':' between algorithm and digest"),
            Self::MissingAlgorithm => f.write_str("missing algorithm before ':'"),
            Self::DigestLength { found } => {
                write!(f, "digest has {found} characters, expected {DIGEST_LEN}")
            }
            Self::NonHexDigit { position } => {
                write!(f, "non-hexadecimal character at byte {position} of digest")
            }
        }
    }
}

/// Why the exclusion clause of a verification code failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionIssue {
    /// A comma-separated entry is empty after trimming.
    EmptyEntry {
        /// Zero-based index of the entry within the list.
        index: usize,
    },
    /// Non-whitespace text follows the closing parenthesis.
    TrailingText {
        /// Byte offset of the first unexpected character.
        position: usize,
    },
}

impl fmt::Display for ExclusionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEntry { index } => write!(f, "entry {index} is empty"),
            Self::TrailingText { position } => {
                write!(f, "unexpected text after ')' at byte {position}")
            }
        }
    }
}

/// Errors surfaced while decoding a single field value.
///
/// Every variant is terminal for the field being decoded; callers attach
/// their own location (for example a line number) when reporting.
///
/// # Examples
/// ```
/// use spdx_tag::FieldError;
/// let err = FieldError::UnbalancedParentheses { open: 4 };
/// assert_eq!(err.to_string(), "unclosed parenthesis opened at byte 4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// An opening parenthesis is never closed.
    #[error("unclosed parenthesis opened at byte {open}")]
    UnbalancedParentheses {
        /// Byte offset of the unmatched `(`.
        open: usize,
    },
    /// A closing parenthesis has no matching opener.
    #[error("unexpected ')' at byte {position}")]
    UnexpectedCloseParenthesis {
        /// Byte offset of the stray `)`.
        position: usize,
    },
    /// A licence identifier contains a parenthesized group.
    #[error("unexpected parenthesized group at byte {open} in licence identifier")]
    UnexpectedGroup {
        /// Byte offset of the group's `(`.
        open: usize,
    },
    /// A checksum value is not `<ALGO>: <40 hex digits>`.
    #[error("invalid checksum `{text}`: {reason}")]
    InvalidChecksumFormat {
        /// The raw field text.
        text: String,
        /// What was wrong with it.
        reason: ChecksumIssue,
    },
    /// A verification code exclusion clause could not be read.
    #[error("malformed exclusion list: {reason}")]
    MalformedExclusionList {
        /// What was wrong with it.
        reason: ExclusionIssue,
    },
    /// Parentheses nest deeper than [`MAX_NESTING_DEPTH`] levels.
    #[error(
        "parentheses nested deeper than {} levels at byte {open}",
        MAX_NESTING_DEPTH
    )]
    NestingTooDeep {
        /// Byte offset of the first `(` past the limit.
        open: usize,
    },
    /// A licence expression operand is empty.
    #[error("empty licence operand at byte {position}")]
    EmptyOperand {
        /// Byte offset where the operand was expected.
        position: usize,
    },
    /// Conjunction and disjunction both appear at the same nesting level.
    #[error("licence set mixes 'and' and 'or' without parentheses")]
    MixedConnectives,
    /// The field requires a value but none was given.
    #[error("missing value")]
    MissingValue,
}

/// Errors raised while splitting a document into tag-value pairs.
///
/// The message leaves out the line number; read it with
/// [`line`](Self::line).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A non-comment line lacks the `Tag: value` shape.
    #[error("expected `Tag: value`")]
    MissingSeparator {
        /// One-based line number.
        line: usize,
    },
    /// A `<text>` block runs to the end of the input.
    #[error("`<text>` block is never closed")]
    UnterminatedText {
        /// One-based line number of the opening tag.
        line: usize,
    },
}

impl LexError {
    /// One-based line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingSeparator { line } | Self::UnterminatedText { line } => *line,
        }
    }
}

/// Errors collected while assembling a document.
///
/// Like [`LexError`], the message leaves out the line number so reports can
/// place it themselves.
///
/// # Examples
/// ```
/// use spdx_tag::{DocumentError, FieldError};
/// let err = DocumentError::Field {
///     line: 12,
///     tag: "PackageChecksum".into(),
///     source: FieldError::MissingValue,
/// };
/// assert_eq!(err.line(), 12);
/// assert_eq!(err.to_string(), "PackageChecksum: missing value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A field value failed to decode.
    #[error("{tag}: {source}")]
    Field {
        /// One-based line number.
        line: usize,
        /// Tag whose value was rejected.
        tag: String,
        /// Decoder failure.
        source: FieldError,
    },
    /// The tag is not part of any known record.
    #[error("unknown tag `{tag}`")]
    UnknownTag {
        /// One-based line number.
        line: usize,
        /// The unrecognised tag.
        tag: String,
    },
    /// A record field appears before the tag that opens its record.
    #[error("`{tag}` appears before any {record}")]
    FieldOutsideRecord {
        /// One-based line number.
        line: usize,
        /// The misplaced tag.
        tag: String,
        /// Kind of record that must be opened first.
        record: &'static str,
    },
    /// The line itself could not be read.
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl DocumentError {
    /// One-based line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Field { line, .. }
            | Self::UnknownTag { line, .. }
            | Self::FieldOutsideRecord { line, .. } => *line,
            Self::Lex(err) => err.line(),
        }
    }
}
