//! Tag-value reader for SPDX package metadata.
//!
//! The crate decodes the structured fields of the line-oriented
//! `Tag: value` format: licence expressions (with a parenthesis-aware
//! classifier and splitter), package verification codes with exclusion lists
//! and algorithm-labelled checksums. Field setters apply decoded values to
//! the records of a [`Document`], and [`parse_document`] drives the whole
//! pipeline from raw text.

mod builder;
mod document;
mod errors;
mod expression;
mod field;
mod lexer;

pub use builder::{Builder, BuilderOptions, FILE_OPENER, PACKAGE_OPENER, parse_document};
pub use document::{CreationInfo, Document, File, Package};
pub use errors::{ChecksumIssue, DocumentError, ExclusionIssue, FieldError, LexError};
pub use expression::{
    Connectives, LicenceTree, MAX_NESTING_DEPTH, ParenSet, Separator, conj_or_disj_set,
    find_matching_paren_set, find_matching_paren_set_from, split_licence_set,
};
pub use field::{Checksum, DIGEST_LEN, FieldEntry, FieldSetter, Record, VerificationCode};
pub use lexer::{Lexer, TagPair};
