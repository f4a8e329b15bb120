//! Assemble a [`Document`] from lexed tag-value pairs.

use tracing::{debug, trace};

use crate::document::{CreationInfo, Document, File, Package};
use crate::errors::DocumentError;
use crate::field::{FieldSetter, Record};
use crate::lexer::{Lexer, TagPair};

/// Tag that opens a new package record.
pub const PACKAGE_OPENER: &str = "PackageName";
/// Tag that opens a new file record.
pub const FILE_OPENER: &str = "FileName";

/// Options controlling how strictly documents are assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Report tags no record accepts instead of skipping them.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Document,
    CreationInfo,
    Package,
    File,
}

impl Target {
    fn for_tag(tag: &str) -> Option<Self> {
        if Document::accepts(tag) {
            Some(Self::Document)
        } else if CreationInfo::accepts(tag) {
            Some(Self::CreationInfo)
        } else if Package::accepts(tag) {
            Some(Self::Package)
        } else if File::accepts(tag) {
            Some(Self::File)
        } else {
            None
        }
    }
}

/// Incremental document builder.
///
/// Pairs are routed to the record that owns their tag. `PackageName` and
/// `FileName` open a new record; other package and file tags update the most
/// recently opened one. Errors are collected so one pass reports every bad
/// line.
#[derive(Debug, Default)]
pub struct Builder {
    document: Document,
    errors: Vec<DocumentError>,
    options: BuilderOptions,
}

impl Builder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Apply one pair, recording any error against its line.
    pub fn push(&mut self, pair: TagPair<'_>) {
        if let Err(err) = self.apply(pair) {
            self.errors.push(err);
        }
    }

    /// Record an error raised before a pair could be produced.
    pub fn push_error(&mut self, err: impl Into<DocumentError>) {
        self.errors.push(err.into());
    }

    /// Errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[DocumentError] {
        &self.errors
    }

    /// Finish building.
    ///
    /// # Errors
    /// Returns every recorded error, in input order, when any line failed.
    pub fn finish(self) -> Result<Document, Vec<DocumentError>> {
        if self.errors.is_empty() {
            Ok(self.document)
        } else {
            Err(self.errors)
        }
    }

    fn apply(&mut self, pair: TagPair<'_>) -> Result<(), DocumentError> {
        let TagPair { tag, value, line } = pair;
        let Some(target) = Target::for_tag(tag) else {
            if self.options.strict {
                return Err(DocumentError::UnknownTag {
                    line,
                    tag: tag.to_owned(),
                });
            }
            trace!(line, tag, "skipping unrecognised tag");
            return Ok(());
        };

        match tag {
            PACKAGE_OPENER => {
                debug!(line, name = value, "opening package");
                self.document.packages.push(Package::default());
            }
            FILE_OPENER => {
                debug!(line, name = value, "opening file");
                self.document.files.push(File::default());
            }
            _ => {}
        }

        let setter = self.setter(target, tag, line)?;
        setter
            .apply(value)
            .map_err(|source| DocumentError::Field {
                line,
                tag: tag.to_owned(),
                source,
            })
    }

    fn setter(
        &mut self,
        target: Target,
        tag: &str,
        line: usize,
    ) -> Result<FieldSetter<'_>, DocumentError> {
        let outside = |record| DocumentError::FieldOutsideRecord {
            line,
            tag: tag.to_owned(),
            record,
        };
        let setter = match target {
            Target::Document => self.document.setter(tag),
            Target::CreationInfo => self.document.creation_info.setter(tag),
            Target::Package => self
                .document
                .packages
                .last_mut()
                .ok_or_else(|| outside(Package::KIND))?
                .setter(tag),
            Target::File => self
                .document
                .files
                .last_mut()
                .ok_or_else(|| outside(File::KIND))?
                .setter(tag),
        };
        setter.ok_or_else(|| DocumentError::UnknownTag {
            line,
            tag: tag.to_owned(),
        })
    }
}

/// Parse a whole tag-value document.
///
/// # Errors
/// Returns every lexer and field error found, each carrying its line number.
///
/// # Examples
/// ```
/// use spdx_tag::{BuilderOptions, parse_document};
/// let source = "\
/// SPDXVersion: SPDX-1.2
/// PackageName: demo
/// PackageChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758
/// PackageLicenseDeclared: MIT or Apache-2.0
/// ";
/// let document = parse_document(source, BuilderOptions::default())
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(document.packages.len(), 1);
/// ```
pub fn parse_document(
    source: &str,
    options: BuilderOptions,
) -> Result<Document, Vec<DocumentError>> {
    let mut builder = Builder::new(options);
    for item in Lexer::new(source) {
        match item {
            Ok(pair) => builder.push(pair),
            Err(err) => builder.push_error(err),
        }
    }
    builder.finish()
}
