//! Field decoders and the setter commands that apply them to records.
//!
//! A [`FieldSetter`] borrows exactly one field of the record under
//! construction. Records publish a static table mapping tag names to
//! projections that build setters, so a line dispatcher can update any field
//! with the same `(text) -> Result` call.

mod checksum;
mod verification;

pub use checksum::{Checksum, DIGEST_LEN};
pub use verification::VerificationCode;

use crate::errors::FieldError;
use crate::expression::LicenceTree;

/// A pending update to one field of a record.
///
/// Structured values are decoded in full before the field is touched, so a
/// failed [`apply`](Self::apply) leaves the record unchanged.
///
/// # Examples
/// ```
/// use spdx_tag::FieldSetter;
/// let mut name = String::from("hello");
/// FieldSetter::Text(&mut name)
///     .apply("world")
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(name, "world");
/// ```
#[derive(Debug)]
pub enum FieldSetter<'a> {
    /// Replace a required string.
    Text(&'a mut String),
    /// Replace an optional string.
    OptionalText(&'a mut Option<String>),
    /// Append to an ordered list of strings.
    TextList(&'a mut Vec<String>),
    /// Decode and store a verification code.
    VerificationCode(&'a mut Option<VerificationCode>),
    /// Decode and store a checksum.
    Checksum(&'a mut Option<Checksum>),
    /// Decode and store a licence expression.
    Licence(&'a mut Option<LicenceTree>),
    /// Decode a licence expression and append it.
    LicenceList(&'a mut Vec<LicenceTree>),
}

impl FieldSetter<'_> {
    /// Apply the raw field text to the borrowed field.
    ///
    /// # Errors
    /// Returns the decoder's [`FieldError`] for structured fields. Plain
    /// text setters never fail.
    pub fn apply(self, text: &str) -> Result<(), FieldError> {
        match self {
            Self::Text(field) => text.clone_into(field),
            Self::OptionalText(field) => *field = Some(text.to_owned()),
            Self::TextList(field) => field.push(text.to_owned()),
            Self::VerificationCode(field) => *field = Some(VerificationCode::decode(text)?),
            Self::Checksum(field) => *field = Some(Checksum::decode(text)?),
            Self::Licence(field) => *field = Some(LicenceTree::parse(text)?),
            Self::LicenceList(field) => field.push(LicenceTree::parse(text)?),
        }
        Ok(())
    }
}

/// One row of a record's dispatch table: a tag name and the projection that
/// borrows the matching field.
pub type FieldEntry<R> = (&'static str, fn(&mut R) -> FieldSetter<'_>);

/// A record that can be populated tag by tag.
///
/// The dispatch table is a `'static` constant, so implementors must be
/// `'static` too.
pub trait Record: Sized + 'static {
    /// Tags this record accepts.
    const FIELDS: &'static [FieldEntry<Self>];

    /// Whether `tag` names a field of this record.
    fn accepts(tag: &str) -> bool {
        Self::FIELDS.iter().any(|(name, _)| *name == tag)
    }

    /// Borrow the field named by `tag`.
    fn setter(&mut self, tag: &str) -> Option<FieldSetter<'_>> {
        Self::FIELDS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, project)| project(self))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise setter fallibility")]
mod tests {
    use super::*;

    const DIGEST: &str = "d6a770ba38583ed4bb4525bd96e50461655d2758";

    #[test]
    fn text_setter_replaces_value() {
        let mut value = String::from("hello");
        FieldSetter::Text(&mut value).apply("world").unwrap();
        assert_eq!(value, "world");
    }

    #[test]
    fn list_setter_appends() {
        let mut values = vec!["1".to_owned(), "2".to_owned(), "3".to_owned()];
        FieldSetter::TextList(&mut values).apply("4").unwrap();
        assert_eq!(values, ["1", "2", "3", "4"]);
    }

    #[test]
    fn failed_decode_leaves_field_untouched() {
        let previous = VerificationCode {
            value: DIGEST.to_owned(),
            excluded_files: vec!["kept.txt".to_owned()],
        };
        let mut field = Some(previous.clone());
        let err = FieldSetter::VerificationCode(&mut field)
            .apply(&format!("{DIGEST} ("))
            .unwrap_err();
        assert!(matches!(err, FieldError::UnbalancedParentheses { .. }));
        assert_eq!(field, Some(previous));

        let mut checksum = None;
        assert!(FieldSetter::Checksum(&mut checksum).apply("SHA1: abc").is_err());
        assert_eq!(checksum, None);
    }

    #[test]
    fn licence_list_setter_appends_parsed_trees() {
        let mut licences = Vec::new();
        FieldSetter::LicenceList(&mut licences).apply("MIT").unwrap();
        FieldSetter::LicenceList(&mut licences)
            .apply("(a or b)")
            .unwrap();
        assert_eq!(
            licences,
            [
                LicenceTree::Reference("MIT".into()),
                LicenceTree::Disjunctive(vec![
                    LicenceTree::Reference("a".into()),
                    LicenceTree::Reference("b".into()),
                ]),
            ]
        );
    }

    #[derive(Default)]
    struct Probe {
        name: String,
        sum: Option<Checksum>,
    }

    impl Record for Probe {
        const FIELDS: &'static [FieldEntry<Self>] = &[
            ("Name", |p| FieldSetter::Text(&mut p.name)),
            ("Sum", |p| FieldSetter::Checksum(&mut p.sum)),
        ];
    }

    #[test]
    fn dispatches_through_record_table() {
        let mut probe = Probe::default();
        assert!(Probe::accepts("Sum"));
        assert!(!Probe::accepts("Other"));
        probe.setter("Name").unwrap().apply("x").unwrap();
        probe
            .setter("Sum")
            .unwrap()
            .apply(&format!("SHA1: {DIGEST}"))
            .unwrap();
        assert_eq!(probe.name, "x");
        assert_eq!(
            probe.sum.as_ref().map(|sum| sum.value.as_str()),
            Some(DIGEST)
        );
        assert!(probe.setter("Other").is_none());
    }
}
