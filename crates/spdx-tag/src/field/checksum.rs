//! Algorithm-labelled checksum values.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChecksumIssue, FieldError};

/// Length of an accepted digest in hexadecimal characters.
pub const DIGEST_LEN: usize = 40;

/// A checksum such as `SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checksum {
    /// Algorithm label, case as given.
    pub algo: String,
    /// Digest of exactly [`DIGEST_LEN`] hexadecimal characters.
    pub value: String,
}

impl Checksum {
    /// Decode `<ALGO>: <digest>`, splitting on the first colon.
    ///
    /// # Errors
    /// Returns [`FieldError::InvalidChecksumFormat`] when the colon or the
    /// algorithm is missing, or when the digest is not 40 hexadecimal
    /// characters.
    ///
    /// # Examples
    /// ```
    /// use spdx_tag::Checksum;
    /// let sum = Checksum::decode("SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758")
    ///     .expect("example ensures fallible call succeeds");
    /// assert_eq!(sum.algo, "SHA1");
    /// assert!(Checksum::decode("d6a770ba38583ed4bb").is_err());
    /// ```
    pub fn decode(text: &str) -> Result<Self, FieldError> {
        let invalid = |reason| FieldError::InvalidChecksumFormat {
            text: text.to_owned(),
            reason,
        };
        let (algo, value) = text
            .split_once(':')
            .ok_or_else(|| invalid(ChecksumIssue::MissingSeparator))?;
        let (algo, value) = (algo.trim(), value.trim());
        if algo.is_empty() {
            return Err(invalid(ChecksumIssue::MissingAlgorithm));
        }
        if let Some(position) = value.find(|c: char| !c.is_ascii_hexdigit()) {
            return Err(invalid(ChecksumIssue::NonHexDigit { position }));
        }
        if value.len() != DIGEST_LEN {
            return Err(invalid(ChecksumIssue::DigestLength { found: value.len() }));
        }
        Ok(Self {
            algo: algo.to_owned(),
            value: value.to_owned(),
        })
    }
}

impl FromStr for Checksum {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algo, self.value)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise decoder fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    const DIGEST: &str = "d6a770ba38583ed4bb4525bd96e50461655d2758";

    #[test]
    fn decodes_labelled_digest() {
        let sum = Checksum::decode(&format!("SHA1: {DIGEST}")).unwrap();
        assert_eq!(sum.algo, "SHA1");
        assert_eq!(sum.value, DIGEST);
        assert_eq!(sum.to_string(), format!("SHA1: {DIGEST}"));
    }

    #[test]
    fn keeps_algorithm_case_and_accepts_uppercase_hex() {
        let upper = DIGEST.to_ascii_uppercase();
        let sum: Checksum = format!("  sha1 :{upper} ").parse().unwrap();
        assert_eq!(sum.algo, "sha1");
        assert_eq!(sum.value, upper);
    }

    #[rstest]
    #[case("d6a770ba38583ed4bb", ChecksumIssue::MissingSeparator)]
    #[case(": d6a770ba38583ed4bb4525bd96e50461655d2758", ChecksumIssue::MissingAlgorithm)]
    #[case("SHA1: d6a770ba38583ed4bb", ChecksumIssue::DigestLength { found: 18 })]
    #[case("SHA1: d6a770ba38583ed4bb4525bd96e50461655d27580", ChecksumIssue::DigestLength { found: 41 })]
    #[case("SHA1: d6a770ba38583ed4bb4525bd96e50461655d275g", ChecksumIssue::NonHexDigit { position: 39 })]
    #[case("SHA1: d6a770ba 38583ed4bb4525bd96e50461655d27", ChecksumIssue::NonHexDigit { position: 8 })]
    fn rejects_malformed_checksums(#[case] input: &str, #[case] reason: ChecksumIssue) {
        assert_eq!(
            Checksum::decode(input).unwrap_err(),
            FieldError::InvalidChecksumFormat {
                text: input.to_owned(),
                reason
            }
        );
    }
}
