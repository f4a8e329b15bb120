//! Line lexer splitting tag-value documents into `(tag, value, line)` pairs.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::LexError;

/// Regex for a single `Tag: value` line.
///
/// The `unreachable!()` is safe here because this is a compile-time constant
/// regex pattern that has been validated and cannot fail to compile.
static TAG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([A-Za-z][A-Za-z0-9]*):[ \t]*(.*?)[ \t]*$")
        .unwrap_or_else(|_| unreachable!())
});

const TEXT_OPEN: &str = "<text>";
const TEXT_CLOSE: &str = "</text>";

/// One tag-value pair borrowed from the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair<'a> {
    /// Tag name before the colon.
    pub tag: &'a str,
    /// Value text; for `<text>` blocks, everything between the markers.
    pub value: &'a str,
    /// One-based line number of the tag.
    pub line: usize,
}

/// Iterator over the tag-value pairs of a document.
///
/// Blank lines and lines starting with `#` are skipped. A value starting
/// with `<text>` runs, possibly across lines, up to the next `</text>`.
///
/// # Examples
/// ```
/// use spdx_tag::Lexer;
/// let source = "# header\nPackageName: demo\nPackageCopyrightText: <text>line one\nline two</text>\n";
/// let pairs: Vec<_> = Lexer::new(source)
///     .collect::<Result<_, _>>()
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(pairs.len(), 2);
/// assert_eq!(pairs[1].value, "line one\nline two");
/// assert_eq!(pairs[1].line, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Lex `source` from its first line.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 0,
        }
    }

    /// Take the next physical line, returning its start offset and text
    /// without the line terminator.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let rest = self.source.get(self.offset..).filter(|rest| !rest.is_empty())?;
        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let start = self.offset;
        self.offset += len;
        self.line += 1;
        let line = rest.get(..len).unwrap_or_default();
        Some((start, line.trim_end_matches(['\n', '\r'])))
    }

    /// Read a `<text>` block whose content starts at byte `from`.
    fn text_block(&mut self, from: usize, opened_on: usize) -> Result<&'a str, LexError> {
        let tail = self.source.get(from..).unwrap_or_default();
        let Some(close) = tail.find(TEXT_CLOSE).map(|i| from + i) else {
            self.offset = self.source.len();
            return Err(LexError::UnterminatedText { line: opened_on });
        };
        let after = close + TEXT_CLOSE.len();
        let line_end = self
            .source
            .get(after..)
            .and_then(|rest| rest.find('\n'))
            .map_or(self.source.len(), |i| after + i + 1);
        if line_end > self.offset {
            let consumed = self.source.get(self.offset..line_end).unwrap_or_default();
            self.line += consumed.lines().count();
            self.offset = line_end;
        }
        Ok(self.source.get(from..close).unwrap_or_default())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<TagPair<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, text) = self.next_line()?;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let line = self.line;
            let Some(caps) = TAG_LINE_RE.captures(text) else {
                return Some(Err(LexError::MissingSeparator { line }));
            };
            let (Some(tag), Some(value)) = (caps.get(1), caps.get(2)) else {
                return Some(Err(LexError::MissingSeparator { line }));
            };
            let pair = |value| TagPair {
                tag: tag.as_str(),
                value,
                line,
            };
            if value.as_str().starts_with(TEXT_OPEN) {
                let from = start + value.start() + TEXT_OPEN.len();
                return Some(self.text_block(from, line).map(pair));
            }
            return Some(Ok(pair(value.as_str())));
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise lexing fallibility")]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Result<TagPair<'_>, LexError>> {
        Lexer::new(source).collect()
    }

    #[test]
    fn tokenises_tags_and_skips_comments() {
        let pairs = lex("SPDXVersion: SPDX-1.2\n\n# comment\r\nDataLicense:CC0-1.0  \r\n");
        assert_eq!(
            pairs,
            vec![
                Ok(TagPair {
                    tag: "SPDXVersion",
                    value: "SPDX-1.2",
                    line: 1
                }),
                Ok(TagPair {
                    tag: "DataLicense",
                    value: "CC0-1.0",
                    line: 4
                }),
            ]
        );
    }

    #[test]
    fn keeps_colons_inside_values() {
        let pairs = lex("PackageChecksum: SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758");
        let pair = pairs.into_iter().next().unwrap().unwrap();
        assert_eq!(pair.tag, "PackageChecksum");
        assert_eq!(pair.value, "SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758");
    }

    #[test]
    fn reads_multi_line_text_and_tracks_lines() {
        let source = "FileName: a.c\nFileCopyrightText: <text>(c) one\n(c) two\n</text>\nFileType: SOURCE\n";
        let pairs: Vec<_> = Lexer::new(source).collect::<Result<_, _>>().unwrap();
        assert_eq!(pairs.len(), 3);
        let texts: Vec<_> = pairs.iter().map(|p| (p.tag, p.value, p.line)).collect();
        assert_eq!(
            texts,
            [
                ("FileName", "a.c", 1),
                ("FileCopyrightText", "(c) one\n(c) two\n", 2),
                ("FileType", "SOURCE", 5),
            ]
        );
    }

    #[test]
    fn reads_single_line_text_block() {
        let pairs = lex("PackageSummary: <text>short</text>\nPackageName: x");
        let lines: Vec<_> = pairs.into_iter().map(|p| p.unwrap().line).collect();
        assert_eq!(lines, [1, 2]);
    }

    #[test]
    fn reports_missing_separator_and_continues() {
        let pairs = lex("not a tag line\nPackageName: x\n");
        assert_eq!(
            pairs.first(),
            Some(&Err(LexError::MissingSeparator { line: 1 }))
        );
        assert!(matches!(pairs.get(1), Some(Ok(TagPair { line: 2, .. }))));
    }

    #[test]
    fn reports_unterminated_text_and_stops() {
        let pairs = lex("PackageName: x\nPackageDescription: <text>never\nclosed\n");
        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs.last(),
            Some(&Err(LexError::UnterminatedText { line: 2 }))
        );
    }
}
