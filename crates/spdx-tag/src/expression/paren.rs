//! Parenthesis matching over byte offsets.

/// Outcome of scanning for the first top-level parenthesized group.
///
/// # Examples
/// ```
/// use spdx_tag::{ParenSet, find_matching_paren_set};
/// assert_eq!(
///     find_matching_paren_set("a(f())d"),
///     ParenSet::Matched { open: 1, close: 5 }
/// );
/// assert_eq!(find_matching_paren_set("a(f()d"), ParenSet::Unclosed { open: 1 });
/// assert_eq!(find_matching_paren_set("blahblah"), ParenSet::Absent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenSet {
    /// The scanned text contains no `(`.
    Absent,
    /// The `(` at `open` is never closed.
    Unclosed {
        /// Byte offset of the opening parenthesis.
        open: usize,
    },
    /// The first group opens at `open` and closes at `close`.
    Matched {
        /// Byte offset of the opening parenthesis.
        open: usize,
        /// Byte offset of its matching closing parenthesis.
        close: usize,
    },
}

impl ParenSet {
    /// Offset of the opening parenthesis, if one was found.
    #[must_use]
    pub const fn open(self) -> Option<usize> {
        match self {
            Self::Absent => None,
            Self::Unclosed { open } | Self::Matched { open, .. } => Some(open),
        }
    }
}

/// Find the first top-level parenthesized group in `text`.
#[must_use]
pub fn find_matching_paren_set(text: &str) -> ParenSet {
    find_matching_paren_set_from(text, 0)
}

/// Find the first parenthesized group starting at or after byte `from`.
///
/// Offsets in the result are absolute within `text`, so callers can walk a
/// long expression without slicing it.
///
/// # Examples
/// ```
/// use spdx_tag::{ParenSet, find_matching_paren_set_from};
/// let text = "(a) and (b or c)";
/// assert_eq!(
///     find_matching_paren_set_from(text, 3),
///     ParenSet::Matched { open: 8, close: 15 }
/// );
/// ```
#[must_use]
pub fn find_matching_paren_set_from(text: &str, from: usize) -> ParenSet {
    scan_group(text.as_bytes(), from, text.len())
}

/// Scan `bytes[from..end]` for the first group; nothing past `end` is read.
pub(crate) fn scan_group(bytes: &[u8], from: usize, end: usize) -> ParenSet {
    let Some(window) = bytes.get(from..end) else {
        return ParenSet::Absent;
    };
    let Some(open) = window.iter().position(|&b| b == b'(').map(|i| from + i) else {
        return ParenSet::Absent;
    };

    let mut depth = 0usize;
    let mut index = open;
    while index < end {
        match bytes.get(index) {
            Some(b'(') => depth = depth.saturating_add(1),
            Some(b')') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return ParenSet::Matched { open, close: index };
                }
            }
            Some(_) => {}
            None => break,
        }
        index += 1;
    }
    ParenSet::Unclosed { open }
}
