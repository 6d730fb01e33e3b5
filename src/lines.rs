//! Line tokenizer: turns raw document text into normalized, significant lines.
//!
//! Each physical line is normalized by:
//!
//! 1. replacing every tab with two spaces,
//! 2. cutting everything from the first `#` to the end of the line,
//! 3. trimming trailing whitespace,
//! 4. dropping the line if nothing but whitespace is left.
//!
//! Leading whitespace survives so the tree parser can measure indentation.
//! A `#` inside a quoted string still starts a comment; the format has no
//! escape for it.
//!
//! [`Lines`] is lazy and `Clone`, so a tokenized document can be walked more
//! than once without re-reading the input.

use std::borrow::Cow;

/// One significant line of a FlowDoc document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based physical line number in the original input.
    pub number: usize,
    /// Normalized text, leading whitespace preserved.
    pub text: Cow<'a, str>,
}

impl Line<'_> {
    /// Count of leading whitespace characters.
    #[must_use]
    pub fn leading_spaces(&self) -> usize {
        self.text.chars().take_while(|c| c.is_whitespace()).count()
    }

    /// Indentation depth in two-column steps; odd counts round down.
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.leading_spaces() / 2
    }

    /// The line with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Lazy iterator over the significant lines of a document.
///
/// # Examples
///
/// ```rust
/// use flowdoc::lines::Lines;
///
/// let text = "app:   # the application\n\n\tname = demo\n# only a comment\n";
/// let lines: Vec<_> = Lines::new(text).map(|l| (l.number, l.text.into_owned())).collect();
///
/// assert_eq!(lines, vec![(1, "app:".to_string()), (3, "  name = demo".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    pub fn new(input: &'a str) -> Self {
        Lines {
            inner: input.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.inner.by_ref() {
            if let Some(text) = normalize(raw) {
                return Some(Line {
                    number: index + 1,
                    text,
                });
            }
        }
        None
    }
}

/// Normalizes one physical line, or returns `None` when it carries nothing.
fn normalize(raw: &str) -> Option<Cow<'_, str>> {
    let without_comment = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let kept = without_comment.trim_end();
    if kept.trim_start().is_empty() {
        return None;
    }
    if kept.contains('\t') {
        Some(Cow::Owned(kept.replace('\t', "  ")))
    } else {
        Some(Cow::Borrowed(kept))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<String> {
        Lines::new(text).map(|l| l.text.into_owned()).collect()
    }

    #[test]
    fn test_tabs_become_two_spaces() {
        assert_eq!(collect("\tkey = 1"), vec!["  key = 1"]);
        assert_eq!(collect("\t\tkey =\t1"), vec!["    key =  1"]);
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(collect("key = 1 # trailing"), vec!["key = 1"]);
        assert_eq!(collect("color = \"#fff\""), vec!["color = \""]);
        assert!(collect("# whole line").is_empty());
        assert!(collect("    # indented comment").is_empty());
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        assert_eq!(collect("\n   \n\t\na = 1\n\n"), vec!["a = 1"]);
    }

    #[test]
    fn test_line_numbers_follow_input() {
        let numbers: Vec<usize> = Lines::new("a:\n\n  b = 1\n# c\n  d = 2")
            .map(|l| l.number)
            .collect();
        assert_eq!(numbers, vec![1, 3, 5]);
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(collect("a:\r\n  b = 1\r\n"), vec!["a:", "  b = 1"]);
    }

    #[test]
    fn test_indent_level_rounds_down() {
        let line = Line {
            number: 1,
            text: Cow::Borrowed("   x = 1"),
        };
        assert_eq!(line.leading_spaces(), 3);
        assert_eq!(line.indent_level(), 1);
        assert_eq!(line.trimmed(), "x = 1");
    }

    #[test]
    fn test_lines_are_restartable() {
        let lines = Lines::new("a = 1\nb = 2\n");
        let first: Vec<_> = lines.clone().collect();
        let second: Vec<_> = lines.collect();
        assert_eq!(first, second);
    }
}
