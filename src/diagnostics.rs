//! Records of irregularities that FlowDoc tolerates instead of rejecting.
//!
//! Parsing, model extraction and model application are best-effort: a line
//! that is neither a section nor an assignment is ignored, a malformed
//! `$models` entry is skipped, and a value that fails typed coercion keeps its
//! original form. None of these change the result. A [`Diagnostics`] collector
//! makes them visible for tests and tooling; every entry is also logged at
//! `debug` level through the `log` facade.
//!
//! ```rust
//! use flowdoc::{DiagnosticKind, Parser};
//!
//! let mut parser = Parser::from_str("a = 1\nnot an assignment\n");
//! let doc = parser.parse().unwrap();
//!
//! assert_eq!(doc.len(), 1);
//! let diagnostics = parser.diagnostics();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics.iter().next().unwrap().kind, DiagnosticKind::IgnoredLine);
//! ```

use std::fmt;

/// What kind of irregularity was tolerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A line with neither a trailing `:` nor an `=`.
    IgnoredLine,
    /// Leading whitespace was not a multiple of two.
    OddIndentation,
    /// A line was indented deeper than the innermost open section.
    IndentJump,
    /// A `$models` entry (or the block itself) had the wrong shape.
    SkippedModel,
    /// A field entry inside a model had the wrong shape.
    SkippedField,
    /// A field attribute (`alias`, `type`, `id`) was unusable; the default applies.
    InvalidAttribute,
    /// A value failed typed coercion and was kept unchanged.
    CoercionFallback,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::IgnoredLine => "ignored line",
            DiagnosticKind::OddIndentation => "odd indentation",
            DiagnosticKind::IndentJump => "indentation jump",
            DiagnosticKind::SkippedModel => "skipped model",
            DiagnosticKind::SkippedField => "skipped field",
            DiagnosticKind::InvalidAttribute => "invalid attribute",
            DiagnosticKind::CoercionFallback => "coercion fallback",
        };
        f.write_str(name)
    }
}

/// A single tolerated irregularity.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source line, when the irregularity came from document text.
    pub line: Option<usize>,
    /// Dotted key path of the affected entry; empty for whole lines.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        if !self.path.is_empty() {
            write!(f, "{}: ", self.path)?;
        }
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// An ordered collection of [`Diagnostic`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic tied to a source line.
    pub fn at_line(&mut self, kind: DiagnosticKind, line: usize, message: impl Into<String>) {
        self.push(Diagnostic {
            kind,
            line: Some(line),
            path: String::new(),
            message: message.into(),
        });
    }

    /// Records a diagnostic tied to a key path in the tree.
    pub fn at_path(&mut self, kind: DiagnosticKind, path: &str, message: impl Into<String>) {
        self.push(Diagnostic {
            kind,
            line: None,
            path: path.to_string(),
            message: message.into(),
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Number of recorded diagnostics of the given kind.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Moves every entry of `other` to the end of this collection.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.entries.append(&mut other.entries);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Joins a parent key path and a child key with a dot.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
