//! Configuration options for FlowDoc parsing.
//!
//! The format itself has no knobs: indentation is always two columns and the
//! stringifier output is fixed. What can be configured is how forgiving the
//! tree parser is about indentation, and how deeply sections may nest.
//!
//! ## Examples
//!
//! ```rust
//! use flowdoc::{parse_with_options, ParseOptions};
//!
//! // Three leading spaces round down to one level by default...
//! assert!(parse_with_options("a:\n   b = 1\n", &ParseOptions::new()).is_ok());
//!
//! // ...and are rejected in strict mode.
//! assert!(parse_with_options("a:\n   b = 1\n", &ParseOptions::strict()).is_err());
//! ```

/// Default limit on section nesting, matching `serde_json`'s recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling the indentation-tree parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject odd leading-space counts and indentation deeper than the
    /// innermost open section instead of tolerating them.
    pub strict_indentation: bool,
    /// Maximum number of nested sections. Deeper input is a syntax error in
    /// every mode.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict_indentation: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default, permissive options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert!(!options.strict_indentation);
/// assert_eq!(options.max_depth, flowdoc::options::DEFAULT_MAX_DEPTH);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that turn indentation irregularities into syntax errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::ParseOptions;
    ///
    /// assert!(ParseOptions::strict().strict_indentation);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            strict_indentation: true,
            ..Self::default()
        }
    }

    /// Sets whether indentation irregularities are errors.
    #[must_use]
    pub fn with_strict_indentation(mut self, strict: bool) -> Self {
        self.strict_indentation = strict;
        self
    }

    /// Sets the maximum number of nested sections.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::{parse_with_options, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_max_depth(1);
    /// assert!(parse_with_options("a:\n  b = 1\n", &options).is_ok());
    /// assert!(parse_with_options("a:\n  b:\n    c = 1\n", &options).is_err());
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
