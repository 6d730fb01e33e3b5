//! FlowDoc Format Reference
//!
//! This module documents the FlowDoc text format as read and written by this
//! library.
//!
//! # Overview
//!
//! FlowDoc is an indentation-structured configuration format. A document is a
//! mapping; every significant line is either a section header or an
//! assignment.
//!
//! ```text
//! # service settings
//! app:
//!   name = "Demo App"
//!   version = 1.5
//!   debug = false
//!   tags = [web, api]
//!   limits:
//!     burst = 20
//! ```
//!
//! # Lines
//!
//! - Tabs count as two spaces.
//! - `#` starts a comment that runs to the end of the line, even inside quotes.
//! - Blank and comment-only lines are skipped.
//! - Indentation is two spaces per level. Odd counts round down unless
//!   [`ParseOptions::strict`](crate::ParseOptions::strict) is used.
//!
//! ## Section headers
//!
//! A line whose trimmed text ends with `:` opens a nested mapping. The key is
//! everything before the final `:`. Lines indented one level deeper belong to
//! it; the first line at the same level or shallower closes it.
//!
//! ## Assignments
//!
//! Any other line containing `=` is split on the first `=`. Both sides are
//! trimmed; the right side is a literal. A later assignment to the same key
//! replaces the value but keeps the key's position.
//!
//! Lines that are neither are ignored and reported through
//! [`Diagnostics`](crate::Diagnostics).
//!
//! # Literals
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Bool | `true` or `false` | `debug = false` |
//! | Integer | Optional `-`, decimal digits, fits `i64` | `port = 8080` |
//! | Float | Contains `.` | `ratio = 0.75` |
//! | String | `"quoted"` or any other bare text | `name = demo` |
//! | List | `[a, b, c]` | `tags = [web, 2, true]` |
//!
//! Quoted strings have no escapes. List items are split on every comma,
//! without regard for quotes or brackets, so lists do not nest.
//!
//! # Output
//!
//! [`stringify`](crate::stringify) writes keys in insertion order. Strings are
//! quoted only when empty or containing whitespace; floats always include a
//! `.`. A mapping inside a list has no text form and is written as nothing.
//! The output ends with a single newline.
//!
//! # Models
//!
//! Two top-level keys are reserved and removed by
//! [`parse_with_model`](crate::parse_with_model):
//!
//! - `$models` declares named models. Each model has a `fields` section; each
//!   field may set `alias`, `type` (`string`, `bool`, `int`, `float`, `date`,
//!   `datetime`) and `id`.
//! - `use_model` names the model to apply.
//!
//! ```text
//! $models:
//!   Person:
//!     fields:
//!       name:
//!         alias = n
//!       birthday:
//!         alias = b
//!         type = date
//! use_model = Person
//! owner:
//!   n = "Ann Lee"
//!   b = 1990-04-01
//! ```
//!
//! Applying the model renames `n` to `name` and `b` to `birthday` inside every
//! top-level section, and checks `birthday` against `YYYY-MM-DD`. Values that
//! do not match their declared type are kept as they were. Dates and datetimes
//! are validated by shape only and stay strings.
//!
//! # Serde mapping
//!
//! - **Structs and maps**: sections
//! - **`Option::None` and unit fields**: omitted
//! - **Unit variants**: strings, `mode = Fast`
//! - **Other variants**: a section named after the variant
//! - **Sequences**: lists of scalars
//!
//! # Limitations
//!
//! - No multi-line strings
//! - No null value
//! - Lists of mappings cannot be written as text

// This module contains only documentation; no implementation code
