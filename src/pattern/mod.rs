//! # Pattern Module
//!
//! Compiles route templates into anchored regexes and matches normalized
//! paths against them.
//!
//! ## Overview
//!
//! A template is ordinary path text with `{name}` placeholders, `{name?}`
//! optional placeholders, and `\{`/`\}`/`\?` escapes for the rare literal
//! use of those characters. Compilation produces a [`PathPattern`]: one
//! regex anchored at both ends plus the placeholder names in template
//! order. Matching walks the regex's capture groups and binds each
//! participating group to its name, so an optional segment that was absent
//! simply has no entry in the resulting [`Params`] map.
//!
//! Placeholders are constrained through an [`AliasTable`](crate::AliasTable):
//! a name with a registered fragment compiles to that fragment verbatim,
//! anything else compiles to `[^/]+` (one segment, any content).
//!
//! ## Example
//!
//! ```
//! use waypost::{AliasTable, PathPattern};
//!
//! let mut aliases = AliasTable::new();
//! aliases.set("id", "[0-9]+");
//!
//! let pattern = PathPattern::compile("images/{id}.{ext}", &aliases)
//!     .unwrap();
//! let params = pattern.match_path("/images/42.png").unwrap();
//! assert_eq!(params["id"], "42");
//! assert_eq!(params["ext"], "png");
//!
//! // The dot is literal text, not a wildcard.
//! assert!(pattern.match_path("/images/42xpng").is_none());
//! ```

mod core;

#[cfg(test)]
mod tests;

pub use core::{normalize_path, IntoPatterns, Params, PathPattern, PatternError};
