//! # Waypost
//!
//! **Waypost** is a regex-powered URL template router: it compiles path
//! templates like `user/{id}/{section?}` into anchored matchers, keeps them
//! in strict registration order, and dispatches URL strings to the first
//! route that matches.
//!
//! ## Overview
//!
//! A router owns an ordered table of routes and a set of parameter
//! aliases. Templates are compiled once, at registration, into one regex
//! per template; matching a target is a linear scan that stops at the
//! first hit. There is no specificity scoring and no re-sorting: the
//! application's registration order is the precedence order.
//!
//! ## Template Syntax
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `{name}` | Required parameter capturing one path segment (`[^/]+`), or the alias fragment registered for `name` |
//! | `{name?}` | Optional parameter; the preceding `/` and the segment match together or not at all |
//! | `\{`, `\}`, `\?` | Literal brace / question-mark characters |
//! | any other text | Matched literally (a `.` is a dot, not a wildcard) |
//!
//! Parameter names may contain ASCII letters, digits, `_`, and `-`.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use waypost::Router;
//!
//! let mut router = Router::new();
//! router.add("id", "[0-9]+");
//! router.add("section", "profile|activity");
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let hit = Arc::clone(&seen);
//! router.register("feed", move |_params| {
//!     hit.store(1, Ordering::SeqCst);
//! });
//!
//! let hit = Arc::clone(&seen);
//! router.register("user/{id}/{section?}", move |params| {
//!     assert_eq!(params["id"], "5");
//!     hit.store(2, Ordering::SeqCst);
//! });
//!
//! assert!(router.dispatch("https://example.com/feed"));
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//! // Bare paths work too; the optional section is simply absent here.
//! assert!(router.dispatch("/user/5"));
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//!
//! assert!(!router.dispatch("/user"));
//! ```
//!
//! ## Architecture
//!
//! - **[`pattern`]** - Template compilation to anchored regexes and path
//!   matching with ordered parameter capture
//! - **[`alias`]** - Named regex fragments that constrain `{name}`
//!   placeholders
//! - **[`router`]** - The ordered route table, match inspection, and
//!   handler dispatch
//!
//! ## Failure Model
//!
//! Bad configuration fails loudly: registering a template whose alias
//! fragment produces an invalid regex panics at registration time.
//! Matching never fails; a target that parses to no usable path, or that
//! no route matches, simply yields `None` from [`Router::route`] and
//! `false` from [`Router::dispatch`].

pub mod alias;
pub mod pattern;
pub mod router;

pub use alias::AliasTable;
pub use pattern::{normalize_path, IntoPatterns, Params, PathPattern, PatternError};
pub use router::{Route, RouteHandler, RoutedMatch, Router};
