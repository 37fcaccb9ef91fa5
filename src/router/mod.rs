//! # Router Module
//!
//! Ordered route registration and first-match dispatch of URL targets to
//! handlers.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Registering handlers under one or more path templates
//! - Extracting, decoding, and normalizing the path of an incoming target
//! - Matching that path against registered routes in order
//! - Invoking the winning route's handler with the bound parameters
//!
//! ## Architecture
//!
//! Routing is split into two phases:
//!
//! 1. **Registration**: templates compile to [`PathPattern`](crate::PathPattern)
//!    variants against a snapshot of the router's alias table. A bad
//!    template panics here, so misconfigured tables never reach matching.
//!
//! 2. **Matching**: a target's path is tried against each route in
//!    registration order, and within a route against each variant in the
//!    order it was added. The first hit wins; later routes are never
//!    consulted.
//!
//! [`Router::route`] answers "what would this target hit" without side
//! effects; [`Router::dispatch`] additionally runs the handler and reports
//! whether one ran.
//!
//! ## Example
//!
//! ```
//! use waypost::Router;
//!
//! let mut router = Router::new();
//! router.add("id", "[0-9]+");
//! router.register("user/{id}", |params| {
//!     println!("user {}", &params["id"]);
//! });
//!
//! assert!(router.dispatch("https://example.com/user/42"));
//! assert!(!router.dispatch("https://example.com/user/forty-two"));
//! ```

mod core;


pub use core::{Route, RouteHandler, RoutedMatch, Router};
