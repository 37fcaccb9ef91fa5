//! Route table, matching, and handler dispatch.

use std::fmt;
use std::ops::Index;

use tracing::{debug, info};
use url::Url;

use crate::alias::AliasTable;
use crate::pattern::{normalize_path, IntoPatterns, Params, PathPattern};

/// Handler invoked when a target dispatches: receives the original target,
/// the matched route, and the bound parameters.
pub type RouteHandler = Box<dyn Fn(&str, &Route, &Params) + Send + Sync + 'static>;

/// A registered handler with one or more compiled pattern variants.
///
/// The first template passed at registration is the route's canonical
/// pattern; [`Route::add_alias`] appends synonym templates that reach the
/// same handler. Variants are tried in the order they were added.
pub struct Route {
    pattern: String,
    variants: Vec<PathPattern>,
    aliases: AliasTable,
    handler: RouteHandler,
}

impl Route {
    /// Compile `templates` against `aliases` and bundle them with `handler`.
    ///
    /// # Panics
    ///
    /// Panics when `templates` is empty or a template fails to compile.
    /// Registration happens at application startup, where a bad route is a
    /// configuration error worth failing loudly for.
    pub(crate) fn new(templates: Vec<String>, aliases: AliasTable, handler: RouteHandler) -> Self {
        assert!(
            !templates.is_empty(),
            "a route requires at least one pattern"
        );
        let mut route = Self {
            pattern: normalize_path(&templates[0]),
            variants: Vec::with_capacity(templates.len()),
            aliases,
            handler,
        };
        for template in &templates {
            route.push_variant(template);
        }
        route
    }

    fn push_variant(&mut self, template: &str) {
        let variant = match PathPattern::compile(template, &self.aliases) {
            Ok(variant) => variant,
            Err(err) => panic!("{err}"),
        };
        debug!(route = %self.pattern, variant = %variant.template(), "pattern variant compiled");
        self.variants.push(variant);
    }

    /// The canonical (first-registered) template, normalized.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Compiled pattern variants in the order they are tried.
    #[must_use]
    pub fn variants(&self) -> &[PathPattern] {
        &self.variants
    }

    /// Append synonym template(s) that dispatch to this route's handler.
    ///
    /// New variants compile against the alias table captured when the route
    /// was registered; parameter aliases added to the router afterwards do
    /// not apply.
    ///
    /// # Panics
    ///
    /// Panics when a template fails to compile, as at registration.
    pub fn add_alias(&mut self, patterns: impl IntoPatterns) -> &mut Self {
        for template in patterns.into_patterns() {
            self.push_variant(&template);
        }
        self
    }

    /// Parameters bound by the first variant matching `path`, which must
    /// already be normalized.
    pub(crate) fn matches(&self, path: &str) -> Option<Params> {
        self.variants
            .iter()
            .find_map(|variant| variant.match_path(path))
    }

    fn invoke(&self, target: &str, params: &Params) {
        (self.handler)(target, self, params);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("variants", &self.variants.len())
            .finish_non_exhaustive()
    }
}

/// A successful match: the winning route plus its bound parameters.
#[derive(Debug)]
pub struct RoutedMatch<'r> {
    route: &'r Route,
    parameters: Params,
}

impl<'r> RoutedMatch<'r> {
    /// The route that won the match.
    #[must_use]
    pub fn route(&self) -> &'r Route {
        self.route
    }

    /// Whether a parameter named `name` was bound.
    ///
    /// An optional placeholder that went unmatched is absent, not bound to
    /// an empty string.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Value bound to `name`, or `default` when it is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// All bound parameters.
    #[must_use]
    pub fn parameters(&self) -> &Params {
        &self.parameters
    }
}

impl Index<&str> for RoutedMatch<'_> {
    type Output = str;

    /// # Panics
    ///
    /// Panics when no parameter named `name` was bound; use
    /// [`RoutedMatch::get`] for a fallible lookup.
    fn index(&self, name: &str) -> &str {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no parameter named {name:?} was captured"),
        }
    }
}

/// An ordered route table with first-match dispatch.
///
/// Routes are tried strictly in registration order and the first route
/// whose variants match wins. There is no specificity scoring; register
/// more specific routes first.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
    aliases: AliasTable,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite a parameter alias.
    ///
    /// The alias applies to routes registered after this call; existing
    /// routes keep the table they were compiled against. Re-registering a
    /// name replaces its fragment.
    pub fn add(&mut self, alias: impl Into<String>, fragment: impl Into<String>) {
        let alias = alias.into();
        let fragment = fragment.into();
        match self.aliases.set(alias.clone(), fragment.clone()) {
            Some(previous) => {
                debug!(%alias, %fragment, %previous, "parameter alias replaced");
            }
            None => debug!(%alias, %fragment, "parameter alias registered"),
        }
    }

    /// Register template(s) with a handler that only needs the bound
    /// parameters.
    ///
    /// Returns the new route, so synonym templates can be chained on with
    /// [`Route::add_alias`].
    ///
    /// # Panics
    ///
    /// Panics when `patterns` is empty or a template fails to compile.
    pub fn register<H>(&mut self, patterns: impl IntoPatterns, handler: H) -> &mut Route
    where
        H: Fn(&Params) + Send + Sync + 'static,
    {
        self.register_full(patterns, move |_, _, params| handler(params))
    }

    /// Register template(s) with a handler that receives the original
    /// target, the matched route, and the bound parameters.
    ///
    /// # Panics
    ///
    /// Panics when `patterns` is empty or a template fails to compile.
    pub fn register_full<H>(&mut self, patterns: impl IntoPatterns, handler: H) -> &mut Route
    where
        H: Fn(&str, &Route, &Params) + Send + Sync + 'static,
    {
        let route = Route::new(
            patterns.into_patterns(),
            self.aliases.clone(),
            Box::new(handler),
        );
        info!(route = %route.pattern(), variants = route.variants().len(), "route registered");
        let slot = self.routes.len();
        self.routes.push(route);
        &mut self.routes[slot]
    }

    /// Registered routes in precedence order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable route access, e.g. to chain [`Route::add_alias`] onto a
    /// route registered earlier.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Match `target` against the table without invoking any handler.
    ///
    /// The target may be an absolute URL or a bare path; its path component
    /// is extracted, percent-decoded, and normalized before matching.
    /// Returns `None` when no usable path can be extracted or no route
    /// matches.
    #[must_use]
    pub fn route(&self, target: &str) -> Option<RoutedMatch<'_>> {
        debug!(%target, "route match attempt");
        match target_path(target) {
            Some(path) => self.route_normalized(&path),
            None => {
                debug!(%target, "target has no routable path");
                None
            }
        }
    }

    /// Match an already-parsed URL against the table.
    #[must_use]
    pub fn route_url(&self, url: &Url) -> Option<RoutedMatch<'_>> {
        debug!(url = %url, "route match attempt");
        match url_path(url) {
            Some(path) => self.route_normalized(&path),
            None => {
                debug!(url = %url, "url has no routable path");
                None
            }
        }
    }

    /// Match `target` and invoke the winning route's handler with the
    /// original target string. Returns whether a handler ran.
    pub fn dispatch(&self, target: &str) -> bool {
        match self.route(target) {
            Some(matched) => {
                matched.route.invoke(target, &matched.parameters);
                true
            }
            None => false,
        }
    }

    /// Match an already-parsed URL and invoke the winning route's handler.
    /// Returns whether a handler ran.
    pub fn dispatch_url(&self, url: &Url) -> bool {
        match self.route_url(url) {
            Some(matched) => {
                matched.route.invoke(url.as_str(), &matched.parameters);
                true
            }
            None => false,
        }
    }

    fn route_normalized(&self, path: &str) -> Option<RoutedMatch<'_>> {
        let path = normalize_path(path);
        for route in &self.routes {
            if let Some(parameters) = route.matches(&path) {
                debug!(%path, route = %route.pattern(), parameters = ?parameters, "route matched");
                return Some(RoutedMatch { route, parameters });
            }
        }
        debug!(%path, "no route matched");
        None
    }
}

/// Path component of a target that may be an absolute URL, a relative
/// reference, or a bare path.
fn target_path(target: &str) -> Option<String> {
    match Url::parse(target) {
        Ok(url) => url_path(&url),
        // Bare paths and relative references ("feed", "/user/5?tab=posts")
        // carry no scheme; everything before the query or fragment is the
        // path.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let end = target.find(['?', '#']).unwrap_or(target.len());
            decode_path(&target[..end])
        }
        Err(_) => None,
    }
}

fn url_path(url: &Url) -> Option<String> {
    if url.cannot_be_a_base() {
        // mailto:-style URLs have no path hierarchy to route on.
        return None;
    }
    decode_path(url.path())
}

/// Percent-decode a path. Sequences that do not decode to UTF-8 make the
/// target unroutable.
fn decode_path(path: &str) -> Option<String> {
    match urlencoding::decode(path) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => None,
    }
}
