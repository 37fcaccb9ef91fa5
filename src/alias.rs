use std::collections::HashMap;

/// Named regex fragments that constrain `{name}` placeholders.
///
/// Aliases are plain data: a route compiled against a table receives a
/// snapshot (`Clone`) of it, so later mutations never reach already-built
/// routes. Re-registering a name overwrites the previous fragment (last
/// write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    fragments: HashMap<String, String>,
}

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the fragment for `alias`.
    ///
    /// The fragment is spliced into compiled patterns verbatim, wrapped in
    /// one capturing group, so plain alternation like `on|off` is safe.
    /// Capturing parens inside a fragment shift the bindings of later
    /// placeholders; use `(?:...)` when a fragment needs grouping.
    ///
    /// Returns the fragment it replaced, if any.
    pub fn set(&mut self, alias: impl Into<String>, fragment: impl Into<String>) -> Option<String> {
        self.fragments.insert(alias.into(), fragment.into())
    }

    /// Fragment registered for `alias`, if any.
    #[must_use]
    pub fn fragment(&self, alias: &str) -> Option<&str> {
        self.fragments.get(alias).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate `(alias, fragment)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fragments
            .iter()
            .map(|(alias, fragment)| (alias.as_str(), fragment.as_str()))
    }
}

impl<A: Into<String>, F: Into<String>> FromIterator<(A, F)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (A, F)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (alias, fragment) in iter {
            table.set(alias, fragment);
        }
        table
    }
}
