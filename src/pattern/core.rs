//! Template compilation and path matching.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::alias::AliasTable;

/// Parameters bound by a successful match, keyed by placeholder name.
pub type Params = HashMap<String, String>;

/// A `{name}` placeholder; group 1 is the name.
static PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").expect("parameter pattern should be valid"));

/// A `{name?}` placeholder together with the slash that precedes it, if any.
static OPTIONAL_PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(/?)\{([A-Za-z0-9_-]+)\?\}").expect("optional parameter pattern should be valid")
});

/// Escapes that [`regex::escape`] adds to template syntax and to `-`,
/// which placeholder names may contain.
static UNESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\([{}?-])").expect("unescape pattern should be valid"));

/// Canonical form of a path or template: trimmed of surrounding whitespace,
/// exactly one leading `/`, no trailing `/`.
///
/// Empty input (or input that trims down to nothing but slashes) normalizes
/// to `/`. The function is idempotent, so already-normalized paths pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use waypost::normalize_path;
///
/// assert_eq!(normalize_path(" user/5/ "), "/user/5");
/// assert_eq!(normalize_path("/feed"), "/feed");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_owned();
    }
    let inner = trimmed.trim_matches('/');
    format!("/{inner}")
}

/// A route template compiled to an anchored regex plus the placeholder
/// names it captures, in template order.
///
/// Compilation is a pure function of the template and the alias table
/// passed in; a `PathPattern` holds no reference back to either.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    captures: Vec<String>,
}

impl PathPattern {
    /// Compile `template` against `aliases`.
    ///
    /// The template is normalized (see [`normalize_path`]), placeholder
    /// syntax is separated from literal text, `/{name?}` spans become
    /// optional groups that consume their slash together with the segment,
    /// and each `{name}` turns into one capturing group: the alias fragment
    /// for `name` verbatim when the table has one, otherwise `[^/]+`. The
    /// result is anchored at both ends, so a path matches whole or not at
    /// all.
    ///
    /// # Errors
    ///
    /// Fails when the assembled regex is rejected, which in practice means
    /// a malformed alias fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use waypost::{AliasTable, PathPattern};
    ///
    /// # fn main() -> Result<(), waypost::PatternError> {
    /// let mut aliases = AliasTable::new();
    /// aliases.set("id", "[0-9]+");
    ///
    /// let pattern = PathPattern::compile("user/{id}/{section?}", &aliases)?;
    /// assert_eq!(pattern.capture_names(), ["id", "section"]);
    /// assert!(pattern.match_path("/user/7/profile").is_some());
    /// assert!(pattern.match_path("/user/seven").is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn compile(template: &str, aliases: &AliasTable) -> Result<Self, PatternError> {
        let normalized = normalize_path(template);
        let escaped = regex::escape(&normalized);
        let unescaped = UNESCAPE.replace_all(&escaped, "$1");
        // Fold each `/{name?}` into a group that matches slash and segment
        // together or not at all, leaving a plain `{name}` inside it.
        let skeleton = OPTIONAL_PARAMETER.replace_all(&unescaped, "(?:${1}{${2}})?");

        let mut captures = Vec::new();
        let mut compiled = String::with_capacity(skeleton.len() + 8);
        compiled.push('^');
        let mut tail = 0;
        for span in PARAMETER.find_iter(&skeleton) {
            push_literal(&mut compiled, &skeleton[tail..span.start()]);
            let name = &span.as_str()[1..span.as_str().len() - 1];
            match aliases.fragment(name) {
                Some(fragment) => {
                    compiled.push('(');
                    compiled.push_str(fragment);
                    compiled.push(')');
                }
                None => compiled.push_str("([^/]+)"),
            }
            captures.push(name.to_owned());
            tail = span.end();
        }
        push_literal(&mut compiled, &skeleton[tail..]);
        compiled.push('$');

        trace!(template = %normalized, regex = %compiled, "template compiled");
        match Regex::new(&compiled) {
            Ok(regex) => Ok(Self {
                template: normalized,
                regex,
                captures,
            }),
            Err(source) => Err(PatternError {
                template: normalized,
                pattern: compiled,
                source,
            }),
        }
    }

    /// The normalized template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in the order they appear in the template.
    #[must_use]
    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }

    /// Match a normalized path and bind its parameters.
    ///
    /// Optional placeholders that did not participate in the match are
    /// absent from the result rather than bound to an empty string. When a
    /// name appears more than once in the template, the rightmost occurrence
    /// wins.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let found = self.regex.captures(path)?;
        let mut params = Params::new();
        for (index, name) in self.captures.iter().enumerate() {
            if let Some(value) = found.get(index + 1) {
                params.insert(name.clone(), value.as_str().to_owned());
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Append literal template text, re-escaping any brace that survived to
/// this point. Such braces are plain text, but the regex engine would
/// read them as repetition syntax.
fn push_literal(out: &mut String, chunk: &str) {
    for ch in chunk.chars() {
        if ch == '{' || ch == '}' {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// A template whose assembled regex was rejected by the engine.
///
/// Raised at registration time, never during matching.
#[derive(Debug, Clone)]
pub struct PatternError {
    template: String,
    pattern: String,
    source: regex::Error,
}

impl PatternError {
    /// The normalized template that failed.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The regex the template expanded to.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route template {:?} produced an invalid matcher {:?}: {}",
            self.template, self.pattern, self.source
        )
    }
}

impl Error for PatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Template arguments accepted by the registration surface: a single
/// template or a list of synonym templates.
pub trait IntoPatterns {
    /// The templates, in the order they should be tried.
    fn into_patterns(self) -> Vec<String>;
}

impl IntoPatterns for &str {
    fn into_patterns(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoPatterns for String {
    fn into_patterns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoPatterns for &String {
    fn into_patterns(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoPatterns for Vec<String> {
    fn into_patterns(self) -> Vec<String> {
        self
    }
}

impl IntoPatterns for Vec<&str> {
    fn into_patterns(self) -> Vec<String> {
        self.into_iter().map(str::to_owned).collect()
    }
}

impl IntoPatterns for &[&str] {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|t| (*t).to_owned()).collect()
    }
}

impl<const N: usize> IntoPatterns for [&str; N] {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|t| (*t).to_owned()).collect()
    }
}

impl<const N: usize> IntoPatterns for &[&str; N] {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|t| (*t).to_owned()).collect()
    }
}
