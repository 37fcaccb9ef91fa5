use super::{normalize_path, PathPattern};
use crate::alias::AliasTable;

fn compile(template: &str) -> PathPattern {
    PathPattern::compile(template, &AliasTable::new())
        .unwrap_or_else(|err| panic!("compile failed: {err}"))
}

#[test]
fn test_normalize_path_adds_leading_slash() {
    assert_eq!(normalize_path("user/5"), "/user/5");
}

#[test]
fn test_normalize_path_strips_surrounding_noise() {
    assert_eq!(normalize_path("  /user/5/  "), "/user/5");
    assert_eq!(normalize_path("///feed///"), "/feed");
    assert_eq!(normalize_path("feed/"), "/feed");
}

#[test]
fn test_normalize_path_empty_is_root() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("   "), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("///"), "/");
}

#[test]
fn test_normalize_path_is_idempotent() {
    for raw in ["feed", " /a/b/ ", "", "/x"] {
        let once = normalize_path(raw);
        assert_eq!(normalize_path(&once), once);
    }
}

#[test]
fn test_normalize_path_keeps_interior_slashes() {
    assert_eq!(normalize_path("a//b"), "/a//b");
}

#[test]
fn test_literal_template_matches_exactly() {
    let pattern = compile("feed");
    assert!(pattern.match_path("/feed").is_some());
    assert!(pattern.match_path("/feeds").is_none());
    assert!(pattern.match_path("/fee").is_none());
    assert!(pattern.match_path("/feed/x").is_none());
    assert!(pattern.match_path("/").is_none());
    assert!(pattern.capture_names().is_empty());
}

#[test]
fn test_empty_template_matches_root() {
    let pattern = compile("");
    assert_eq!(pattern.template(), "/");
    assert!(pattern.match_path("/").is_some());
    assert!(pattern.match_path("/feed").is_none());
}

#[test]
fn test_template_is_stored_normalized() {
    let pattern = compile(" user/{id}/ ");
    assert_eq!(pattern.template(), "/user/{id}");
}

#[test]
fn test_capture_names_follow_template_order() {
    let pattern = compile("a/{first}/b/{second}/{third?}");
    assert_eq!(pattern.capture_names(), ["first", "second", "third"]);
}

#[test]
fn test_parameter_binds_one_segment() {
    let pattern = compile("user/{id}");
    let params = pattern.match_path("/user/42").unwrap();
    assert_eq!(params["id"], "42");
    assert!(pattern.match_path("/user").is_none());
    assert!(pattern.match_path("/user/42/x").is_none());
}

#[test]
fn test_parameter_excludes_slash() {
    let pattern = compile("user/{id}");
    assert!(pattern.match_path("/user/4/2").is_none());
}

#[test]
fn test_hyphen_and_underscore_in_names() {
    let pattern = compile("posts/{post-id}/{author_name}");
    let params = pattern.match_path("/posts/9/kim").unwrap();
    assert_eq!(params["post-id"], "9");
    assert_eq!(params["author_name"], "kim");
}

#[test]
fn test_literal_dot_is_not_a_wildcard() {
    let pattern = compile("images/{id}.{ext}");
    assert!(pattern.match_path("/images/1.png").is_some());
    assert!(pattern.match_path("/images/12.png").is_some());
    assert!(pattern.match_path("/images/1xpng").is_none());
}

#[test]
fn test_optional_parameter_may_be_absent() {
    let pattern = compile("foo/{bar?}");
    let present = pattern.match_path("/foo/baz").unwrap();
    assert_eq!(present["bar"], "baz");
    let absent = pattern.match_path("/foo").unwrap();
    assert!(!absent.contains_key("bar"));
}

#[test]
fn test_optional_parameter_consumes_its_slash() {
    let pattern = compile("foo/{bar?}");
    assert!(pattern.match_path("/foobar").is_none());
    assert!(pattern.match_path("/foo/").is_none());
}

#[test]
fn test_trailing_optional_chain() {
    let pattern = compile("foo/{name}/boom/{age?}/{location?}");
    assert_eq!(pattern.capture_names(), ["name", "age", "location"]);

    let none = pattern.match_path("/foo/steve/boom").unwrap();
    assert_eq!(none["name"], "steve");
    assert!(!none.contains_key("age"));
    assert!(!none.contains_key("location"));

    let one = pattern.match_path("/foo/swift/boom/4").unwrap();
    assert_eq!(one["age"], "4");
    assert!(!one.contains_key("location"));

    let both = pattern.match_path("/foo/swift/boom/4/sf").unwrap();
    assert_eq!(both["age"], "4");
    assert_eq!(both["location"], "sf");
}

#[test]
fn test_alias_fragment_constrains_match() {
    let mut aliases = AliasTable::new();
    aliases.set("bar", "[0-9]+");
    let pattern = PathPattern::compile("foo/{bar}", &aliases).unwrap();
    assert_eq!(pattern.match_path("/foo/123").unwrap()["bar"], "123");
    assert!(pattern.match_path("/foo/123abc").is_none());
    assert!(pattern.match_path("/foo/abc").is_none());
}

#[test]
fn test_alias_applies_to_optional_parameter() {
    let mut aliases = AliasTable::new();
    aliases.set("bar", "[0-9]+");
    let pattern = PathPattern::compile("foo/{bar?}", &aliases).unwrap();
    assert!(pattern.match_path("/foo").is_some());
    assert_eq!(pattern.match_path("/foo/7").unwrap()["bar"], "7");
    assert!(pattern.match_path("/foo/x").is_none());
}

#[test]
fn test_unaliased_name_falls_back_to_segment() {
    let mut aliases = AliasTable::new();
    aliases.set("bar", "[0-9]+");
    let pattern = PathPattern::compile("foo/{bar}/{baz?}", &aliases).unwrap();
    let params = pattern.match_path("/foo/1/anything").unwrap();
    assert_eq!(params["baz"], "anything");
}

#[test]
fn test_alias_fragment_with_repetition_braces() {
    let mut aliases = AliasTable::new();
    aliases.set("year", "[0-9]{4}");
    let pattern = PathPattern::compile("archive/{year}", &aliases).unwrap();
    assert!(pattern.match_path("/archive/2024").is_some());
    assert!(pattern.match_path("/archive/202").is_none());
    assert!(pattern.match_path("/archive/20245").is_none());
}

#[test]
fn test_compile_ignores_later_alias_changes() {
    let mut aliases = AliasTable::new();
    aliases.set("id", "[0-9]+");
    let pattern = PathPattern::compile("user/{id}", &aliases).unwrap();

    aliases.set("id", "[a-z]+");
    assert!(pattern.match_path("/user/5").is_some());
    assert!(pattern.match_path("/user/five").is_none());
}

#[test]
fn test_alias_alternation_binds_whole_fragment() {
    let mut aliases = AliasTable::new();
    aliases.set("mode", "on|off");
    let pattern = PathPattern::compile("switch/{mode}/{level}", &aliases).unwrap();
    let params = pattern.match_path("/switch/on/9").unwrap();
    assert_eq!(params["mode"], "on");
    assert_eq!(params["level"], "9");
    assert!(pattern.match_path("/switch/dim/9").is_none());
}

#[test]
fn test_duplicate_name_keeps_rightmost_value() {
    let pattern = compile("{id}/x/{id}");
    let params = pattern.match_path("/a/x/b").unwrap();
    assert_eq!(params["id"], "b");
}

#[test]
fn test_braces_without_a_valid_name_are_literal() {
    let pattern = compile("c/{oops!}");
    assert!(pattern.capture_names().is_empty());
    assert!(pattern.match_path("/c/{oops!}").is_some());
    assert!(pattern.match_path("/c/anything").is_none());
}

#[test]
fn test_escaped_tokens_keep_their_backslash() {
    // Backslashes written in a template survive as literal text, so fully
    // escaped braces stop being a placeholder and `\?` leaves an optional
    // backslash behind.
    let escaped = compile(r"menu/\{id\}");
    assert!(escaped.capture_names().is_empty());
    assert!(escaped.match_path(r"/menu/\{id\}").is_some());
    assert!(escaped.match_path("/menu/{id}").is_none());
    assert!(escaped.match_path("/menu/anything").is_none());

    let half = compile(r"a/\{id}");
    assert_eq!(half.capture_names(), ["id"]);
    assert_eq!(half.match_path(r"/a/\7").unwrap()["id"], "7");
    assert!(half.match_path("/a/7").is_none());

    let trailing = compile(r"q\?");
    assert!(trailing.match_path("/q").is_some());
    assert!(trailing.match_path(r"/q\").is_some());
}

#[test]
fn test_invalid_alias_fragment_reports_template() {
    let mut aliases = AliasTable::new();
    aliases.set("bad", "[0-9");
    let err = PathPattern::compile("x/{bad}", &aliases).unwrap_err();
    assert_eq!(err.template(), "/x/{bad}");
    assert!(err.pattern().contains("[0-9"));
    assert!(std::error::Error::source(&err).is_some());
}
