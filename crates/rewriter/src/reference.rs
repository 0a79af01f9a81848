//! Text-level scanning of asset references.
//!
//! Markup is never parsed into a tree: `href`/`src` attribute values and CSS
//! `url()` values are found with regular expressions and handed to a rule.
//! The rule returns `Some(new_value)` to rewrite a reference or `None` to
//! leave it untouched. Quoting is preserved.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// `href="…"`, `src='…'`
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(href|src)=(?:"([^"]+)"|'([^']+)')"#).unwrap());

/// `url(…)`, `url("…")`, `url('…')`
static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\((?:"([^"()]+)"|'([^'()]+)'|([^"'()]+))\)"#).unwrap()
});

/// Apply `rule` to every attribute and `url()` reference in `text`.
///
/// Borrows the input when it contains no references at all.
pub fn rewrite_references<'a, F>(text: &'a str, rule: F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<String>,
{
    let attrs = ATTR_RE.replace_all(text, |caps: &Captures| rewrite_attr(caps, &rule));
    match attrs {
        Cow::Borrowed(text) => {
            CSS_URL_RE.replace_all(text, |caps: &Captures| rewrite_css_url(caps, &rule))
        }
        Cow::Owned(text) => Cow::Owned(
            CSS_URL_RE
                .replace_all(&text, |caps: &Captures| rewrite_css_url(caps, &rule))
                .into_owned(),
        ),
    }
}

fn rewrite_attr<F>(caps: &Captures, rule: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let (quote, value) = match (caps.get(2), caps.get(3)) {
        (Some(value), _) => ('"', value.as_str()),
        (None, Some(value)) => ('\'', value.as_str()),
        (None, None) => return caps[0].to_string(),
    };

    match rule(value) {
        Some(new_value) => format!("{}={quote}{new_value}{quote}", &caps[1]),
        None => caps[0].to_string(),
    }
}

fn rewrite_css_url<F>(caps: &Captures, rule: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let (quote, value) = match (caps.get(1), caps.get(2), caps.get(3)) {
        (Some(value), _, _) => ("\"", value.as_str()),
        (None, Some(value), _) => ("'", value.as_str()),
        (None, None, Some(value)) => ("", value.as_str()),
        _ => return caps[0].to_string(),
    };

    match rule(value) {
        Some(new_value) => format!("url({quote}{new_value}{quote})"),
        None => caps[0].to_string(),
    }
}

/// True for references that already point somewhere absolute
pub fn is_absolute_or_external(value: &str) -> bool {
    value.starts_with('/') || value.starts_with("http://") || value.starts_with("https://")
}

/// Strip `?query` and `#fragment` so suffix checks see the file name.
pub fn path_part(value: &str) -> &str {
    value.split(['?', '#']).next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(value: &str) -> Option<String> {
        value.starts_with("x").then(|| value.to_uppercase())
    }

    #[test]
    fn test_attributes_keep_quote_style() {
        let html = r#"<a href="x1">a</a><img src='x2'>"#;
        assert_eq!(
            rewrite_references(html, upper),
            r#"<a href="X1">a</a><img src='X2'>"#
        );
    }

    #[test]
    fn test_css_urls_all_quote_styles() {
        let css = r#"a{background:url(x1)} b{background:url("x2")} c{background:url('x3')}"#;
        assert_eq!(
            rewrite_references(css, upper),
            r#"a{background:url(X1)} b{background:url("X2")} c{background:url('X3')}"#
        );
    }

    #[test]
    fn test_unmatched_references_untouched() {
        let html = r#"<a href="keep">k</a><div style="background:url(keep.png)"></div>"#;
        assert_eq!(rewrite_references(html, upper), html);
        assert!(matches!(
            rewrite_references("<p>plain</p>", upper),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_other_attributes_ignored() {
        let html = r#"<div title="x-title" alt="xalt"></div>"#;
        assert_eq!(rewrite_references(html, upper), html);
    }

    #[test]
    fn test_is_absolute_or_external() {
        assert!(is_absolute_or_external("/govhub/assets/a.css"));
        assert!(is_absolute_or_external("//cdn.example/a.js"));
        assert!(is_absolute_or_external("https://example.com/x"));
        assert!(is_absolute_or_external("http://example.com/x"));
        assert!(!is_absolute_or_external("assets/a.css"));
        assert!(!is_absolute_or_external("../assets/a.css"));
    }

    #[test]
    fn test_path_part() {
        assert_eq!(path_part("./index.js?v=3"), "./index.js");
        assert_eq!(path_part("./page.html#top"), "./page.html");
        assert_eq!(path_part("./plain.css"), "./plain.css");
    }
}
