//! Pattern text rewrites applied around parsing and rendering.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A reversible rewrite of pattern text.
///
/// `encode` runs on the pattern before it is parsed, `decode` on the
/// rendered output.
pub trait PatternTransformer: fmt::Debug + Send + Sync {
    fn encode(&self, pattern: &str) -> String;

    fn decode(&self, output: &str) -> String;
}

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<[/a-z]+(?P<colon>:)?[^>]*>").expect("tag pattern should compile")
});

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%(?P<entity>[^%]+)%%").expect("marker pattern should compile"));

/// Lets HTML tags appear in patterns.
///
/// Tags whose name is not followed by `:` are hidden behind `%%lt%%` and
/// `%%gt%%` markers so the parser does not read them as format groups.
/// Rendering restores them.
///
/// # Example
///
/// ```
/// use glot::dialect::{HtmlTagTransformer, PatternTransformer};
///
/// let encoded = HtmlTagTransformer.encode("<b>{Name}</b> <Link: here>");
/// assert_eq!(encoded, "%%lt%%b%%gt%%{Name}%%lt%%/b%%gt%% <Link: here>");
/// assert_eq!(HtmlTagTransformer.decode("%%lt%%b%%gt%%"), "<b>");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTagTransformer;

impl PatternTransformer for HtmlTagTransformer {
    fn encode(&self, pattern: &str) -> String {
        TAG.replace_all(pattern, |caps: &Captures<'_>| {
            let tag = &caps[0];
            if caps.name("colon").is_some() {
                tag.to_string()
            } else {
                format!("%%lt%%{}%%gt%%", &tag[1..tag.len() - 1])
            }
        })
        .into_owned()
    }

    fn decode(&self, output: &str) -> String {
        MARKER
            .replace_all(output, |caps: &Captures<'_>| match &caps["entity"] {
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_with_attributes_are_hidden() {
        let encoded = HtmlTagTransformer.encode(r#"<a href="x">go</a>"#);
        assert_eq!(encoded, r#"%%lt%%a href="x"%%gt%%go%%lt%%/a%%gt%%"#);
        assert_eq!(HtmlTagTransformer.decode(&encoded), r#"<a href="x">go</a>"#);
    }

    #[test]
    fn unknown_markers_are_kept() {
        assert_eq!(HtmlTagTransformer.decode("100%%amp%%"), "100%%amp%%");
    }
}
