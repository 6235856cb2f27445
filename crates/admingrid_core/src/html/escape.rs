//! Escaping primitives and the `Markup` fragment type.

use std::fmt::{Display, Formatter};

/// Escapes text for an HTML text node or a double-quoted attribute value.
///
/// Single quotes are left intact: every attribute this crate emits is
/// double-quoted, and handlers rely on single-quoted JS literals.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes a value for embedding inside a single-quoted JS string literal.
pub fn escape_js(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// An HTML fragment that is safe to embed as-is.
///
/// Construct with [`Markup::text`] for untrusted text (escaped) or
/// [`Markup::raw`] for markup that is already rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-rendered markup without escaping.
    pub fn raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Escapes plain text into markup.
    pub fn text(value: &str) -> Self {
        Self(escape_html(value))
    }

    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    pub fn push_text(&mut self, value: &str) {
        self.0.push_str(&escape_html(value));
    }

    pub fn push_raw(&mut self, value: &str) {
        self.0.push_str(value);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(value: Markup) -> Self {
        value.0
    }
}

impl FromIterator<Markup> for Markup {
    fn from_iter<I: IntoIterator<Item = Markup>>(iter: I) -> Self {
        let mut joined = Markup::new();
        for part in iter {
            joined.push(&part);
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, escape_js, Markup};

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b title="x">Tom & Jerry</b>"#),
            "&lt;b title=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_html_keeps_single_quotes() {
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn escape_js_quotes_single_quotes_and_backslashes() {
        assert_eq!(escape_js(r"a'b\c"), r"a\'b\\c");
        assert_eq!(escape_js("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn text_escapes_but_raw_does_not() {
        assert_eq!(Markup::text("<i>").as_str(), "&lt;i&gt;");
        assert_eq!(Markup::raw("<i>").as_str(), "<i>");
    }

    #[test]
    fn collects_fragments_in_order() {
        let joined: Markup = vec![Markup::raw("<a>"), Markup::text("&"), Markup::raw("</a>")]
            .into_iter()
            .collect();
        assert_eq!(joined.as_str(), "<a>&amp;</a>");
    }
}
