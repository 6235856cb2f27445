//! Element builder.

use super::escape::{escape_html, Markup};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Builder for a single HTML element.
///
/// Attribute values and `text` children are escaped on render; `child`
/// accepts `Markup`, which is trusted by construction.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Markup,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Markup::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Adds the attribute only when `value` is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Adds a valueless boolean attribute such as `selected`.
    pub fn flag(mut self, name: &'static str, enabled: bool) -> Self {
        if enabled {
            self.attrs.push((name, None));
        }
        self
    }

    pub fn text(mut self, value: &str) -> Self {
        self.children.push_text(value);
        self
    }

    pub fn child(mut self, markup: &Markup) -> Self {
        self.children.push(markup);
        self
    }

    pub fn child_element(self, element: Element) -> Self {
        let rendered = element.render();
        self.child(&rendered)
    }

    pub fn render(&self) -> Markup {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return Markup::raw(out);
        }

        out.push_str(self.children.as_str());
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        Markup::raw(out)
    }
}

impl From<Element> for Markup {
    fn from(value: Element) -> Self {
        value.render()
    }
}

#[cfg(test)]
mod tests {
    use super::Element;
    use crate::html::Markup;

    #[test]
    fn renders_attributes_in_insertion_order() {
        let html = Element::new("a")
            .attr("href", "#")
            .attr("title", "Say \"hi\"")
            .text("A & B")
            .render();
        assert_eq!(html.as_str(), r##"<a href="#" title="Say &quot;hi&quot;">A &amp; B</a>"##);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let html = Element::new("input")
            .attr("type", "checkbox")
            .flag("checked", true)
            .flag("disabled", false)
            .render();
        assert_eq!(html.as_str(), r#"<input type="checkbox" checked>"#);
    }

    #[test]
    fn trusted_children_are_not_escaped() {
        let html = Element::new("span")
            .child(&Markup::raw("<b>x</b>"))
            .render();
        assert_eq!(html.as_str(), "<span><b>x</b></span>");
    }

    #[test]
    fn optional_attributes_are_skipped_when_absent() {
        let html = Element::new("div")
            .attr_opt("id", None::<String>)
            .attr_opt("class", Some("row"))
            .render();
        assert_eq!(html.as_str(), r#"<div class="row"></div>"#);
    }
}
