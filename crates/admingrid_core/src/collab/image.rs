//! Image tag collaborator.

use crate::html::{Element, Markup};

/// Resolves a relative media path into an `<img>` tag.
pub trait ImageResolver {
    fn image(&self, path: &str, alt: Option<&str>) -> Markup;
}

/// Resolves images under `{base_url}/media/system/images/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaImageResolver {
    base_url: String,
}

impl MediaImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn src(&self, path: &str) -> String {
        format!(
            "{}/media/system/images/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }
}

impl ImageResolver for MediaImageResolver {
    fn image(&self, path: &str, alt: Option<&str>) -> Markup {
        Element::new("img")
            .attr("src", self.src(path))
            .attr("alt", alt.unwrap_or(""))
            .render()
    }
}
