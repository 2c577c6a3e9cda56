//! Tag lookup over parsed documents.
//!
//! Lookups that the extractors depend on return `Result`: a missing element
//! means the page layout changed, and the report should stop rather than
//! emit blank fields.

use crate::error::{Error, Result};
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Node};
use std::fmt;

/// How a single attribute value is matched
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// Whole value equals the string
    Exact(String),
    /// Whole class string equals it, or one of the classes does
    Class(String),
    /// Regex finds a match anywhere in the value
    Pattern(Regex),
}

impl AttrMatch {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrMatch::Exact(want) => value == want,
            AttrMatch::Class(want) => {
                value == want || value.split_whitespace().any(|class| class == want)
            }
            AttrMatch::Pattern(re) => re.is_match(value),
        }
    }
}

/// Attribute constraints for a tag query. All must hold.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    constraints: Vec<(String, AttrMatch)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(value: &str) -> Self {
        Self::new().with("id", AttrMatch::Exact(value.to_string()))
    }

    pub fn class(value: &str) -> Self {
        Self::new().with("class", AttrMatch::Class(value.to_string()))
    }

    pub fn pattern(name: &str, re: Regex) -> Self {
        Self::new().with(name, AttrMatch::Pattern(re))
    }

    pub fn with(mut self, name: &str, matcher: AttrMatch) -> Self {
        self.constraints.push((name.to_string(), matcher));
        self
    }

    fn matches(&self, element: &Element) -> bool {
        self.constraints.iter().all(|(name, matcher)| {
            element
                .attr(name)
                .map_or(false, |value| matcher.matches(value))
        })
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .constraints
            .iter()
            .map(|(name, matcher)| match matcher {
                AttrMatch::Exact(v) => format!("{}={:?}", name, v),
                AttrMatch::Class(v) => format!("{}~={:?}", name, v),
                AttrMatch::Pattern(re) => format!("{}=/{}/", name, re.as_str()),
            })
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

fn is_match(element: &ElementRef<'_>, tag: &str, attrs: &Attrs) -> bool {
    element.value().name() == tag && attrs.matches(element.value())
}

/// First descendant of `scope` with the tag name and attributes
pub fn find_tag<'a>(scope: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Result<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| is_match(el, tag, attrs))
        .ok_or_else(|| {
            tracing::error!(tag, attrs = %attrs, "Tag not found");
            Error::tag_not_found(tag, attrs.to_string())
        })
}

/// Every descendant of `scope` with the tag name and attributes, in document order
pub fn find_all<'a>(scope: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Vec<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| is_match(el, tag, attrs))
        .collect()
}

/// Element owning the first text node that reads exactly `label`
pub fn find_label<'a>(scope: ElementRef<'a>, label: &str) -> Result<ElementRef<'a>> {
    scope
        .descendants()
        .find(|node| matches!(node.value(), Node::Text(text) if text.trim() == label))
        .and_then(|node| node.parent())
        .and_then(ElementRef::wrap)
        .ok_or_else(|| {
            tracing::error!(label, "Text label not found");
            Error::tag_not_found("*", format!("{{text={:?}}}", label))
        })
}

/// Next sibling that is an element, skipping text and comments
pub fn next_element<'a>(element: ElementRef<'a>) -> Result<ElementRef<'a>> {
    element
        .next_siblings()
        .find_map(ElementRef::wrap)
        .ok_or_else(|| {
            let tag = element.value().name();
            tracing::error!(after = tag, "No sibling element");
            Error::tag_not_found("*", format!("{{after=<{}>}}", tag))
        })
}

/// Required attribute value
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| Error::missing_attribute(element.value().name(), name))
}

/// All text under the element, concatenated as-is
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
