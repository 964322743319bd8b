//! JSON description of a formatted-text subtree.
//!
//! ```json
//! {
//!   "base_url": "http://example.com/",
//!   "style": { "text_align": "center" },
//!   "children": [
//!     { "text": "Read the " },
//!     { "tag": "a", "attrs": { "href": "docs.html" }, "children": [{ "text": "docs" }] }
//!   ]
//! }
//! ```

use anyhow::Result;
use indexmap::IndexMap;
use quill_css::{ComputedStyle, StyleMap};
use quill_dom::{DomTree, ElementData, NodeId};
use serde::Deserialize;

/// The whole input file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Input {
    /// Base URL links resolve against.
    pub base_url: Option<String>,
    /// Computed style of the formatted-text root.
    pub style: Option<ComputedStyle>,
    /// Content of the formatted-text root.
    pub children: Vec<NodeSpec>,
}

/// One node of the subtree.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// A text node.
    Text {
        /// Character data.
        text: String,
    },
    /// An element with optional attributes, style and children.
    Element(ElementSpec),
}

/// An element node.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    /// Local name.
    pub tag: String,
    /// Attributes in source order.
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    /// Computed style.
    #[serde(default)]
    pub style: Option<ComputedStyle>,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Create this node and its descendants in `dom`, detached, recording
    /// element styles in `styles`.
    pub fn build(&self, dom: &mut DomTree, styles: &mut StyleMap) -> Result<NodeId> {
        match self {
            Self::Text { text } => Ok(dom.create_text(text)),
            Self::Element(element) => {
                let data = element
                    .attrs
                    .iter()
                    .fold(ElementData::new(&element.tag), |data, (name, value)| {
                        data.with_attr(name, value)
                    });
                let id = dom.create_element(data);
                if let Some(style) = &element.style {
                    let _ = styles.insert(id, style.clone());
                }
                for child in &element.children {
                    let child = child.build(dom, styles)?;
                    dom.append_child(id, child)?;
                }
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_elements_with_styles() {
        let input: Input = serde_json::from_str(
            r##"{
                "base_url": "http://example.com/",
                "children": [
                    { "text": "see " },
                    {
                        "tag": "a",
                        "attrs": { "href": "docs.html", "title": "Docs" },
                        "style": { "color": "#00f" },
                        "children": [{ "text": "docs" }]
                    }
                ]
            }"##,
        )
        .unwrap();

        let mut dom = DomTree::new();
        let mut styles = StyleMap::new();
        let text = input.children[0].build(&mut dom, &mut styles).unwrap();
        let link = input.children[1].build(&mut dom, &mut styles).unwrap();

        assert_eq!(dom.as_text(text), Some("see "));
        assert_eq!(dom.local_name(link), Some("a"));
        assert_eq!(dom.get_attribute(link, "href"), Some("docs.html"));
        let names: Vec<_> = dom
            .as_element(link)
            .unwrap()
            .attrs
            .keys()
            .cloned()
            .collect();
        assert_eq!(names, ["href", "title"]);
        assert_eq!(dom.text_content(link).as_deref(), Some("docs"));
        assert!(styles.contains_key(&link));
    }

    #[test]
    fn rejects_unknown_element_fields() {
        let result = serde_json::from_str::<Input>(r#"{ "children": [], "extra": 1 }"#);
        assert!(result.is_err());
    }
}
