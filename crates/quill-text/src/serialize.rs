//! Inline subtree serialization.
//!
//! Renders a formatted-text subtree into a compact markup fragment with each
//! element's computed style baked in as inline `style` text, so the
//! rendering surface receiving it needs no stylesheet of its own.
//!
//! # Fragment shape
//!
//! ```text
//! <div align="center">                  alignment of the root, if any
//!   <span style="...root style...">     the root itself
//!     text <a href="..." style="...">link</a> <br> <img src="...">
//!   </span>
//! </div>
//! ```

use quill_css::{StyleSource, TextAlign};
use quill_dom::{DomTree, NodeId, NodeType};

use crate::escape::escape_into;

/// Serialize the subtree rooted at `root` into a markup fragment.
///
/// The subtree is wrapped in a block `div` carrying an `align` attribute
/// derived from the root's computed `text-align`: left (the default) adds no
/// attribute, right and center add `align="right"` / `align="center"`.
#[must_use]
pub fn serialize(dom: &DomTree, styles: &dyn StyleSource, root: NodeId) -> String {
    let mut out = String::from("<div");
    let align = styles
        .computed_style(root)
        .map_or(TextAlign::Left, |style| style.text_align());
    if let Some(value) = align.attribute_value() {
        out.push_str(" align=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
    serialize_inner(dom, styles, root, &mut out);
    out.push_str("</div>");
    out
}

/// Serialize one node and its descendants.
///
/// # Dispatch by local name
///
/// - `br`: line break, terminal.
/// - `img`: image reference carrying its `src`, terminal.
/// - `a` with an `href`: hyperlink wrapper.
/// - anything else, including `a` without `href`: generic `span` wrapper.
///
/// Text nodes emit their escaped data inside the parent's wrapper. A
/// wrapper with no children emits the element's own text content instead,
/// so text and nested markup never mix within one node.
fn serialize_inner(dom: &DomTree, styles: &dyn StyleSource, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else { return };
    match &node.node_type {
        NodeType::Text(text) => {
            escape_into(text, out);
            return;
        }
        NodeType::Document => return,
        NodeType::Element(_) | NodeType::FormattedText => {}
    }

    let name = dom.local_name(id).unwrap_or_default();
    match name {
        "br" => {
            out.push_str("<br>");
            return;
        }
        "img" => {
            out.push_str("<img src=\"");
            escape_into(dom.get_attribute(id, "src").unwrap_or_default(), out);
            out.push_str("\">");
            return;
        }
        _ => {}
    }

    let tag = match (name, dom.get_attribute(id, "href")) {
        ("a", Some(href)) => {
            out.push_str("<a href=\"");
            escape_into(href, out);
            out.push('"');
            "a"
        }
        _ => {
            out.push_str("<span");
            "span"
        }
    };

    out.push_str(" style=\"");
    if let Some(style) = styles.computed_style(id) {
        escape_into(&style.css_text(), out);
    }
    out.push_str("\">");

    let children = dom.children(id);
    if children.is_empty() {
        if let Some(text) = dom.text_content(id) {
            escape_into(&text, out);
        }
    } else {
        for &child in children {
            serialize_inner(dom, styles, child, out);
        }
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
