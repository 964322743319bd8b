//! Property tests over arbitrary content.

use std::rc::Rc;

use quickcheck_macros::quickcheck;
use quill_css::{
    ApproximateFontMetrics, LayoutContext, LayoutParticipant, SizingDirective, StyleMap,
};
use quill_dom::{DomTree, ElementData};
use quill_text::{
    FormattedText, FormattedTextConfig, LinkBridge, MarkupSurface, SurfaceChrome, escape,
    serialize,
};

/// Build a bridge whose children alternate between bare text and `b`
/// wrappers around text.
fn bridge_with(dom: &mut DomTree, runs: &[String]) -> FormattedText<MarkupSurface> {
    let surface = MarkupSurface::new(Rc::new(ApproximateFontMetrics), SurfaceChrome::default());
    let mut bridge = FormattedText::create(
        dom,
        surface,
        LinkBridge::default(),
        FormattedTextConfig::default(),
    );
    for (i, run) in runs.iter().enumerate() {
        let text = dom.create_text(run);
        if i % 2 == 0 {
            bridge.insert_child(dom, text, None).unwrap();
        } else {
            let b = dom.create_element(ElementData::new("b"));
            dom.append_child(b, text).unwrap();
            bridge.insert_child(dom, b, None).unwrap();
        }
    }
    bridge
}

#[quickcheck]
fn minimum_width_never_exceeds_preferred(runs: Vec<String>, parent_width: u16) -> bool {
    let mut dom = DomTree::new();
    let mut bridge = bridge_with(&mut dom, &runs);
    let styles = StyleMap::new();
    let cx = LayoutContext::new(&dom, &styles);
    let parent_width = f32::from(parent_width);
    let min = bridge.intrinsic_content_width(&cx, SizingDirective::Minimum, parent_width);
    let pref = bridge.intrinsic_content_width(&cx, SizingDirective::Preferred, parent_width);
    min <= pref + 1e-3
}

#[quickcheck]
fn width_queries_are_idempotent(runs: Vec<String>) -> bool {
    let mut dom = DomTree::new();
    let mut bridge = bridge_with(&mut dom, &runs);
    let styles = StyleMap::new();
    let cx = LayoutContext::new(&dom, &styles);
    let first = bridge.intrinsic_content_width(&cx, SizingDirective::Preferred, 500.0);
    let fragment = bridge.fragment().to_string();
    let second = bridge.intrinsic_content_width(&cx, SizingDirective::Preferred, 500.0);
    first.to_bits() == second.to_bits() && fragment == bridge.fragment() && !bridge.is_dirty()
}

#[quickcheck]
fn escaped_text_has_no_markup_characters(text: String) -> bool {
    let escaped = escape(&text);
    !escaped.contains(['<', '>', '"', '\''])
        && escaped
            .match_indices('&')
            .all(|(i, _)| escaped[i..].find(';').is_some_and(|end| end <= 6))
}

#[quickcheck]
fn serialized_text_never_leaks_raw_markup(runs: Vec<String>) -> bool {
    let mut dom = DomTree::new();
    let bridge = bridge_with(&mut dom, &runs);
    let fragment = serialize(&dom, &StyleMap::new(), bridge.node());
    // Every '<' in the fragment opens one of the wrappers the serializer
    // writes itself.
    fragment.match_indices('<').all(|(i, _)| {
        let rest = &fragment[i..];
        ["<div", "</div>", "<span ", "</span>"]
            .iter()
            .any(|tag| rest.starts_with(tag))
    })
}
