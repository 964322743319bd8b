//! Integration tests for the formatted-text bridge: dirty tracking and
//! live/probe measurement.

use std::cell::RefCell;
use std::rc::Rc;

use quill_css::{
    ApproximateFontMetrics, ContentType, LayoutContext, LayoutParticipant, Rect, SizingDirective,
    Size, StyleMap, lay_out_participant,
};
use quill_dom::{DomError, DomTree, ElementCategory, ElementData, NodeId, NodeKind, NodeType};
use quill_text::{
    FormattedText, FormattedTextConfig, LinkBridge, MarkupSurface, RenderingSurface,
    SurfaceChrome, TEXT_COMPONENT_NAME, create_component,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Wraps a [`MarkupSurface`] and records every call made on it.
#[derive(Debug)]
struct RecordingSurface {
    role: &'static str,
    inner: MarkupSurface,
    log: Log,
}

impl RecordingSurface {
    fn live(log: &Log) -> Self {
        Self {
            role: "live",
            inner: MarkupSurface::new(Rc::new(ApproximateFontMetrics), SurfaceChrome::default()),
            log: Rc::clone(log),
        }
    }

    fn record(&self, call: &str) {
        self.log.borrow_mut().push(format!("{} {call}", self.role));
    }
}

impl RenderingSurface for RecordingSurface {
    fn set_markup(&mut self, markup: &str) {
        self.record("set_markup");
        self.inner.set_markup(markup);
    }

    fn markup(&self) -> &str {
        self.inner.markup()
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.record("set_bounds");
        self.inner.set_bounds(bounds);
    }

    fn bounds(&self) -> Rect {
        self.inner.bounds()
    }

    fn minimum_size(&self) -> Size {
        self.record("minimum_size");
        self.inner.minimum_size()
    }

    fn preferred_size(&self) -> Size {
        self.record("preferred_size");
        self.inner.preferred_size()
    }

    fn spawn_probe(&self) -> Self {
        self.record("spawn_probe");
        Self {
            role: "probe",
            inner: self.inner.spawn_probe(),
            log: Rc::clone(&self.log),
        }
    }

    fn link_at(&self, x: f32, y: f32) -> Option<String> {
        self.inner.link_at(x, y)
    }
}

struct Fixture {
    dom: DomTree,
    styles: StyleMap,
    bridge: FormattedText<RecordingSurface>,
    log: Log,
}

impl Fixture {
    fn new() -> Self {
        let mut dom = DomTree::new();
        let log = Log::default();
        let bridge = FormattedText::create(
            &mut dom,
            RecordingSurface::live(&log),
            LinkBridge::default(),
            FormattedTextConfig::default(),
        );
        dom.append_child(dom.root(), bridge.node()).unwrap();
        Self {
            dom,
            styles: StyleMap::new(),
            bridge,
            log,
        }
    }

    fn with_text(text: &str) -> Self {
        let mut fixture = Self::new();
        let _ = fixture.insert_text(text);
        fixture
    }

    fn insert_text(&mut self, text: &str) -> NodeId {
        let id = self.dom.create_text(text);
        self.bridge.insert_child(&mut self.dom, id, None).unwrap();
        id
    }

    fn width(&mut self, directive: SizingDirective) -> f32 {
        let cx = LayoutContext::new(&self.dom, &self.styles);
        self.bridge.intrinsic_content_width(&cx, directive, 1000.0)
    }

    fn height(&mut self, width: f32) -> f32 {
        let cx = LayoutContext::new(&self.dom, &self.styles);
        self.bridge.content_height_for_width(&cx, width, 1000.0)
    }

    fn commit(&mut self, bounds: Rect) {
        let cx = LayoutContext::new(&self.dom, &self.styles);
        self.bridge.set_border_box_bounds(&cx, bounds, 800.0);
    }

    fn count(&self, call: &str) -> usize {
        self.log.borrow().iter().filter(|c| *c == call).count()
    }

    fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

#[test]
fn starts_dirty_and_regenerates_on_first_width_query() {
    let mut f = Fixture::with_text("hello");
    assert!(f.bridge.is_dirty());
    assert_eq!(f.bridge.fragment(), "");

    let _ = f.width(SizingDirective::Preferred);
    assert!(!f.bridge.is_dirty());
    assert!(f.bridge.fragment().contains("hello"));
    assert_eq!(f.bridge.live().markup(), f.bridge.fragment());
}

#[test]
fn repeated_width_queries_are_idempotent() {
    let mut f = Fixture::with_text("hello world");
    let first = f.width(SizingDirective::Preferred);
    let second = f.width(SizingDirective::Preferred);
    assert!((first - second).abs() < f32::EPSILON);
    assert_eq!(f.count("live set_markup"), 1);
    assert!(!f.bridge.is_dirty());
}

#[test]
fn inserted_text_widens_preferred_width() {
    let mut f = Fixture::new();
    let empty = f.width(SizingDirective::Preferred);
    let _ = f.insert_text("Hi");
    assert!(f.bridge.is_dirty());
    let with_text = f.width(SizingDirective::Preferred);
    assert!(with_text > empty, "{with_text} <= {empty}");
}

#[test]
fn insertion_respects_reference_child() {
    let mut f = Fixture::new();
    let second = f.insert_text("second");
    let first = f.dom.create_text("first ");
    f.bridge
        .insert_child(&mut f.dom, first, Some(second))
        .unwrap();
    let _ = f.width(SizingDirective::Minimum);
    assert!(f.bridge.fragment().contains("first second"));
}

#[test]
fn failed_insertion_leaves_content_clean() {
    let mut f = Fixture::with_text("x");
    let _ = f.width(SizingDirective::Preferred);
    let stray = f.dom.create_text("stray");
    let not_a_child = f.dom.create_text("elsewhere");
    let err = f
        .bridge
        .insert_child(&mut f.dom, stray, Some(not_a_child))
        .unwrap_err();
    assert!(matches!(err, DomError::NotAChild { .. }));
    assert!(!f.bridge.is_dirty());
}

#[test]
fn children_appended_directly_on_the_tree_are_picked_up() {
    let mut f = Fixture::new();
    let empty = f.width(SizingDirective::Preferred);

    let text = f.dom.create_text("Hi");
    f.dom.append_child(f.bridge.node(), text).unwrap();

    let with_text = f.width(SizingDirective::Preferred);
    assert!(with_text > empty, "{with_text} <= {empty}");
    assert!(f.bridge.fragment().contains("Hi"));
    assert_eq!(f.count("live set_markup"), 2);
}

#[test]
fn nested_changes_and_removals_regenerate() {
    let mut f = Fixture::new();
    let link = f.dom.create_element(ElementData::new("a"));
    f.bridge.insert_child(&mut f.dom, link, None).unwrap();
    let _ = f.width(SizingDirective::Preferred);

    f.dom.set_attribute(link, "href", "/next").unwrap();
    let _ = f.height(300.0);
    assert!(f.bridge.fragment().contains(r#"href="/next""#));

    f.dom.remove_child(f.bridge.node(), link).unwrap();
    let _ = f.width(SizingDirective::Minimum);
    assert!(!f.bridge.fragment().contains("href"));
    assert_eq!(f.count("live set_markup"), 3);
}

#[test]
fn unrelated_tree_changes_do_not_regenerate() {
    let mut f = Fixture::with_text("x");
    let _ = f.width(SizingDirective::Preferred);

    let elsewhere = f.dom.create_element(ElementData::new("span"));
    f.dom.append_child(f.dom.root(), elsewhere).unwrap();
    let _ = f.width(SizingDirective::Preferred);

    assert_eq!(f.count("live set_markup"), 1);
}

#[test]
fn attach_accepts_only_formatted_text_nodes() {
    let mut dom = DomTree::new();
    let log = Log::default();
    let element = dom.create_element(ElementData::new("span"));
    let node = dom.alloc(NodeType::FormattedText);

    let err = FormattedText::attach(
        &dom,
        element,
        RecordingSurface::live(&log),
        LinkBridge::default(),
        FormattedTextConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DomError::InvalidOperation {
            operation: "attach",
            kind: NodeKind::Element
        }
    );

    let missing = FormattedText::attach(
        &dom,
        NodeId(99),
        RecordingSurface::live(&log),
        LinkBridge::default(),
        FormattedTextConfig::default(),
    )
    .unwrap_err();
    assert_eq!(missing, DomError::UnknownNode(NodeId(99)));

    let bridge = FormattedText::attach(
        &dom,
        node,
        RecordingSurface::live(&log),
        LinkBridge::default(),
        FormattedTextConfig::default(),
    )
    .unwrap();
    assert_eq!(bridge.node(), node);
    assert!(bridge.set_attribute(&mut dom, "class", "x").is_err());
}

#[test]
fn minimum_never_exceeds_preferred() {
    let mut f = Fixture::with_text("a somewhat longer run of words to wrap");
    let min = f.width(SizingDirective::Minimum);
    let pref = f.width(SizingDirective::Preferred);
    assert!(min <= pref);
    assert!(min > 0.0);
}

#[test]
fn height_at_committed_width_uses_live_surface() {
    let mut f = Fixture::with_text("aaa bbb ccc");
    f.commit(Rect::new(0.0, 0.0, 200.0, 30.0));
    f.clear_log();

    let height = f.height(200.0);
    assert!((height - f.bridge.live().preferred_size().height).abs() < f32::EPSILON);
    assert!(!f.bridge.has_probe());
    assert_eq!(f.count("live spawn_probe"), 0);
}

#[test]
fn off_width_height_uses_probe_and_leaves_live_alone() {
    let mut f = Fixture::with_text("aaa bbb ccc");
    let committed = Rect::new(5.0, 7.0, 200.0, 30.0);
    f.commit(committed);
    let markup = f.bridge.live().markup().to_string();
    f.clear_log();

    // 16px approximate metrics: words are 28.8px, spaces 9.6px, lines
    // 19.2px. At 50px each word sits on its own line: 3 * 19.2 + 3px chrome
    // rounds to 61, minus the 3px correction.
    let height = f.height(50.0);
    assert!((height - 58.0).abs() < f32::EPSILON, "{height}");

    assert!(f.bridge.has_probe());
    assert_eq!(f.count("live set_bounds"), 0);
    assert_eq!(f.count("live set_markup"), 0);
    assert_eq!(f.bridge.live().bounds(), committed);
    assert_eq!(f.bridge.live().markup(), markup);

    let probe = f.bridge.probe().unwrap();
    assert_eq!(probe.markup(), markup);
    assert!((probe.bounds().width - 50.0).abs() < f32::EPSILON);
    assert!((probe.bounds().height - f32::from(i16::MAX)).abs() < f32::EPSILON);
}

#[test]
fn probe_is_spawned_once_and_refreshed_only_when_stale() {
    let mut f = Fixture::with_text("one two");
    let _ = f.height(10.0);
    let _ = f.height(20.0);
    let _ = f.height(30.0);
    assert_eq!(f.count("live spawn_probe"), 1);
    assert_eq!(f.count("probe set_markup"), 1);

    let _ = f.insert_text(" three");
    let _ = f.height(40.0);
    assert_eq!(f.count("live spawn_probe"), 1);
    assert_eq!(f.count("probe set_markup"), 2);
    assert!(f.bridge.probe().unwrap().markup().contains("three"));
}

#[test]
fn height_query_before_width_query_regenerates() {
    let mut f = Fixture::with_text("content");
    let height = f.height(300.0);
    assert!(height > 0.0);
    assert!(f.bridge.fragment().contains("content"));
    assert!(!f.bridge.is_dirty());
}

#[test]
fn empty_content_probes_to_zero_height() {
    let mut f = Fixture::new();
    let height = f.height(100.0);
    assert!(height.abs() < f32::EPSILON, "{height}");
}

#[test]
fn padding_correction_is_configurable() {
    let mut dom = DomTree::new();
    let log = Log::default();
    let config = FormattedTextConfig {
        text_padding_correction: 0.0,
        ..FormattedTextConfig::default()
    };
    let mut bridge = FormattedText::create(
        &mut dom,
        RecordingSurface::live(&log),
        LinkBridge::default(),
        config,
    );
    let text = dom.create_text("word");
    bridge.insert_child(&mut dom, text, None).unwrap();

    let styles = StyleMap::new();
    let cx = LayoutContext::new(&dom, &styles);
    // 19.2 + 3 rounds to 22, nothing subtracted.
    let height = bridge.content_height_for_width(&cx, 500.0, 500.0);
    assert!((height - 22.0).abs() < f32::EPSILON, "{height}");
}

#[test]
fn commit_syncs_content_and_records_containing_width() {
    let mut f = Fixture::with_text("late");
    let bounds = Rect::new(1.0, 2.0, 120.0, 40.0);
    f.commit(bounds);
    assert!(!f.bridge.is_dirty());
    assert!(f.bridge.live().markup().contains("late"));
    assert_eq!(f.bridge.border_box_bounds(), bounds);
    assert!((f.bridge.containing_box_width() - 800.0).abs() < f32::EPSILON);
}

#[test]
fn move_relative_translates_without_regenerating() {
    let mut f = Fixture::with_text("x");
    f.commit(Rect::new(10.0, 10.0, 50.0, 20.0));
    let _ = f.insert_text("y");
    f.clear_log();

    f.bridge.move_relative(5.0, -3.0);
    assert_eq!(f.bridge.border_box_bounds(), Rect::new(15.0, 7.0, 50.0, 20.0));
    assert!(f.bridge.is_dirty());
    assert_eq!(f.count("live set_markup"), 0);
}

#[test]
fn attribute_and_text_assignment_always_fail() {
    let mut f = Fixture::with_text("x");
    for (name, value) in [("class", "a"), ("href", ""), ("", "")] {
        let err = f
            .bridge
            .set_attribute(&mut f.dom, name, value)
            .unwrap_err();
        assert!(matches!(
            err,
            DomError::InvalidOperation {
                kind: NodeKind::FormattedText,
                ..
            }
        ));
    }
    for text in ["", "replacement"] {
        let err = f.bridge.set_text_content(&mut f.dom, text).unwrap_err();
        assert!(matches!(err, DomError::InvalidOperation { .. }));
    }
    assert_eq!(f.dom.children(f.bridge.node()).len(), 1);
}

#[test]
fn reports_formatted_text_content_type() {
    let f = Fixture::new();
    assert_eq!(f.bridge.content_type(), ContentType::FormattedText);
    assert!(!f.bridge.content_type().may_have_participant_children());
}

#[test]
fn full_layout_pass_shrinks_to_fit() {
    let mut f = Fixture::with_text("hello world");
    let cx = LayoutContext::new(&f.dom, &f.styles);
    let bounds = lay_out_participant(&mut f.bridge, &cx, 0.0, 0.0, 1000.0, 1000.0);
    // Unwrapped width: 11 chars at 9.6px.
    assert!((bounds.width - 105.6).abs() < 1e-3, "{bounds:?}");
    assert_eq!(f.bridge.border_box_bounds(), bounds);
    // A second query at the committed width no longer needs the probe.
    let probes = f.count("probe preferred_size");
    let _ = f.height(bounds.width);
    assert_eq!(f.count("probe preferred_size"), probes);
}

#[test]
fn factory_creates_bridge_only_for_text_component() {
    let mut dom = DomTree::new();
    let log = Log::default();
    let make = || RecordingSurface::live(&log);

    let bridge = create_component(
        &mut dom,
        ElementCategory::Component,
        TEXT_COMPONENT_NAME,
        make,
        LinkBridge::default(),
        FormattedTextConfig::default(),
    )
    .unwrap();
    assert_eq!(dom.get(bridge.node()).unwrap().node_type.kind(), NodeKind::FormattedText);

    for (category, name) in [
        (ElementCategory::Component, "select"),
        (ElementCategory::Component, "input"),
        (ElementCategory::Markup, TEXT_COMPONENT_NAME),
    ] {
        let created = create_component(
            &mut dom,
            category,
            name,
            || -> RecordingSurface { panic!("surface created for {name}") },
            LinkBridge::default(),
            FormattedTextConfig::default(),
        );
        assert!(created.is_none());
    }
}
