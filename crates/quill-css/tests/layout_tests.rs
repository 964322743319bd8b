//! Integration tests for the layout participant contract and its driver.

use quill_css::{
    ApproximateFontMetrics, ContentType, FontMetrics, LayoutContext, LayoutParticipant, Rect,
    SizingDirective, StyleMap, lay_out_participant, shrink_to_fit_width,
};
use quill_dom::DomTree;

/// A participant with fixed intrinsic sizes that records the calls it gets.
#[derive(Default)]
struct FixedBox {
    calls: Vec<String>,
    bounds: Rect,
    containing_box_width: f32,
}

impl LayoutParticipant for FixedBox {
    fn content_type(&self) -> ContentType {
        ContentType::Container
    }

    fn intrinsic_content_width(
        &mut self,
        _cx: &LayoutContext<'_>,
        directive: SizingDirective,
        _parent_content_width: f32,
    ) -> f32 {
        self.calls.push(format!("width {directive:?}"));
        match directive {
            SizingDirective::Minimum => 40.0,
            SizingDirective::Preferred => 200.0,
        }
    }

    fn content_height_for_width(
        &mut self,
        _cx: &LayoutContext<'_>,
        content_width: f32,
        _parent_content_width: f32,
    ) -> f32 {
        self.calls.push(format!("height {content_width}"));
        4000.0 / content_width
    }

    fn set_border_box_bounds(
        &mut self,
        _cx: &LayoutContext<'_>,
        bounds: Rect,
        containing_box_width: f32,
    ) {
        self.calls.push("commit".to_string());
        self.bounds = bounds;
        self.containing_box_width = containing_box_width;
    }

    fn move_relative(&mut self, dx: f32, dy: f32) {
        self.bounds = self.bounds.translate(dx, dy);
    }

    fn border_box_bounds(&self) -> Rect {
        self.bounds
    }
}

#[test]
fn test_shrink_to_fit_clamps_between_min_and_preferred() {
    assert!((shrink_to_fit_width(40.0, 200.0, 100.0) - 100.0).abs() < f32::EPSILON);
    assert!((shrink_to_fit_width(40.0, 200.0, 500.0) - 200.0).abs() < f32::EPSILON);
    assert!((shrink_to_fit_width(40.0, 200.0, 10.0) - 40.0).abs() < f32::EPSILON);
}

#[test]
fn test_driver_queries_in_fixed_order() {
    let dom = DomTree::new();
    let styles = StyleMap::new();
    let cx = LayoutContext::new(&dom, &styles);
    let mut participant = FixedBox::default();

    let bounds = lay_out_participant(&mut participant, &cx, 5.0, 7.0, 100.0, 300.0);

    assert_eq!(
        participant.calls,
        ["width Minimum", "width Preferred", "height 100", "commit"]
    );
    assert_eq!(bounds, Rect::new(5.0, 7.0, 100.0, 40.0));
    assert_eq!(participant.border_box_bounds(), bounds);
    assert!((participant.containing_box_width - 300.0).abs() < f32::EPSILON);
}

#[test]
fn test_move_relative_keeps_size() {
    let mut participant = FixedBox {
        bounds: Rect::new(1.0, 2.0, 30.0, 40.0),
        ..FixedBox::default()
    };

    participant.move_relative(10.0, -2.0);

    assert_eq!(participant.border_box_bounds(), Rect::new(11.0, 0.0, 30.0, 40.0));
}

#[test]
fn test_only_containers_have_participant_children() {
    assert!(ContentType::Container.may_have_participant_children());
    assert!(!ContentType::FormattedText.may_have_participant_children());
    assert!(!ContentType::FormControl.may_have_participant_children());
}

#[test]
fn test_rect_contains_excludes_far_edges() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(rect.contains(0.0, 0.0));
    assert!(rect.contains(9.9, 9.9));
    assert!(!rect.contains(10.0, 5.0));
}

#[test]
fn test_approximate_metrics() {
    let metrics = ApproximateFontMetrics;
    assert!((metrics.text_width("abcde", 10.0, false) - 30.0).abs() < 1e-4);
    assert!(metrics.text_width("abcde", 10.0, true) > metrics.text_width("abcde", 10.0, false));
    assert!((metrics.line_height(10.0) - 12.0).abs() < 1e-4);
}
