//! The formatted-text bridge.
//!
//! A [`FormattedText`] owns one formatted-text node of the tree and takes
//! part in the outer layout as a single [`LayoutParticipant`]. Its content is
//! the serialized fragment of its subtree, shaped by a [`RenderingSurface`]
//! it does not otherwise control.
//!
//! # Measurement
//!
//! The live surface only answers height queries accurately for the width it
//! currently displays. Heights at any other width are measured on a second,
//! off-screen probe surface, spawned on first need and kept for every later
//! query, so probing never disturbs what is on screen.
//!
//! # Invalidation
//!
//! Inserting a child marks the content dirty. So does any other change to the
//! subtree, detected at the next sizing query by comparing the tree's
//! [`DomTree::subtree_version`] with the one the fragment was built from.
//! Nothing is re-serialized until that query, which regenerates the fragment
//! and pushes it to the live surface.

use quill_css::{ContentType, LayoutContext, LayoutParticipant, Rect, SizingDirective};
use quill_dom::{DomError, DomTree, NodeId, NodeKind, NodeType};

use crate::config::FormattedTextConfig;
use crate::link::{LinkBridge, LinkOutcome};
use crate::serialize::serialize;
use crate::surface::RenderingSurface;

/// Layout participant for a formatted-text subtree.
#[derive(Debug)]
pub struct FormattedText<S: RenderingSurface> {
    node: NodeId,
    dirty: bool,
    fragment: String,
    /// Bumped every time the fragment is regenerated.
    generation: u64,
    /// Subtree version the fragment was generated from.
    source_version: Option<u64>,
    live: S,
    probe: Option<S>,
    /// Fragment generation last pushed to the probe.
    probe_generation: Option<u64>,
    /// Width last committed to the live surface.
    committed_width: Option<f32>,
    containing_box_width: f32,
    links: LinkBridge,
    config: FormattedTextConfig,
}

impl<S: RenderingSurface> FormattedText<S> {
    /// Create a new formatted-text node in `dom` and a bridge for it.
    ///
    /// The node is created detached; attach it with
    /// [`DomTree::append_child`] or [`DomTree::insert_before`].
    pub fn create(
        dom: &mut DomTree,
        live: S,
        links: LinkBridge,
        config: FormattedTextConfig,
    ) -> Self {
        let node = dom.alloc(NodeType::FormattedText);
        Self::bridge(node, live, links, config)
    }

    /// Bridge an existing formatted-text node.
    ///
    /// # Errors
    ///
    /// - [`DomError::UnknownNode`] if `node` is not in `dom`.
    /// - [`DomError::InvalidOperation`] if `node` is not a formatted-text
    ///   node.
    pub fn attach(
        dom: &DomTree,
        node: NodeId,
        live: S,
        links: LinkBridge,
        config: FormattedTextConfig,
    ) -> Result<Self, DomError> {
        let kind = dom
            .get(node)
            .ok_or(DomError::UnknownNode(node))?
            .node_type
            .kind();
        if kind != NodeKind::FormattedText {
            return Err(DomError::InvalidOperation {
                operation: "attach",
                kind,
            });
        }
        Ok(Self::bridge(node, live, links, config))
    }

    fn bridge(
        node: NodeId,
        live: S,
        links: LinkBridge,
        config: FormattedTextConfig,
    ) -> Self {
        Self {
            node,
            // Nothing has been serialized yet.
            dirty: true,
            fragment: String::new(),
            generation: 0,
            source_version: None,
            live,
            probe: None,
            probe_generation: None,
            committed_width: None,
            containing_box_width: 0.0,
            links,
            config,
        }
    }

    /// The bridged node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Insert `child` before `reference` (or at the end) and mark the
    /// content dirty.
    ///
    /// # Errors
    ///
    /// Whatever [`DomTree::insert_before`] rejects; the content stays clean
    /// in that case.
    pub fn insert_child(
        &mut self,
        dom: &mut DomTree,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        dom.insert_before(self.node, child, reference)?;
        self.dirty = true;
        Ok(())
    }

    /// Attribute assignment. Formatted-text content derives wholly from its
    /// children, so this always fails.
    ///
    /// # Errors
    ///
    /// Always [`DomError::InvalidOperation`].
    pub fn set_attribute(
        &self,
        dom: &mut DomTree,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        dom.set_attribute(self.node, name, value)
    }

    /// Direct text assignment. Always fails, like [`Self::set_attribute`].
    ///
    /// # Errors
    ///
    /// Always [`DomError::InvalidOperation`].
    pub fn set_text_content(&self, dom: &mut DomTree, text: &str) -> Result<(), DomError> {
        dom.set_text_content(self.node, text)
    }

    /// Whether a child was inserted through [`Self::insert_child`] since the
    /// fragment was last generated. Changes made directly on the tree are
    /// picked up at the next sizing query.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last generated fragment. Empty until the first sizing query.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The on-screen surface.
    #[must_use]
    pub const fn live(&self) -> &S {
        &self.live
    }

    /// Whether an off-width height query has spawned the probe surface.
    #[must_use]
    pub const fn has_probe(&self) -> bool {
        self.probe.is_some()
    }

    /// The probe surface, if spawned.
    #[must_use]
    pub const fn probe(&self) -> Option<&S> {
        self.probe.as_ref()
    }

    /// Containing-box width recorded at the last bounds commit.
    #[must_use]
    pub const fn containing_box_width(&self) -> f32 {
        self.containing_box_width
    }

    /// The link resolver this bridge forwards activations to.
    #[must_use]
    pub const fn links(&self) -> &LinkBridge {
        &self.links
    }

    /// Handle a click at live-surface-local `(x, y)`.
    ///
    /// Returns `None` if no link is under the point.
    #[must_use]
    pub fn click(&self, x: f32, y: f32) -> Option<LinkOutcome> {
        let href = self.live.link_at(x, y)?;
        Some(self.activate_link(&href))
    }

    /// Handle activation of a link with target `href`.
    #[must_use]
    pub fn activate_link(&self, href: &str) -> LinkOutcome {
        self.links.activate(href)
    }

    /// Regenerate the fragment and push it to the live surface if the
    /// subtree changed.
    fn refresh(&mut self, cx: &LayoutContext<'_>) {
        let version = cx.dom.subtree_version(self.node);
        if self.source_version != Some(version) {
            self.dirty = true;
        }
        if !self.dirty {
            return;
        }
        self.fragment = serialize(cx.dom, cx.styles, self.node);
        self.generation += 1;
        self.source_version = Some(version);
        self.live.set_markup(&self.fragment);
        self.dirty = false;
        tracing::debug!(
            node = self.node.0,
            generation = self.generation,
            len = self.fragment.len(),
            "regenerated formatted-text fragment"
        );
    }

    /// Height of the content at a width the live surface does not display.
    fn probe_height(&mut self, content_width: f32) -> f32 {
        let live = &self.live;
        let probe = self.probe.get_or_insert_with(|| live.spawn_probe());
        if self.probe_generation != Some(self.generation) {
            probe.set_markup(&self.fragment);
            self.probe_generation = Some(self.generation);
        }
        probe.set_size(content_width, self.config.probe_max_height);
        let measured = probe.preferred_size().height;
        let height = (measured.round() - self.config.text_padding_correction).max(0.0);
        tracing::trace!(
            node = self.node.0,
            content_width,
            measured,
            height,
            "probed formatted-text height"
        );
        height
    }
}

impl<S: RenderingSurface> LayoutParticipant for FormattedText<S> {
    fn content_type(&self) -> ContentType {
        ContentType::FormattedText
    }

    fn intrinsic_content_width(
        &mut self,
        cx: &LayoutContext<'_>,
        directive: SizingDirective,
        _parent_content_width: f32,
    ) -> f32 {
        self.refresh(cx);
        match directive {
            SizingDirective::Minimum => self.live.minimum_size().width,
            SizingDirective::Preferred => self.live.preferred_size().width,
        }
    }

    fn content_height_for_width(
        &mut self,
        cx: &LayoutContext<'_>,
        content_width: f32,
        _parent_content_width: f32,
    ) -> f32 {
        self.refresh(cx);
        #[allow(clippy::float_cmp)]
        let at_committed_width = self.committed_width == Some(content_width);
        if at_committed_width {
            self.live.preferred_size().height
        } else {
            self.probe_height(content_width)
        }
    }

    fn set_border_box_bounds(
        &mut self,
        cx: &LayoutContext<'_>,
        bounds: Rect,
        containing_box_width: f32,
    ) {
        self.refresh(cx);
        self.live.set_bounds(bounds);
        self.committed_width = Some(bounds.width);
        self.containing_box_width = containing_box_width;
    }

    fn move_relative(&mut self, dx: f32, dy: f32) {
        let bounds = self.live.bounds().translate(dx, dy);
        self.live.set_bounds(bounds);
    }

    fn border_box_bounds(&self) -> Rect {
        self.live.bounds()
    }
}
