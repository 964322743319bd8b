//! DOM tree implementation for the Quill text bridge.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to the node
//! contract the formatted-text bridge consumes: identity, attributes, ordered
//! children, text, and an element category.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! Node kinds differ in what they support. Rather than overriding mutators
//! that throw, every kind reports a [`NodeCapabilities`] set and the tree
//! rejects operations outside it with [`DomError::InvalidOperation`].

use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

/// Map of attribute names to values for an element, in insertion order.
pub type AttributesMap = IndexMap<String, String>;

/// Local name reported by formatted-text bridge nodes.
pub const FORMATTED_TEXT_LOCAL_NAME: &str = "text-container";

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Errors raised by tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node kind does not support the attempted operation.
    ///
    /// Formatted-text nodes derive their content from their children, so
    /// attribute and direct text assignment on them is a caller bug.
    #[error("{operation} is not supported on {kind} nodes")]
    InvalidOperation {
        /// The rejected operation, e.g. `"setAttribute"`.
        operation: &'static str,
        /// The node kind it was attempted on.
        kind: NodeKind,
    },
    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If child is non-null and its parent is not parent, then throw a
    /// "NotFoundError" DOMException."
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent the operation targeted.
        parent: NodeId,
        /// The node that was expected to be one of its children.
        child: NodeId,
    },
    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a "HierarchyRequestError" DOMException."
    #[error("inserting {node:?} into {parent:?} would create a cycle")]
    HierarchyRequest {
        /// The intended parent.
        parent: NodeId,
        /// The node being inserted.
        node: NodeId,
    },
    /// The id does not refer to a node in this tree.
    #[error("no node with id {0:?}")]
    UnknownNode(NodeId),
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,

    /// Bumped whenever this node or anything below it changes.
    version: u64,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            version: 0,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// Root of a formatted-text subtree whose rendering is delegated to an
    /// external rich-text surface.
    ///
    /// Its content is wholly derived from its children: it has no attributes
    /// and no text of its own.
    FormattedText,
}

/// Discriminant of [`NodeType`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A document node.
    Document,
    /// A plain element.
    Element,
    /// A text node.
    Text,
    /// A formatted-text bridge node.
    FormattedText,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Text => "text",
            Self::FormattedText => "formatted-text",
        })
    }
}

/// Which mutations a node kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct NodeCapabilities {
    /// `set_attribute` is allowed.
    pub attributes: bool,
    /// `set_text_content` is allowed.
    pub direct_text: bool,
    /// The node may have children.
    pub children: bool,
}

impl NodeType {
    /// The kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::FormattedText => NodeKind::FormattedText,
        }
    }

    /// The mutations this node kind supports.
    #[must_use]
    pub const fn capabilities(&self) -> NodeCapabilities {
        match self {
            Self::Document => NodeCapabilities {
                attributes: false,
                direct_text: false,
                children: true,
            },
            Self::Element(_) => NodeCapabilities {
                attributes: true,
                direct_text: true,
                children: true,
            },
            // [§ 4.10](https://dom.spec.whatwg.org/#interface-text)
            // Text nodes carry data, never children.
            Self::Text(_) => NodeCapabilities {
                attributes: false,
                direct_text: true,
                children: false,
            },
            Self::FormattedText => NodeCapabilities {
                attributes: false,
                direct_text: false,
                children: true,
            },
        }
    }
}

/// Distinguishes plain markup elements from elements backed by a native widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementCategory {
    /// Ordinary markup (`span`, `a`, `img`, ...), rendered by whoever renders
    /// its nearest component ancestor.
    #[default]
    Markup,
    /// A native-widget-backed element that takes part in layout itself.
    Component,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///    custom element definition, is value."
/// - "When an element is created, its local name is always given."
///
/// NOTE: We only store the local name, attributes, and category.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Markup or native component.
    pub category: ElementCategory,
}

impl ElementData {
    /// A markup element with no attributes.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
            category: ElementCategory::Markup,
        }
    }

    /// Builder-style attribute setter, used when constructing trees.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attrs.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// Allocate a detached markup element.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id))
    }

    /// Mutation counter of the subtree rooted at `id`.
    ///
    /// Every change to a child list, an attribute or text data bumps the
    /// counter of the changed node and of each of its ancestors, so a
    /// consumer that derives state from a subtree can tell whether it is
    /// stale. Unknown ids report 0.
    #[must_use]
    pub fn subtree_version(&self, id: NodeId) -> u64 {
        self.get(id).map_or(0, |n| n.version)
    }

    /// Bump the subtree version of `id` and its ancestors.
    fn touch(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|next| self.nodes.get_mut(next.0)) {
            node.version += 1;
            current = node.parent;
        }
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// # Errors
    ///
    /// See [`DomTree::insert_before`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// "To pre-insert a node into a parent before a child..."
    ///
    /// Inserts `new_child` into `parent`'s children before `reference`, or
    /// at the end if `reference` is `None`. A node already in the tree is
    /// detached from its previous parent first.
    ///
    /// # Errors
    ///
    /// - [`DomError::UnknownNode`] if any id is not in this tree.
    /// - [`DomError::InvalidOperation`] if `parent` cannot have children.
    /// - [`DomError::HierarchyRequest`] if `new_child` is `parent` or one of
    ///   its ancestors, or is the document.
    /// - [`DomError::NotAChild`] if `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        // [§ 4.2.3 Ensure pre-insertion validity]
        // STEP 1: "If parent is not a Document, DocumentFragment, or Element
        // node, then throw a HierarchyRequestError."
        let parent_node = self.node(parent)?;
        if !parent_node.node_type.capabilities().children {
            return Err(DomError::InvalidOperation {
                operation: "insertBefore",
                kind: parent_node.node_type.kind(),
            });
        }
        // STEP 2: "If node is a host-including inclusive ancestor of parent,
        // then throw a HierarchyRequestError."
        let _ = self.node(new_child)?;
        if new_child == parent
            || new_child == NodeId::ROOT
            || self.is_descendant_of(parent, new_child)
        {
            return Err(DomError::HierarchyRequest {
                parent,
                node: new_child,
            });
        }
        // STEP 3: "If child is non-null and its parent is not parent, then
        // throw a NotFoundError."
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }

        // [§ 4.2.3 Pre-insert] STEP 3: "If referenceChild is node, then set
        // referenceChild to node's next sibling."
        let reference = match reference {
            Some(r) if r == new_child => self.next_sibling(new_child),
            other => other,
        };

        // [§ 4.2.3 Insert] STEP 7.1: "Adopt node into parent's node document"
        // which removes it from its old parent.
        if let Some(old_parent) = self.parent(new_child) {
            self.remove_child(old_parent, new_child)?;
        }

        let index = match reference {
            Some(r) => self
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => self.children(parent).len(),
        };

        self.node_mut(parent)?.children.insert(index, new_child);
        self.node_mut(new_child)?.parent = Some(parent);
        self.relink_siblings(parent);
        self.touch(parent);
        Ok(())
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detaches `child` from `parent`, clearing its parent and sibling links.
    ///
    /// # Errors
    ///
    /// [`DomError::NotAChild`] if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let index = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(DomError::NotAChild { parent, child })?;
        let _ = self.node_mut(parent)?.children.remove(index);
        let node = self.node_mut(child)?;
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        self.relink_siblings(parent);
        self.touch(parent);
        Ok(())
    }

    /// Recompute sibling links for every child of `parent`.
    fn relink_siblings(&mut self, parent: NodeId) {
        let children = self.children(parent).to_vec();
        for (i, &child) in children.iter().enumerate() {
            let node = &mut self.nodes[child.0];
            node.prev_sibling = i.checked_sub(1).map(|p| children[p]);
            node.next_sibling = children.get(i + 1).copied();
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 4.9 localName](https://dom.spec.whatwg.org/#dom-element-localname)
    ///
    /// Elements report their tag name, formatted-text nodes report
    /// [`FORMATTED_TEXT_LOCAL_NAME`]; other nodes have no local name.
    #[must_use]
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data.tag_name.as_str()),
            NodeType::FormattedText => Some(FORMATTED_TEXT_LOCAL_NAME),
            NodeType::Document | NodeType::Text(_) => None,
        }
    }

    /// The element category, or `None` for non-element nodes.
    #[must_use]
    pub fn element_category(&self, id: NodeId) -> Option<ElementCategory> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data.category),
            NodeType::FormattedText => Some(ElementCategory::Component),
            NodeType::Document | NodeType::Text(_) => None,
        }
    }

    /// [§ 4.9 getAttribute](https://dom.spec.whatwg.org/#dom-element-getattribute)
    ///
    /// "Return the value of the attribute named qualifiedName, or null."
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    /// [§ 4.9 setAttribute](https://dom.spec.whatwg.org/#dom-element-setattribute)
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidOperation`] for every node kind without attribute
    /// support, including formatted-text nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let node = self.node_mut(id)?;
        let kind = node.node_type.kind();
        let NodeType::Element(data) = &mut node.node_type else {
            return Err(DomError::InvalidOperation {
                operation: "setAttribute",
                kind,
            });
        };
        let _ = data
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
        self.touch(id);
        Ok(())
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// For text nodes, their data. For elements, "the descendant text
    /// content", i.e. all descendant text concatenated in tree order.
    /// Documents and formatted-text nodes return `None`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        match &self.get(id)?.node_type {
            NodeType::Text(s) => Some(s.clone()),
            NodeType::Element(_) => {
                let mut text = String::new();
                self.collect_text(id, &mut text);
                Some(text)
            }
            NodeType::Document | NodeType::FormattedText => None,
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(s)) => out.push_str(s),
                Some(_) => self.collect_text(child, out),
                None => {}
            }
        }
    }

    /// [§ 4.4 textContent setter](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// For text nodes, replaces the data. For elements, "string replace all"
    /// with a single new text node.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidOperation`] for documents and formatted-text nodes.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        match self.node(id)?.node_type.kind() {
            NodeKind::Text => {
                if let NodeType::Text(data) = &mut self.node_mut(id)?.node_type {
                    text.clone_into(data);
                }
                self.touch(id);
                Ok(())
            }
            NodeKind::Element => {
                for child in self.children(id).to_vec() {
                    self.remove_child(id, child)?;
                }
                if !text.is_empty() {
                    let text_node = self.create_text(text);
                    self.append_child(id, text_node)?;
                }
                Ok(())
            }
            kind @ (NodeKind::Document | NodeKind::FormattedText) => {
                Err(DomError::InvalidOperation {
                    operation: "setTextContent",
                    kind,
                })
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
