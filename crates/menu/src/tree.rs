//! Flat arena holding every node of a menu, plus the builder that fills it.
//!
//! Nodes are registered bottom-up: a node's children must already exist when
//! the node itself is added. The arena keeps insertion order, which lets
//! [`TreeBuilder::build`] reject cycles by checking that every child sits
//! before its parent.

use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::MenuError;
use crate::node::{IdAllocator, LabelSource, MenuNode, NodeContext, NodeId, NodeSpec};

/// Collects nodes and issues their identifiers.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    ids: IdAllocator,
    nodes: IndexMap<NodeId, MenuNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues numbering from an existing allocator, so identifiers stay
    /// unique across several trees built by the same host.
    pub fn with_allocator(ids: IdAllocator) -> Self {
        Self {
            ids,
            nodes: IndexMap::new(),
        }
    }

    /// Registers a node and returns its freshly issued identifier.
    pub fn add(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.ids.allocate();
        self.nodes.insert(id, MenuNode::new(id, spec));
        id
    }

    /// Registers a childless node with static text.
    pub fn leaf(&mut self, text: impl Into<String>) -> NodeId {
        self.add(NodeSpec::new(text))
    }

    /// Registers a node with static text and the given children.
    pub fn branch(&mut self, text: impl Into<String>, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.add(NodeSpec::new(text).children(children))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validates the arena and freezes it into a tree rooted at `root`.
    ///
    /// # Errors
    /// - [`MenuError::UnknownNode`] when `root` was not issued by this builder.
    /// - [`MenuError::UnknownChild`] when a node lists a child from elsewhere.
    /// - [`MenuError::ForwardReference`] when a child was registered after its
    ///   parent.
    pub fn build(self, root: NodeId) -> Result<MenuTree, MenuError> {
        if !self.nodes.contains_key(&root) {
            return Err(MenuError::UnknownNode { id: root });
        }
        for (position, (parent, node)) in self.nodes.iter().enumerate() {
            for child in node.children() {
                match self.nodes.get_index_of(child) {
                    None => {
                        return Err(MenuError::UnknownChild {
                            parent: *parent,
                            child: *child,
                        });
                    }
                    Some(index) if index >= position => {
                        return Err(MenuError::ForwardReference {
                            parent: *parent,
                            child: *child,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        debug!(root = %root, nodes = self.nodes.len(), "Built menu tree");
        Ok(MenuTree {
            nodes: self.nodes,
            root,
        })
    }

    /// Adds a root node with static `text` over `children` and builds the tree.
    pub fn finish(mut self, text: impl Into<String>, children: impl IntoIterator<Item = NodeId>) -> Result<MenuTree, MenuError> {
        let root = self.branch(text, children);
        self.build(root)
    }

    /// Hands the allocator back once the builder is no longer needed.
    pub fn into_allocator(self) -> IdAllocator {
        self.ids
    }
}

/// Immutable-shape menu tree. Only labels may change after building.
#[derive(Debug)]
pub struct MenuTree {
    nodes: IndexMap<NodeId, MenuNode>,
    root: NodeId,
}

impl MenuTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(&id)
    }

    /// Returns the node for an identifier that is known to belong to this tree.
    ///
    /// # Panics
    /// Panics if `id` is not part of the tree.
    pub fn node(&self, id: NodeId) -> &MenuNode {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("menu node {id} is not part of this tree"))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Current display label of a node.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id).label()
    }

    /// Replaces the static text of a node.
    ///
    /// Nodes with a computed label keep it; the new text is what their
    /// callback sees through [`NodeContext::text`].
    pub fn set_label(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), MenuError> {
        self.node_mut(id)?.set_text(text.into());
        Ok(())
    }

    /// Installs a computed label on a node.
    pub fn set_label_fn(&mut self, id: NodeId, label: impl Fn(&NodeContext<'_>) -> String + 'static) -> Result<(), MenuError> {
        self.node_mut(id)?.set_label_source(LabelSource::computed(label));
        Ok(())
    }

    /// Compares two nodes by their current labels.
    ///
    /// This is an ordering helper for hosts; node equality stays id-based and
    /// children are always displayed in insertion order.
    pub fn cmp_labels(&self, left: NodeId, right: NodeId) -> Ordering {
        self.label(left).cmp(&self.label(right))
    }

    pub(crate) fn activate(&mut self, id: NodeId) -> bool {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("menu node {id} is not part of this tree"))
            .activate()
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MenuNode, MenuError> {
        self.nodes.get_mut(&id).ok_or(MenuError::UnknownNode { id })
    }
}
