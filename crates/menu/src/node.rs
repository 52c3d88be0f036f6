//! Menu nodes and the strategies that drive their labels and activation.
//!
//! A [`MenuNode`] is identified solely by its [`NodeId`]. Labels and
//! activation decisions are modeled as tagged strategies so a node can be
//! static, computed from host state, or wired to a side-effecting action
//! without any trait objects leaking into the navigator.

use std::fmt;

use tracing::warn;

/// Opaque identifier of a node inside a menu tree.
///
/// Identifiers are handed out by an [`IdAllocator`] and never reused, so two
/// nodes compare equal only when they come from the same construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Raw numeric value of the identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`NodeId`]s.
///
/// Not `Clone`: every identifier is issued at most once.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next identifier. The first identifier is `#1`.
    pub fn allocate(&mut self) -> NodeId {
        self.last = self.last.checked_add(1).expect("menu node id space exhausted");
        NodeId(self.last)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.last
    }
}

/// Read-only view of a node handed to label and activation callbacks.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    id: NodeId,
    text: &'a str,
    children: &'a [NodeId],
}

impl<'a> NodeContext<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Static text of the node, regardless of its label strategy.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn children(&self) -> &'a [NodeId] {
        self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

type LabelFn = Box<dyn Fn(&NodeContext<'_>) -> String>;
type DecideFn = Box<dyn FnMut(&NodeContext<'_>) -> bool>;

/// How a node produces its display label.
#[derive(Default)]
pub enum LabelSource {
    /// The node's static text is the label.
    #[default]
    Static,
    /// The label is recomputed on every call, typically from host state.
    Computed(LabelFn),
}

impl LabelSource {
    pub fn computed(label: impl Fn(&NodeContext<'_>) -> String + 'static) -> Self {
        Self::Computed(Box::new(label))
    }
}

impl fmt::Debug for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("Static"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// What happens when the selected node is activated.
///
/// The returned decision only matters for nodes with children: `true` lets the
/// navigator descend, `false` keeps it on the current level.
#[derive(Default)]
pub enum Activation {
    /// Always allow descending.
    #[default]
    Descend,
    /// Never descend.
    Stay,
    /// Ask a callback, which may also perform host side effects.
    Decide(DecideFn),
}

impl Activation {
    pub fn decide(decide: impl FnMut(&NodeContext<'_>) -> bool + 'static) -> Self {
        Self::Decide(Box::new(decide))
    }

    /// One-shot action: runs `effect` and stays on the current level.
    pub fn action(mut effect: impl FnMut(&NodeContext<'_>) + 'static) -> Self {
        Self::decide(move |context| {
            effect(context);
            false
        })
    }

    /// Like [`Activation::action`], for effects that can fail.
    ///
    /// Failures are logged and never propagate into the navigator.
    pub fn fallible(mut effect: impl FnMut(&NodeContext<'_>) -> anyhow::Result<()> + 'static) -> Self {
        Self::decide(move |context| {
            if let Err(error) = effect(context) {
                warn!(
                    node = %context.id(),
                    text = context.text(),
                    error = %error,
                    "Menu action failed; staying on current level"
                );
            }
            false
        })
    }

    fn run(&mut self, context: &NodeContext<'_>) -> bool {
        match self {
            Self::Descend => true,
            Self::Stay => false,
            Self::Decide(decide) => decide(context),
        }
    }
}

impl fmt::Debug for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descend => f.write_str("Descend"),
            Self::Stay => f.write_str("Stay"),
            Self::Decide(_) => f.write_str("Decide(..)"),
        }
    }
}

/// Everything needed to register a node with a
/// [`TreeBuilder`](crate::TreeBuilder), minus its identifier.
#[derive(Debug, Default)]
pub struct NodeSpec {
    text: String,
    label: LabelSource,
    children: Vec<NodeId>,
    activation: Activation,
}

impl NodeSpec {
    /// A node labelled with static `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A node whose label is computed on every render.
    pub fn computed(label: impl Fn(&NodeContext<'_>) -> String + 'static) -> Self {
        Self::default().label_fn(label)
    }

    pub fn label_fn(mut self, label: impl Fn(&NodeContext<'_>) -> String + 'static) -> Self {
        self.label = LabelSource::computed(label);
        self
    }

    /// Appends children in display order.
    pub fn children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn child(mut self, child: NodeId) -> Self {
        self.children.push(child);
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn on_activate(self, decide: impl FnMut(&NodeContext<'_>) -> bool + 'static) -> Self {
        self.activation(Activation::decide(decide))
    }

    pub fn on_action(self, effect: impl FnMut(&NodeContext<'_>) + 'static) -> Self {
        self.activation(Activation::action(effect))
    }
}

/// A single element of a menu tree.
///
/// Equality is identity: two nodes are equal iff their ids match.
#[derive(Debug)]
pub struct MenuNode {
    id: NodeId,
    text: String,
    label: LabelSource,
    children: Vec<NodeId>,
    activation: Activation,
}

impl MenuNode {
    pub(crate) fn new(id: NodeId, spec: NodeSpec) -> Self {
        let NodeSpec {
            text,
            label,
            children,
            activation,
        } = spec;
        Self {
            id,
            text,
            label,
            children,
            activation,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The static text, ignoring any computed label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Current display label.
    ///
    /// Computed labels are evaluated on every call and may legitimately change
    /// between calls when they read host state.
    pub fn label(&self) -> String {
        match &self.label {
            LabelSource::Static => self.text.clone(),
            LabelSource::Computed(label) => label(&self.context()),
        }
    }

    /// Runs the activation strategy and returns whether descending is allowed.
    pub fn activate(&mut self) -> bool {
        let Self {
            id,
            text,
            children,
            activation,
            ..
        } = self;
        let context = NodeContext {
            id: *id,
            text: text.as_str(),
            children: children.as_slice(),
        };
        activation.run(&context)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_label_source(&mut self, label: LabelSource) {
        self.label = label;
    }

    fn context(&self) -> NodeContext<'_> {
        NodeContext {
            id: self.id,
            text: &self.text,
            children: &self.children,
        }
    }
}

impl PartialEq for MenuNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MenuNode {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let first = ids.allocate();
        let second = ids.allocate();
        assert_eq!(first.get(), 1);
        assert!(second > first);
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn identical_labels_are_not_equal_nodes() {
        let mut ids = IdAllocator::new();
        let left = MenuNode::new(ids.allocate(), NodeSpec::new("Power"));
        let right = MenuNode::new(ids.allocate(), NodeSpec::new("Power"));
        assert_ne!(left, right);
        assert_eq!(left, left);
    }

    #[test]
    fn computed_label_tracks_host_state() {
        let level = Rc::new(Cell::new(10));
        let reader = Rc::clone(&level);
        let mut ids = IdAllocator::new();
        let node = MenuNode::new(
            ids.allocate(),
            NodeSpec::new("Battery").label_fn(move |context| format!("{}: {}%", context.text(), reader.get())),
        );

        assert_eq!(node.label(), "Battery: 10%");
        level.set(85);
        assert_eq!(node.label(), "Battery: 85%");
    }

    #[test]
    fn default_activation_descends() {
        let mut ids = IdAllocator::new();
        let mut node = MenuNode::new(ids.allocate(), NodeSpec::new("Main"));
        assert!(node.activate());
    }

    #[test]
    fn action_runs_effect_and_stays() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut ids = IdAllocator::new();
        let mut node = MenuNode::new(
            ids.allocate(),
            NodeSpec::new("Ping").on_action(move |_| counter.set(counter.get() + 1)),
        );

        assert!(!node.activate());
        assert!(!node.activate());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn fallible_action_swallows_errors() {
        let mut ids = IdAllocator::new();
        let mut node = MenuNode::new(
            ids.allocate(),
            NodeSpec::new("Send").activation(Activation::fallible(|_| anyhow::bail!("antenna offline"))),
        );
        assert!(!node.activate());
    }

    #[test]
    fn decide_sees_node_context() {
        let mut ids = IdAllocator::new();
        let child = ids.allocate();
        let mut node = MenuNode::new(
            ids.allocate(),
            NodeSpec::new("Doors")
                .child(child)
                .on_activate(|context| context.has_children() && context.text() == "Doors"),
        );
        assert!(node.activate());
    }
}
