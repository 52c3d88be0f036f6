//! Stack-based navigation state machine.
//!
//! The navigator owns the tree, a non-empty path from the root to the level
//! currently on display, and the selection inside that level. The four input
//! operations never fail: moving past a boundary, activating without a
//! selection and backing out of the root are silent no-ops.

use tracing::debug;

use crate::node::NodeId;
use crate::tree::MenuTree;

/// Discrete inputs understood by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuInput {
    Up,
    Down,
    Activate,
    Back,
}

/// Outcome of a single navigator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection moved within the current level.
    Moved { from: usize, to: usize },
    /// The selected node was pushed and became the current level.
    Descended { into: NodeId },
    /// The selected node was activated but the level did not change.
    Stayed { node: NodeId },
    /// The current level was popped.
    Ascended { from: NodeId },
    /// Nothing happened (boundary, empty level or root).
    Ignored,
}

impl Transition {
    /// Whether the state visible to the renderer may have changed.
    ///
    /// `Stayed` counts as a change because activation callbacks can mutate
    /// host state that computed labels read.
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Cursor over a [`MenuTree`].
#[derive(Debug)]
pub struct Navigator {
    tree: MenuTree,
    path: Vec<NodeId>,
    selected: Option<usize>,
}

impl Navigator {
    /// Starts at the tree root with its first child selected, if any.
    pub fn new(tree: MenuTree) -> Self {
        let root = tree.root();
        let selected = first_index(tree.children(root));
        Self {
            tree,
            path: vec![root],
            selected,
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// Mutable access for label edits. The tree shape cannot change through it.
    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Nodes from the root (first) to the current level (last). Never empty.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Node whose children are on display.
    pub fn current(&self) -> NodeId {
        *self.path.last().expect("navigator path is never empty")
    }

    pub fn current_children(&self) -> &[NodeId] {
        self.tree.children(self.current())
    }

    /// Index of the selection within [`Navigator::current_children`].
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected.map(|index| self.child_at(index))
    }

    /// Moves the selection one row up. Does not wrap.
    pub fn move_up(&mut self) -> Transition {
        match self.selected {
            Some(from) if from > 0 => self.select(from, from - 1),
            _ => Transition::Ignored,
        }
    }

    /// Moves the selection one row down. Does not wrap.
    pub fn move_down(&mut self) -> Transition {
        let count = self.current_children().len();
        match self.selected {
            Some(from) if from + 1 < count => self.select(from, from + 1),
            _ => Transition::Ignored,
        }
    }

    /// Activates the selected node and descends into it when its activation
    /// allows and it has children.
    pub fn activate(&mut self) -> Transition {
        let Some(index) = self.selected else {
            return Transition::Ignored;
        };
        let node = self.child_at(index);
        let descend = self.tree.activate(node);
        if !descend || self.tree.children(node).is_empty() {
            debug!(node = %node, descend, "Activated menu node without descending");
            return Transition::Stayed { node };
        }

        self.path.push(node);
        self.selected = Some(0);
        debug!(node = %node, depth = self.path.len(), "Descended into menu node");
        Transition::Descended { into: node }
    }

    /// Pops one level and selects the first child of the new current level.
    pub fn back(&mut self) -> Transition {
        if self.path.len() <= 1 {
            return Transition::Ignored;
        }
        let from = self.path.pop().expect("navigator path holds more than the root");
        self.selected = first_index(self.current_children());
        debug!(from = %from, depth = self.path.len(), "Returned to parent menu level");
        Transition::Ascended { from }
    }

    /// Dispatches a single input.
    pub fn apply(&mut self, input: MenuInput) -> Transition {
        match input {
            MenuInput::Up => self.move_up(),
            MenuInput::Down => self.move_down(),
            MenuInput::Activate => self.activate(),
            MenuInput::Back => self.back(),
        }
    }

    fn select(&mut self, from: usize, to: usize) -> Transition {
        self.selected = Some(to);
        debug!(from, to, level = %self.current(), "Moved menu selection");
        Transition::Moved { from, to }
    }

    fn child_at(&self, index: usize) -> NodeId {
        let children = self.current_children();
        *children.get(index).unwrap_or_else(|| {
            panic!(
                "selection {index} is outside the {} children of menu node {}",
                children.len(),
                self.current()
            )
        })
    }
}

fn first_index(children: &[NodeId]) -> Option<usize> {
    if children.is_empty() { None } else { Some(0) }
}
