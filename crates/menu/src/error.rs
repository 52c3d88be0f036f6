//! Error types for menu tree construction.

use thiserror::Error;

use crate::NodeId;

/// Errors raised while assembling or editing a [`MenuTree`](crate::MenuTree).
///
/// Navigation itself never returns errors: boundary conditions are defined
/// no-ops and broken invariants panic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Unknown menu node: {id}")]
    UnknownNode { id: NodeId },

    #[error("Node {parent} lists unknown child {child}")]
    UnknownChild { parent: NodeId, child: NodeId },

    #[error("Node {parent} lists child {child} that was registered after it")]
    ForwardReference { parent: NodeId, child: NodeId },
}
