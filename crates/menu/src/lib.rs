//! # tickmenu menu core
//!
//! A navigable, hierarchical text menu for small fixed-size displays driven by
//! four inputs: up, down, activate and back.
//!
//! ## Architecture
//!
//! - [`node`]: identity-bearing nodes with static or computed labels and an
//!   activation strategy.
//! - [`tree`]: flat arena of nodes plus the builder that issues identifiers.
//! - [`navigator`]: the path stack and selection state machine.
//! - [`render`]: breadcrumb and windowed row listing over navigator state.
//!
//! The widget is single-threaded and cooperative: a host loop applies at most
//! one [`MenuInput`] per tick and renders afterwards.
//!
//! ```ignore
//! use tickmenu_menu::{Navigator, RenderOptions, TreeBuilder, render};
//!
//! let mut builder = TreeBuilder::new();
//! let a = builder.leaf("A");
//! let tree = builder.finish("Main", [a])?;
//! let navigator = Navigator::new(tree);
//! print!("{}", render::render(&navigator, &RenderOptions::default()));
//! ```

pub mod error;
pub mod navigator;
pub mod node;
pub mod render;
pub mod tree;

pub use error::MenuError;
pub use navigator::{MenuInput, Navigator, Transition};
pub use node::{Activation, IdAllocator, LabelSource, MenuNode, NodeContext, NodeId, NodeSpec};
pub use render::{Frame, RenderOptions, Row};
pub use tree::{MenuTree, TreeBuilder};
