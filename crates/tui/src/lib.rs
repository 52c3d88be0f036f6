//! # tickmenu terminal host
//!
//! Drives a [`tickmenu_menu::Navigator`] from a real terminal: crossterm
//! supplies key events, ratatui acts as the display sink, and a tokio ticker
//! paces the loop so at most one menu operation runs per tick.
//!
//! ## Modules
//!
//! - [`input`]: terminal event to menu input mapping.
//! - [`view`]: draws the rendered menu text into a frame.
//! - `runtime`: terminal lifecycle and the tick loop, exposed through [`run`].

pub mod input;
mod runtime;
pub mod view;

pub use runtime::{RuntimeOptions, run};
