//! Host-side helpers shared by the tickmenu binary and terminal runtime.
//!
//! - [`settings`]: JSON-backed display settings (size, separator, tick rate).
//! - [`text_layout`]: display-column aware clipping for the terminal sink.

pub mod settings;
pub mod text_layout;

pub use settings::{DisplaySettings, SettingsError, SettingsStore, expand_tilde};
pub use text_layout::{clip_lines, clip_to_width};
