//! Text rendering of navigator state: breadcrumb plus a bounded window of rows.
//!
//! Rendering is a pure read of the navigator. Labels are recomputed on every
//! call so computed labels always show current host state.

use std::fmt;
use std::ops::Range;

use tracing::trace;

use crate::navigator::Navigator;

/// Separator placed between breadcrumb labels.
pub const DEFAULT_SEPARATOR: &str = " » ";

/// Default text width in columns. Advisory only; labels are never wrapped.
pub const DEFAULT_WIDTH: u16 = 40;

/// Default text height in rows, including the header.
pub const DEFAULT_HEIGHT: u16 = 7;

/// Rows taken by the breadcrumb and the blank line below it.
pub const HEADER_ROWS: u16 = 2;

/// Size and decoration of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u16,
    pub height: u16,
    pub separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Number of child rows that fit below the header. Zero when the height
    /// leaves no room.
    pub fn capacity(&self) -> usize {
        usize::from(self.height.saturating_sub(HEADER_ROWS))
    }
}

/// One visible child row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub selected: bool,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.selected {
            write!(f, "> {} <", self.label)
        } else {
            f.write_str(&self.label)
        }
    }
}

/// Structured result of a render pass.
///
/// `Display` produces the plain text block: breadcrumb, a blank line, then one
/// newline-terminated line per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub breadcrumb: String,
    pub rows: Vec<Row>,
    /// Indices of the current level's children covered by `rows`.
    pub window: Range<usize>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", self.breadcrumb)?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Labels of the path from root to current level joined by `separator`.
pub fn breadcrumb(navigator: &Navigator, separator: &str) -> String {
    let tree = navigator.tree();
    navigator
        .path()
        .iter()
        .map(|id| tree.label(*id))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Picks the contiguous slice of `count` rows to show in `capacity` lines.
///
/// The selection is centered once it passes the middle of the window, the
/// window never runs past the end of the list, and it never covers more rows
/// than exist.
pub fn visible_window(count: usize, selected: Option<usize>, capacity: usize) -> Range<usize> {
    let mut length = count.min(capacity);
    let half = capacity / 2;
    let mut start = match selected {
        Some(index) if index > half => index - half,
        _ => 0,
    };
    if start + length > count {
        start = count.saturating_sub(capacity);
        length = capacity;
    }
    let length = length.min(count - start);
    start..start + length
}

/// Builds the structured frame for the navigator's current state.
pub fn frame(navigator: &Navigator, options: &RenderOptions) -> Frame {
    let tree = navigator.tree();
    let children = navigator.current_children();
    let selected = navigator.selected_index();
    let window = visible_window(children.len(), selected, options.capacity());
    let rows = children[window.clone()]
        .iter()
        .zip(window.clone())
        .map(|(id, index)| Row {
            label: tree.label(*id),
            selected: selected == Some(index),
        })
        .collect();
    trace!(
        depth = navigator.depth(),
        start = window.start,
        end = window.end,
        total = children.len(),
        "Rendered menu frame"
    );
    Frame {
        breadcrumb: breadcrumb(navigator, &options.separator),
        rows,
        window,
    }
}

/// Renders the navigator to a plain text block.
pub fn render(navigator: &Navigator, options: &RenderOptions) -> String {
    frame(navigator, options).to_string()
}
