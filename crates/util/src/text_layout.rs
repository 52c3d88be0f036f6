//! Display-column aware clipping for fixed-width text sinks.
//!
//! Menu labels are emitted as-is by the renderer; sinks with a hard column
//! limit clip each line here. Widths are measured in terminal cells, so wide
//! glyphs count as two columns and are never split.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to lines that were cut short.
pub const CLIP_MARKER: char = '…';

/// Clips `line` to at most `max_width` display columns.
///
/// Lines that fit are returned unchanged. Longer lines are cut and end with
/// [`CLIP_MARKER`], which itself takes one column.
pub fn clip_to_width(line: &str, max_width: usize) -> String {
    if line.width() <= max_width {
        return line.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut clipped = String::with_capacity(line.len());
    for character in line.chars() {
        let width = character.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        clipped.push(character);
    }
    clipped.push(CLIP_MARKER);
    clipped
}

/// Clips every line of a text block, keeping the line structure.
pub fn clip_lines(text: &str, max_width: usize) -> Vec<String> {
    text.lines().map(|line| clip_to_width(line, max_width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(clip_to_width("Power", 10), "Power");
        assert_eq!(clip_to_width("Power", 5), "Power");
    }

    #[test]
    fn long_lines_end_with_marker() {
        assert_eq!(clip_to_width("> Thrusters <", 8), "> Thrus…");
        assert_eq!(clip_to_width("abc", 1), "…");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn wide_glyphs_are_not_split() {
        let clipped = clip_to_width("日本語テキスト", 6);
        assert_eq!(clipped, "日本…");
        assert!(clipped.width() <= 6);
    }

    #[test]
    fn clip_lines_keeps_blank_lines() {
        let lines = clip_lines("Main » Settings\n\n> Brightness <\n", 10);
        assert_eq!(lines, vec!["Main » Se…".to_string(), String::new(), "> Brightn…".to_string()]);
    }
}
