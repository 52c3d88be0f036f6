//! Draws the rendered menu text into a ratatui frame.
//!
//! The menu core produces plain text; this module only places it. Each line is
//! clipped to the configured width and the block is framed by a border, so the
//! widget occupies `width + 2` by `height + 2` cells at the top-left of the
//! terminal (or less when the terminal is smaller).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Paragraph};
use tickmenu_menu::{Navigator, RenderOptions, render};
use tickmenu_util::clip_lines;

const TITLE: &str = " tickmenu ";

/// Area covered by the bordered menu inside `available`.
pub fn menu_area(available: Rect, options: &RenderOptions) -> Rect {
    Rect {
        x: available.x,
        y: available.y,
        width: options.width.saturating_add(2).min(available.width),
        height: options.height.saturating_add(2).min(available.height),
    }
}

/// Renders the navigator and draws the resulting text.
pub fn draw_menu(frame: &mut Frame, navigator: &Navigator, options: &RenderOptions) {
    let area = menu_area(frame.area(), options);
    let text = render::render(navigator, options);
    let lines: Vec<Line> = clip_lines(&text, usize::from(options.width))
        .into_iter()
        .map(Line::from)
        .collect();
    let paragraph = Paragraph::new(Text::from(lines)).block(Block::bordered().title(TITLE));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tickmenu_menu::TreeBuilder;

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn menu_area_fits_available_space() {
        let options = RenderOptions::new(20, 5);
        assert_eq!(menu_area(Rect::new(0, 0, 80, 24), &options), Rect::new(0, 0, 22, 7));
        assert_eq!(menu_area(Rect::new(0, 0, 10, 4), &options), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn draws_clipped_menu_inside_border() {
        let mut builder = TreeBuilder::new();
        let short = builder.leaf("Lamp");
        let long = builder.leaf("An exceptionally long label");
        let navigator = Navigator::new(builder.finish("Main", [short, long]).unwrap());
        let options = RenderOptions::new(12, 5);

        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| draw_menu(frame, &navigator, &options)).unwrap();

        assert!(row(&terminal, 1).starts_with("│Main"));
        assert!(row(&terminal, 3).starts_with("│> Lamp <"));
        assert!(row(&terminal, 4).starts_with("│An exceptio…│"));
    }
}
