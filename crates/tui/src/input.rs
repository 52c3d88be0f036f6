//! Maps terminal events onto menu inputs.
//!
//! Arrow keys, vim-style letters and the usual confirm/cancel keys drive the
//! four menu operations. Key releases and repeats reported by terminals with
//! enhanced keyboard support are ignored so a single press moves once.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tickmenu_menu::MenuInput;

/// What the host loop should do with a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Queue a menu operation.
    Menu(MenuInput),
    /// Leave the host loop.
    Quit,
    /// Redraw without touching menu state (for example after a resize).
    Redraw,
    Ignore,
}

pub fn map_event(event: &Event) -> HostAction {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => HostAction::Redraw,
        _ => HostAction::Ignore,
    }
}

pub fn map_key(key: &KeyEvent) -> HostAction {
    if key.kind != KeyEventKind::Press {
        return HostAction::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => HostAction::Quit,
            _ => HostAction::Ignore,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => HostAction::Menu(MenuInput::Up),
        KeyCode::Down | KeyCode::Char('j') => HostAction::Menu(MenuInput::Down),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => HostAction::Menu(MenuInput::Activate),
        KeyCode::Esc | KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => HostAction::Menu(MenuInput::Back),
        KeyCode::Char('q') => HostAction::Quit,
        _ => HostAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_letters_map_to_menu_inputs() {
        assert_eq!(map_event(&press(KeyCode::Up)), HostAction::Menu(MenuInput::Up));
        assert_eq!(map_event(&press(KeyCode::Char('j'))), HostAction::Menu(MenuInput::Down));
        assert_eq!(map_event(&press(KeyCode::Enter)), HostAction::Menu(MenuInput::Activate));
        assert_eq!(map_event(&press(KeyCode::Esc)), HostAction::Menu(MenuInput::Back));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_event(&press(KeyCode::Char('q'))), HostAction::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c), HostAction::Quit);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent::new_with_kind_and_state(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Release, KeyEventState::NONE);
        assert_eq!(map_key(&release), HostAction::Ignore);
    }

    #[test]
    fn resize_requests_redraw() {
        assert_eq!(map_event(&Event::Resize(80, 24)), HostAction::Redraw);
    }
}
