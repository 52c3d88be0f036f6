//! Runtime: terminal lifecycle and the fixed-rate tick loop.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Collect key events as they arrive into a bounded queue.
//! - On every tick apply at most one queued menu input, then redraw once.
//!
//! Every tick redraws, so computed labels stay current while the user is idle.
use std::collections::VecDeque;
use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tickmenu_menu::{MenuInput, Navigator, RenderOptions};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::input::{HostAction, map_event};
use crate::view::draw_menu;

type MenuTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Host loop configuration.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub render: RenderOptions,
    /// Interval between ticks.
    pub tick: Duration,
    /// Maximum number of inputs waiting for a tick. Extra key presses are
    /// dropped.
    pub queue_limit: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            tick: Duration::from_millis(50),
            queue_limit: 16,
        }
    }
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<MenuTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut MenuTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn redraw(terminal: &mut MenuTerminal, navigator: &Navigator, options: &RenderOptions) -> Result<()> {
    terminal.draw(|frame| draw_menu(frame, navigator, options))?;
    Ok(())
}

/// Queues `input` unless the queue is full. Returns whether it was queued.
fn enqueue(pending: &mut VecDeque<MenuInput>, input: MenuInput, limit: usize) -> bool {
    if pending.len() >= limit {
        debug!(?input, limit, "Menu input queue full; dropping input");
        return false;
    }
    pending.push_back(input);
    true
}

/// Runs the interactive menu until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run(navigator: &mut Navigator, options: RuntimeOptions) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, navigator, &options).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(terminal: &mut MenuTerminal, navigator: &mut Navigator, options: &RuntimeOptions) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = time::interval(options.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut pending: VecDeque<MenuInput> = VecDeque::with_capacity(options.queue_limit);

    redraw(terminal, navigator, &options.render)?;
    info!(tick_ms = options.tick.as_millis() as u64, "Menu host loop started");

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    debug!("Terminal event stream closed");
                    break;
                };
                let event = event.context("failed to read terminal event")?;
                match map_event(&event) {
                    HostAction::Menu(input) => {
                        enqueue(&mut pending, input, options.queue_limit);
                    }
                    HostAction::Quit => break,
                    HostAction::Redraw => redraw(terminal, navigator, &options.render)?,
                    HostAction::Ignore => {}
                }
            }

            _ = ticker.tick() => {
                if let Some(input) = pending.pop_front() {
                    let transition = navigator.apply(input);
                    debug!(?input, ?transition, "Applied menu input");
                }
                redraw(terminal, navigator, &options.render)?;
            }
        }
    }

    info!("Menu host loop stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drops_inputs_beyond_limit() {
        let mut pending = VecDeque::new();
        assert!(enqueue(&mut pending, MenuInput::Down, 2));
        assert!(enqueue(&mut pending, MenuInput::Down, 2));
        assert!(!enqueue(&mut pending, MenuInput::Activate, 2));
        assert_eq!(pending, VecDeque::from([MenuInput::Down, MenuInput::Down]));
    }

    #[test]
    fn defaults_match_display_settings() {
        let options = RuntimeOptions::default();
        let settings = tickmenu_util::DisplaySettings::default();
        assert_eq!(options.render.width, settings.width);
        assert_eq!(options.render.height, settings.height);
        assert_eq!(options.render.separator, settings.separator);
        assert_eq!(options.tick, Duration::from_millis(settings.tick_ms));
    }
}
