mod document;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tickmenu_menu::{MenuInput, Navigator, RenderOptions, render};
use tickmenu_tui::RuntimeOptions;
use tickmenu_util::{DisplaySettings, SettingsStore};
use tracing::{debug, warn};

use crate::document::{HostFlags, MenuDocument};

/// Navigate a hierarchical text menu on a small fixed-size display.
#[derive(Parser, Debug)]
#[command(name = "tickmenu", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the menu interactively in the terminal
    Run(DisplayArgs),
    /// Replay a key sequence and print the final frame
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct DisplayArgs {
    /// Menu document (YAML, or JSON with a .json extension). Defaults to the demo menu
    #[arg(long)]
    menu: Option<PathBuf>,

    /// Settings file overriding the default location
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Text width in columns
    #[arg(long)]
    width: Option<u16>,

    /// Text height in rows, breadcrumb included
    #[arg(long)]
    height: Option<u16>,

    /// Separator between breadcrumb labels
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    display: DisplayArgs,

    /// Inputs to apply before rendering: u(p), d(own), a(ctivate), b(ack)
    #[arg(long, default_value = "")]
    keys: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(display) => {
            init_tracing("warn");
            run_interactive(&display).await
        }
        Command::Render(args) => {
            init_tracing("info");
            let frame = render_headless(&args.display, &args.keys)?;
            print!("{frame}");
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_interactive(display: &DisplayArgs) -> Result<()> {
    let settings = resolve_settings(display);
    let flags = HostFlags::default();
    let mut navigator = load_navigator(display, &flags)?;
    let options = RuntimeOptions {
        render: render_options(&settings),
        tick: Duration::from_millis(settings.tick_ms.max(1)),
        ..RuntimeOptions::default()
    };
    tickmenu_tui::run(&mut navigator, options).await?;
    debug!(flags = ?flags.snapshot(), "Final host flags");
    Ok(())
}

fn render_headless(display: &DisplayArgs, keys: &str) -> Result<String> {
    let settings = resolve_settings(display);
    let flags = HostFlags::default();
    let mut navigator = load_navigator(display, &flags)?;
    for input in parse_keys(keys)? {
        let transition = navigator.apply(input);
        debug!(?input, ?transition, "Replayed menu input");
    }
    Ok(render::render(&navigator, &render_options(&settings)))
}

fn load_navigator(display: &DisplayArgs, flags: &HostFlags) -> Result<Navigator> {
    let document = match &display.menu {
        Some(path) => MenuDocument::load(path).with_context(|| format!("failed to load menu from {}", path.display()))?,
        None => MenuDocument::demo().context("built-in demo menu is invalid")?,
    };
    let tree = document.build(flags)?;
    Ok(Navigator::new(tree))
}

/// Loads stored settings and applies command-line overrides on top.
fn resolve_settings(display: &DisplayArgs) -> DisplaySettings {
    let store = match SettingsStore::open(display.settings.clone()) {
        Ok(store) => store,
        Err(error) => {
            warn!(error = %error, "Failed to load settings; using defaults");
            SettingsStore::ephemeral()
        }
    };
    let mut settings = store.settings().clone();
    if let Some(width) = display.width {
        settings.width = width;
    }
    if let Some(height) = display.height {
        settings.height = height;
    }
    if let Some(separator) = &display.separator {
        settings.separator = separator.clone();
    }
    settings
}

fn render_options(settings: &DisplaySettings) -> RenderOptions {
    RenderOptions::new(settings.width, settings.height).with_separator(settings.separator.clone())
}

/// Parses a replay sequence such as `"dda b"`. Whitespace is ignored.
fn parse_keys(keys: &str) -> Result<Vec<MenuInput>> {
    keys.chars()
        .filter(|key| !key.is_whitespace())
        .map(|key| match key.to_ascii_lowercase() {
            'u' => Ok(MenuInput::Up),
            'd' => Ok(MenuInput::Down),
            'a' => Ok(MenuInput::Activate),
            'b' => Ok(MenuInput::Back),
            other => Err(anyhow!("unknown key '{other}' (expected u, d, a or b)")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn display_with_menu(path: PathBuf) -> DisplayArgs {
        DisplayArgs {
            menu: Some(path),
            settings: Some(PathBuf::from("/nonexistent/tickmenu/settings.json")),
            width: Some(20),
            height: Some(5),
            separator: Some(" > ".to_string()),
        }
    }

    #[test]
    fn parses_key_sequences() {
        assert_eq!(
            parse_keys("dd a B").unwrap(),
            vec![MenuInput::Down, MenuInput::Down, MenuInput::Activate, MenuInput::Back]
        );
        assert!(parse_keys("dx").is_err());
    }

    #[test]
    fn headless_render_replays_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.yaml");
        fs::write(
            &path,
            "title: Main\nitems:\n  - label: A\n  - label: B\n  - label: C\n    items:\n      - label: C1\n      - label: C2\n",
        )
        .unwrap();

        let frame = render_headless(&display_with_menu(path), "dda").unwrap();
        assert_eq!(frame, "Main > C\n\n> C1 <\nC2\n");
    }

    #[test]
    fn command_line_overrides_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("settings.json");
        fs::write(&settings_path, r#"{ "width": 60, "height": 12, "separator": " | " }"#).unwrap();

        let display = DisplayArgs {
            settings: Some(settings_path),
            height: Some(4),
            ..DisplayArgs::default()
        };
        let settings = resolve_settings(&display);
        assert_eq!(settings.width, 60);
        assert_eq!(settings.height, 4);
        assert_eq!(settings.separator, " | ");
    }
}
