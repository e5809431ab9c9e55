use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use tabmarks::app::{App, PendingAction};
use tabmarks::config::Config;
use tabmarks::event_loop::run_app;
use tabmarks::logging;
use tabmarks::parse::{load_bookmarks_file, load_tabs};

const USAGE: &str = "\
tabmarks: bookmark tabs and URL lists, import and export bookmark folders

Usage:
  tabmarks [OPTIONS]

Options:
  --store PATH    Chromium-format Bookmarks file to edit
  --tabs FILE     JSON array of {\"title\", \"url\"} tabs to bookmark
  --import FILE   Netscape bookmarks .html file to import on start
  -h, --help      Show this help
  -V, --version   Show version";

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    store: Option<PathBuf>,
    tabs: Option<PathBuf>,
    import: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(CliArgs),
    Help,
    Version,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--store" => &mut parsed.store,
            "--tabs" => &mut parsed.tabs,
            "--import" => &mut parsed.import,
            other => bail!("Unknown argument: {other}\n\n{USAGE}"),
        };
        let Some(value) = args.next() else {
            bail!("{arg} requires a value");
        };
        *slot = Some(PathBuf::from(value));
    }

    Ok(Command::Run(parsed))
}

fn main() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Version => {
            println!("tabmarks {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(args) => args,
    };

    // Logging is best-effort; the UI works without it
    if let Err(e) = logging::init() {
        eprintln!("tabmarks: logging disabled: {e:#}");
    }

    let config = Config::load().context("Failed to load configuration")?;
    let store_path = match args.store {
        Some(path) => path,
        None => config.resolved_store_path()?,
    };

    let tabs = match &args.tabs {
        Some(path) => load_tabs(path)?,
        None => Vec::new(),
    };

    // Parse the import file before touching the terminal so errors print plainly
    let import = match args.import {
        Some(path) => {
            let tree = load_bookmarks_file(&path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            Some(PendingAction::Import { tree, source: path })
        }
        None => None,
    };

    if !std::io::stdin().is_terminal() {
        bail!("tabmarks must be run in an interactive terminal");
    }

    let mut app = App::new(config, &store_path, tabs).context("Failed to initialize application")?;
    if let Some(action) = import {
        app.open_folder_selector(action);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal (always try to restore even on error)
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste);
    let _ = terminal.show_cursor();

    if app.store.is_dirty() {
        if let Err(e) = app.store.save() {
            warn!(error = %e, "failed to save bookmarks on exit");
        }
    }
    info!("exiting");

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_paths() {
        let command = parse_args(args(&["--store", "/b/Bookmarks", "--import", "x.html"])).unwrap();
        assert_eq!(
            command,
            Command::Run(CliArgs {
                store: Some(PathBuf::from("/b/Bookmarks")),
                tabs: None,
                import: Some(PathBuf::from("x.html")),
            })
        );
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(args(&["--tabs", "t.json", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(parse_args(args(&["--tabs"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
