mod app;
mod config;
mod help;
mod locale;
mod pattern;
mod strip;
mod theme;
use crate::app::{App, StatusLine};
use crate::config::StripConfig;
use crate::strip::StripController;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        log: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut log = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log") => log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, config, log })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, config, log } => {
                // This has to happen while the process is still single-threaded
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                if let Some(path) = log {
                    init_logging(&path)?;
                }
                let mut config = match config {
                    Some(path) => StripConfig::load_from_path(path)?,
                    None => StripConfig::default(),
                };
                if date.is_some() {
                    config.starting_date = date;
                }
                let strip = StripController::new(config, today, StatusLine::default())
                    .context("invalid calendar configuration")?;
                let app = App::new(strip, today);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)
                })
            }
            Command::Help => {
                println!("Usage: calstrip [<options>] [YYYY-MM-DD]");
                println!();
                println!("Horizontally-scrolling calendar strip for the terminal");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>   Read strip settings from the given TOML file");
                println!("      --log <FILE>      Write log messages to the given file");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// Sends `tracing` output to `path`, filtered by `RUST_LOG` if set
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(concat!(env!("CARGO_PKG_NAME"), "=debug")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e).context("failed to install log subscriber"))
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    // Restoring the terminal goes ahead regardless
    release_mouse(io::stdout());
    ratatui::restore();
    r
}

/// Turns mouse reporting back off.  A failure is logged and reported as
/// `false` rather than returned, as the caller is already tearing down.
fn release_mouse<W: io::Write>(mut out: W) -> bool {
    match execute!(out, DisableMouseCapture) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to disable mouse capture");
            false
        }
    }
}
