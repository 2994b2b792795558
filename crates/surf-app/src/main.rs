//! Surf terminal browser entry point.
//!
//! Loads `surf.toml` (or the file named on the command line or in
//! `SURF_CONFIG`), restores the saved session, shows the home page and then
//! reads one command per line until `exit` or end of input.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use render::Palette;
use surf_session::{DemoContent, Session, SessionStore, SystemOpener};
use surf_terminal::{CommandOutput, CommandRegistry, Environment, register_session_commands};
use surf_types::config::SurfConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Resolve config from CLI arg, SURF_CONFIG env var, or ./surf.toml.
    let explicit = std::env::args().nth(1).map(PathBuf::from);
    let config = SurfConfig::resolve(explicit.as_deref())?;
    log::info!(
        "Starting surf (store {}, launcher {})",
        config.store_path.display(),
        config.launcher,
    );

    let mut session = open_session(&config);
    let mut registry = CommandRegistry::new();
    register_session_commands(&mut registry);
    let mut palette = Palette::for_theme(config.theme);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render::banner(palette))?;

    match session.go_home() {
        Ok(page) => show_page(&mut out, palette, &session, &page, None)?,
        Err(e) => write!(out, "{}", render::error(&e.to_string()))?,
    }
    flush_warnings(&mut out, &mut session)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "\n{}", render::prompt(palette))?;
        out.flush()?;

        let Some(line) = lines.next() else {
            log::info!("End of input");
            break;
        };
        let line = line?;

        let mut env = Environment {
            session: &mut session,
        };
        let result = registry.execute(&line, &mut env);
        match result {
            Ok(CommandOutput::Exit) => break,
            Ok(CommandOutput::ThemeSwap { theme }) => {
                palette = Palette::for_theme(theme);
                log::info!("Theme changed to {theme}");
                write!(out, "{}", render::banner(palette))?;
            },
            Ok(CommandOutput::Page { page, suggestions }) => {
                show_page(&mut out, palette, &session, &page, suggestions.as_deref())?;
            },
            Ok(other) => {
                if let Some(text) = render::output(palette, &other) {
                    write!(out, "{text}")?;
                }
            },
            Err(e) if e.is_not_found() => {
                write!(out, "{}", render::notice(palette, &e.to_string()))?;
            },
            Err(e) => write!(out, "{}", render::error(&e.to_string()))?,
        }
        flush_warnings(&mut out, &mut session)?;
    }

    writeln!(out, "Exiting browser. Goodbye!")?;
    log::info!("surf shut down cleanly");
    Ok(())
}

/// Restore the saved session. An unreadable store is moved aside and the
/// session starts empty.
fn open_session(config: &SurfConfig) -> Session {
    let store = SessionStore::new(&config.store_path);
    let opener = SystemOpener::new(config.launcher);
    Session::open(store, Box::new(DemoContent), Box::new(opener)).with_home(&config.home_url)
}

fn show_page(
    out: &mut impl Write,
    palette: Palette,
    session: &Session,
    page: &surf_session::PageView,
    suggestions: Option<&[String]>,
) -> io::Result<()> {
    write!(out, "{}", render::page(palette, page, suggestions))?;
    write!(out, "{}", render::tabs(palette, &session.tabs()))?;
    write!(out, "{}", render::history(palette, &session.history()))
}

fn flush_warnings(out: &mut impl Write, session: &mut Session) -> io::Result<()> {
    for warning in session.take_warnings() {
        write!(out, "{}", render::warning(&warning.to_string()))?;
    }
    Ok(())
}
