//! Themed text rendering for the terminal screen.
//!
//! Every function returns a `String` so the REPL decides when to print.

use surf_session::{HistoryView, PageView, TabView};
use surf_terminal::CommandOutput;
use surf_types::config::Theme;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

/// The displayed clock never moves.
pub const STATIC_TIME: &str = "Fri May 23 23:10:00 IST 2025";

const RULE: &str = "=============================================";

/// ANSI colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: &'static str,
    pub text: &'static str,
    pub menu: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Default => Self {
                header: CYAN,
                text: YELLOW,
                menu: BLUE,
            },
            Theme::Dark => Self {
                header: BLUE,
                text: CYAN,
                menu: MAGENTA,
            },
            Theme::Light => Self {
                header: GREEN,
                text: MAGENTA,
                menu: YELLOW,
            },
        }
    }
}

pub fn banner(p: Palette) -> String {
    format!(
        "{}{RULE}\n\
         |            Surf Browser v{:<17}|\n\
         |  Type 'help' for the list of commands     |\n\
         {RULE}{RESET}\n",
        p.header,
        env!("CARGO_PKG_VERSION"),
    )
}

pub fn prompt(p: Palette) -> String {
    format!("{}surf> {RESET}", p.menu)
}

/// A page with its header, optional suggestions, and body.
pub fn page(p: Palette, page: &PageView, suggestions: Option<&[String]>) -> String {
    let mut out = String::new();
    if let Some(suggestions) = suggestions {
        out.push_str(&format!("{}Suggested URLs:\n----------------\n", p.text));
        if suggestions.is_empty() {
            out.push_str("  No suggestions found.\n");
        }
        for url in suggestions {
            out.push_str(&format!("  {url}\n"));
        }
        out.push_str(&format!("----------------{RESET}\n\n"));
    }
    out.push_str(&format!("{GREEN}Current URL: {}{RESET}\n", page.url));
    out.push_str(&format!("{}Current Time: {STATIC_TIME}\n\n", p.text));
    out.push_str("Web Content:\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&page.content);
    if !page.content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(RULE);
    out.push_str(&format!("{RESET}\n"));
    out
}

/// Tab list shown under a page.
pub fn tabs(p: Palette, tabs: &[TabView]) -> String {
    let mut out = format!("{}Open Tabs:\n", p.text);
    for tab in tabs {
        let marker = if tab.is_current { "> " } else { "  " };
        out.push_str(&format!("{marker}{}. {}\n", tab.index, tab.url));
    }
    out.push_str(RESET);
    out
}

/// History list shown under a page.
pub fn history(p: Palette, entries: &[HistoryView]) -> String {
    let mut out = format!("{}Browsing History:\n----------------\n", p.text);
    if entries.is_empty() {
        out.push_str("No history yet!\n");
    }
    for entry in entries {
        let marker = if entry.is_current { "> " } else { "  " };
        out.push_str(&format!("{marker}{}. {}\n", entry.position, entry.url));
    }
    out.push_str(&format!("----------------{RESET}\n"));
    out
}

/// Left-aligned columns sized to their widest cell.
pub fn table(p: Palette, headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            } else {
                widths.push(cell.len());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c:<w$}", w = widths[i]))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::from(p.text);
    out.push_str(&line(headers));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(RESET);
    out
}

pub fn error(message: &str) -> String {
    format!("{RED}Error: {message}{RESET}\n")
}

/// An expected "nothing there" outcome, shown without the error label.
pub fn notice(p: Palette, message: &str) -> String {
    format!("{}{message}{RESET}\n", p.text)
}

pub fn warning(message: &str) -> String {
    format!("{YELLOW}Warning: {message}{RESET}\n")
}

/// Render a non-page command output. Pages and signals are handled by the
/// caller; they yield `None` here.
pub fn output(p: Palette, out: &CommandOutput) -> Option<String> {
    match out {
        CommandOutput::Text(text) => Some(format!("{}{text}{RESET}\n", p.text)),
        CommandOutput::Table { headers, rows } => Some(table(p, headers, rows)),
        CommandOutput::Page { .. }
        | CommandOutput::None
        | CommandOutput::ThemeSwap { .. }
        | CommandOutput::Exit => None,
    }
}
