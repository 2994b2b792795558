//! Session commands for the surf terminal.

use surf_session::AddOutcome;
use surf_types::config::{Launcher, Theme};
use surf_types::error::{Result, SurfError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register every session command into a registry.
pub fn register_session_commands(reg: &mut CommandRegistry) {
    // Navigation.
    reg.register(Box::new(OpenCmd));
    reg.register(Box::new(RefreshCmd));
    reg.register(Box::new(BackCmd));
    reg.register(Box::new(HomeCmd));
    // Tabs.
    reg.register(Box::new(NewTabCmd));
    reg.register(Box::new(TabCmd));
    reg.register(Box::new(TabsCmd));
    // History.
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(ClearHistoryCmd));
    reg.register(Box::new(SearchCmd));
    // Bookmarks.
    reg.register(Box::new(BookmarkCmd));
    reg.register(Box::new(BookmarksCmd));
    // Settings and general.
    reg.register(Box::new(BrowserCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(StatusCmd));
    reg.register(Box::new(ExitCmd));

    reg.set_alias("go", "open");
    reg.set_alias("quit", "exit");
}

fn usage_error(cmd: &dyn Command) -> SurfError {
    SurfError::Command(format!("usage: {}", cmd.usage()))
}

/// Parse a 1-based number typed by the user.
fn parse_number(arg: &str) -> Result<usize> {
    arg.parse::<usize>()
        .map_err(|_| SurfError::Command(format!("not a number: {arg}")))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn page(page: surf_session::PageView) -> CommandOutput {
    CommandOutput::Page {
        page,
        suggestions: None,
    }
}

// ---------------------------------------------------------------------------
// open / refresh / back / home
// ---------------------------------------------------------------------------

struct OpenCmd;
impl Command for OpenCmd {
    fn name(&self) -> &str {
        "open"
    }
    fn description(&self) -> &str {
        "Enter a URL and visit it"
    }
    fn usage(&self) -> &str {
        "open <url>"
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [url] = args else {
            return Err(usage_error(self));
        };
        // Suggestions reflect history before this visit lands.
        let suggestions = Some(env.session.suggest(url));
        let page = env.session.visit(url)?;
        Ok(CommandOutput::Page { page, suggestions })
    }
}

struct RefreshCmd;
impl Command for RefreshCmd {
    fn name(&self) -> &str {
        "refresh"
    }
    fn description(&self) -> &str {
        "Show the current tab again"
    }
    fn usage(&self) -> &str {
        "refresh"
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(page(env.session.refresh()?))
    }
}

struct BackCmd;
impl Command for BackCmd {
    fn name(&self) -> &str {
        "back"
    }
    fn description(&self) -> &str {
        "Go back to the previous page"
    }
    fn usage(&self) -> &str {
        "back"
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(page(env.session.go_back()?))
    }
}

struct HomeCmd;
impl Command for HomeCmd {
    fn name(&self) -> &str {
        "home"
    }
    fn description(&self) -> &str {
        "Visit the home page"
    }
    fn usage(&self) -> &str {
        "home"
    }
    fn category(&self) -> &str {
        "navigation"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(page(env.session.go_home()?))
    }
}

// ---------------------------------------------------------------------------
// newtab / tab / tabs
// ---------------------------------------------------------------------------

struct NewTabCmd;
impl Command for NewTabCmd {
    fn name(&self) -> &str {
        "newtab"
    }
    fn description(&self) -> &str {
        "Open a URL in a new tab"
    }
    fn usage(&self) -> &str {
        "newtab <url>"
    }
    fn category(&self) -> &str {
        "tabs"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [url] = args else {
            return Err(usage_error(self));
        };
        Ok(page(env.session.visit(url)?))
    }
}

struct TabCmd;
impl Command for TabCmd {
    fn name(&self) -> &str {
        "tab"
    }
    fn description(&self) -> &str {
        "Switch to a tab, counted from the current one"
    }
    fn usage(&self) -> &str {
        "tab <n>"
    }
    fn category(&self) -> &str {
        "tabs"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [n] = args else {
            return Err(usage_error(self));
        };
        Ok(page(env.session.switch_tab(parse_number(n)?)?))
    }
}

struct TabsCmd;
impl Command for TabsCmd {
    fn name(&self) -> &str {
        "tabs"
    }
    fn description(&self) -> &str {
        "List open tabs"
    }
    fn usage(&self) -> &str {
        "tabs"
    }
    fn category(&self) -> &str {
        "tabs"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tabs = env.session.tabs();
        if tabs.is_empty() {
            return Ok(CommandOutput::Text("No open tabs.".to_string()));
        }
        let rows = tabs
            .into_iter()
            .map(|t| {
                let marker = if t.is_current { "*" } else { "" };
                vec![t.index.to_string(), marker.to_string(), t.url]
            })
            .collect();
        Ok(CommandOutput::Table {
            headers: strings(&["#", "", "URL"]),
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// history / clear-history / search
// ---------------------------------------------------------------------------

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "List visited pages"
    }
    fn usage(&self) -> &str {
        "history"
    }
    fn category(&self) -> &str {
        "history"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let entries = env.session.history();
        if entries.is_empty() {
            return Ok(CommandOutput::Text("History is empty.".to_string()));
        }
        let rows = entries
            .into_iter()
            .map(|h| {
                let marker = if h.is_current { "<- current" } else { "" };
                vec![h.position.to_string(), h.url, marker.to_string()]
            })
            .collect();
        Ok(CommandOutput::Table {
            headers: strings(&["#", "URL", ""]),
            rows,
        })
    }
}

struct ClearHistoryCmd;
impl Command for ClearHistoryCmd {
    fn name(&self) -> &str {
        "clear-history"
    }
    fn description(&self) -> &str {
        "Forget every visited page"
    }
    fn usage(&self) -> &str {
        "clear-history"
    }
    fn category(&self) -> &str {
        "history"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        env.session.clear_history();
        Ok(CommandOutput::Text("History cleared.".to_string()))
    }
}

struct SearchCmd;
impl Command for SearchCmd {
    fn name(&self) -> &str {
        "search"
    }
    fn description(&self) -> &str {
        "Search history; with a number, visit that match"
    }
    fn usage(&self) -> &str {
        "search <keyword> [n]"
    }
    fn category(&self) -> &str {
        "history"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args {
            [keyword] => {
                let hits = env.session.search_history(keyword);
                if hits.is_empty() {
                    return Ok(CommandOutput::Text(format!(
                        "No history entries match '{keyword}'."
                    )));
                }
                let rows = hits
                    .into_iter()
                    .map(|m| vec![m.ordinal.to_string(), m.position.to_string(), m.url])
                    .collect();
                Ok(CommandOutput::Table {
                    headers: strings(&["#", "Entry", "URL"]),
                    rows,
                })
            },
            [keyword, n] => {
                let ordinal = parse_number(n)?;
                Ok(page(env.session.visit_search_result(keyword, ordinal)?))
            },
            _ => Err(usage_error(self)),
        }
    }
}

// ---------------------------------------------------------------------------
// bookmark / bookmarks
// ---------------------------------------------------------------------------

struct BookmarkCmd;
impl Command for BookmarkCmd {
    fn name(&self) -> &str {
        "bookmark"
    }
    fn description(&self) -> &str {
        "Bookmark the current tab"
    }
    fn usage(&self) -> &str {
        "bookmark"
    }
    fn category(&self) -> &str {
        "bookmarks"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (url, outcome) = env.session.add_bookmark()?;
        let text = match outcome {
            AddOutcome::Added => format!("Bookmarked: {url}"),
            AddOutcome::AlreadyBookmarked => format!("Already bookmarked: {url}"),
        };
        Ok(CommandOutput::Text(text))
    }
}

struct BookmarksCmd;
impl Command for BookmarksCmd {
    fn name(&self) -> &str {
        "bookmarks"
    }
    fn description(&self) -> &str {
        "List bookmarks; with a number, visit that bookmark"
    }
    fn usage(&self) -> &str {
        "bookmarks [n]"
    }
    fn category(&self) -> &str {
        "bookmarks"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args {
            [] => {
                let urls = env.session.bookmarks();
                if urls.is_empty() {
                    return Ok(CommandOutput::Text("No bookmarks yet.".to_string()));
                }
                let rows = urls
                    .into_iter()
                    .enumerate()
                    .map(|(i, url)| vec![(i + 1).to_string(), url])
                    .collect();
                Ok(CommandOutput::Table {
                    headers: strings(&["#", "URL"]),
                    rows,
                })
            },
            [n] => Ok(page(env.session.visit_bookmark(parse_number(n)?)?)),
            _ => Err(usage_error(self)),
        }
    }
}

// ---------------------------------------------------------------------------
// browser / theme / status / exit
// ---------------------------------------------------------------------------

struct BrowserCmd;
impl Command for BrowserCmd {
    fn name(&self) -> &str {
        "browser"
    }
    fn description(&self) -> &str {
        "Show or choose the external browser"
    }
    fn usage(&self) -> &str {
        "browser [default|edge|chrome|none]"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args {
            [] => Ok(CommandOutput::Text(format!(
                "Browser: {}",
                env.session.launcher()
            ))),
            [choice] => {
                let launcher: Launcher = choice.parse()?;
                env.session.set_launcher(launcher);
                log::info!("launcher set to {launcher}");
                Ok(CommandOutput::Text(format!("Browser set to {launcher}.")))
            },
            _ => Err(usage_error(self)),
        }
    }
}

struct ThemeCmd;
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "Switch the colour theme"
    }
    fn usage(&self) -> &str {
        "theme <default|dark|light>"
    }
    fn category(&self) -> &str {
        "settings"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let [choice] = args else {
            return Err(usage_error(self));
        };
        let theme: Theme = choice.parse()?;
        Ok(CommandOutput::ThemeSwap { theme })
    }
}

struct StatusCmd;
impl Command for StatusCmd {
    fn name(&self) -> &str {
        "status"
    }
    fn description(&self) -> &str {
        "Show a summary of the session"
    }
    fn usage(&self) -> &str {
        "status [--json]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let summary = env.session.summary();
        match args {
            [] => {
                let lines = [
                    format!(
                        "current tab: {}",
                        summary.current_tab.as_deref().unwrap_or("(none)")
                    ),
                    format!("tabs: {}", summary.tabs.len()),
                    format!("history entries: {}", summary.history.len()),
                    format!("bookmarks: {}", summary.bookmarks.len()),
                    format!("cached pages: {}", summary.cached_pages),
                    format!("back depth: {}", summary.back_depth),
                    format!("browser: {}", summary.launcher),
                    if summary.saving {
                        format!("store: {}", summary.store_path)
                    } else {
                        format!("store: {} (not saving)", summary.store_path)
                    },
                ];
                Ok(CommandOutput::Text(lines.join("\n")))
            },
            ["--json"] => Ok(CommandOutput::Text(serde_json::to_string_pretty(&summary)?)),
            _ => Err(usage_error(self)),
        }
    }
}

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Save and leave the browser"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surf_session::{DemoContent, NoopOpener, Session, SessionStore};

    struct Harness {
        _dir: tempfile::TempDir,
        reg: CommandRegistry,
        session: Session,
    }

    impl Harness {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let session = Session::new(
                SessionStore::new(dir.path().join("browser_data.txt")),
                Box::new(DemoContent),
                Box::new(NoopOpener),
            );
            let mut reg = CommandRegistry::new();
            register_session_commands(&mut reg);
            Self {
                _dir: dir,
                reg,
                session,
            }
        }

        fn run(&mut self, line: &str) -> Result<CommandOutput> {
            let mut env = Environment {
                session: &mut self.session,
            };
            self.reg.execute(line, &mut env)
        }

        fn page_url(&mut self, line: &str) -> String {
            match self.run(line).unwrap() {
                CommandOutput::Page { page, .. } => page.url,
                other => panic!("expected page for {line:?}, got {other:?}"),
            }
        }

        fn text(&mut self, line: &str) -> String {
            match self.run(line).unwrap() {
                CommandOutput::Text(s) => s,
                other => panic!("expected text for {line:?}, got {other:?}"),
            }
        }

        fn rows(&mut self, line: &str) -> Vec<Vec<String>> {
            match self.run(line).unwrap() {
                CommandOutput::Table { rows, .. } => rows,
                other => panic!("expected table for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn open_visits_and_suggests_from_history() {
        let mut h = Harness::new();
        h.page_url("open google.com");
        match h.run("go google.com").unwrap() {
            CommandOutput::Page { page, suggestions } => {
                assert_eq!(page.url, "google.com");
                assert!(page.from_cache);
                assert_eq!(suggestions, Some(vec!["google.com".to_string()]));
            },
            other => panic!("expected page, got {other:?}"),
        }
    }

    #[test]
    fn open_rejects_bad_input() {
        let mut h = Harness::new();
        assert!(matches!(h.run("open"), Err(SurfError::Command(_))));
        assert!(matches!(h.run("open g o"), Err(SurfError::Command(_))));
        assert!(matches!(h.run("open 'g o'"), Err(SurfError::InvalidUrl(_))));
        assert!(h.session.history().is_empty());
    }

    #[test]
    fn back_refresh_home() {
        let mut h = Harness::new();
        assert!(h.run("refresh").unwrap_err().is_not_found());
        assert_eq!(h.page_url("home"), "home");
        assert_eq!(h.page_url("newtab openai.com"), "openai.com");
        assert_eq!(h.page_url("refresh"), "openai.com");
        assert_eq!(h.page_url("back"), "home");
        assert!(h.run("back").unwrap_err().is_not_found());
    }

    #[test]
    fn tabs_listing_and_switching() {
        let mut h = Harness::new();
        assert_eq!(h.text("tabs"), "No open tabs.");
        h.page_url("newtab a.com");
        h.page_url("newtab b.com");

        let rows = h.rows("tabs");
        assert_eq!(rows[0], ["1", "*", "b.com"]);
        assert_eq!(rows[1], ["2", "", "a.com"]);

        assert_eq!(h.page_url("tab 2"), "a.com");
        assert!(matches!(h.run("tab x"), Err(SurfError::Command(_))));
        assert!(matches!(
            h.run("tab 3"),
            Err(SurfError::InvalidIndex { index: 3, max: 2 })
        ));
    }

    #[test]
    fn history_marks_current_and_clears() {
        let mut h = Harness::new();
        assert_eq!(h.text("history"), "History is empty.");
        h.page_url("home");
        h.page_url("open google.com");
        let rows = h.rows("history");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ["2", "google.com", "<- current"]);

        assert_eq!(h.text("clear-history"), "History cleared.");
        assert_eq!(h.text("history"), "History is empty.");
    }

    #[test]
    fn search_lists_then_visits_match() {
        let mut h = Harness::new();
        h.page_url("open google.com");
        h.page_url("open openai.com");
        h.page_url("open docs.google.com");

        let rows = h.rows("search google");
        assert_eq!(rows, [["1", "1", "google.com"], ["2", "3", "docs.google.com"]]);
        assert_eq!(h.page_url("search google 2"), "docs.google.com");
        assert_eq!(h.text("search zzz"), "No history entries match 'zzz'.");
        assert!(h.run("search").is_err());
    }

    #[test]
    fn bookmark_commands() {
        let mut h = Harness::new();
        assert!(h.run("bookmark").unwrap_err().is_not_found());
        assert_eq!(h.text("bookmarks"), "No bookmarks yet.");

        h.page_url("open m.com");
        assert_eq!(h.text("bookmark"), "Bookmarked: m.com");
        assert_eq!(h.text("bookmark"), "Already bookmarked: m.com");
        h.page_url("open c.com");
        h.text("bookmark");

        assert_eq!(h.rows("bookmarks"), [["1", "m.com"], ["2", "c.com"]]);
        assert_eq!(h.page_url("bookmarks 2"), "c.com");
        assert!(matches!(
            h.run("bookmarks 3"),
            Err(SurfError::InvalidIndex { index: 3, max: 2 })
        ));
    }

    #[test]
    fn browser_setting() {
        let mut h = Harness::new();
        // The no-op opener has no program to choose.
        assert_eq!(h.text("browser"), "Browser: None");
        assert_eq!(h.text("browser chrome"), "Browser set to Google Chrome.");
        assert!(matches!(h.run("browser lynx"), Err(SurfError::Config(_))));
    }

    #[test]
    fn theme_signals_app() {
        let mut h = Harness::new();
        assert!(matches!(
            h.run("theme dark").unwrap(),
            CommandOutput::ThemeSwap { theme: Theme::Dark }
        ));
        assert!(h.run("theme neon").is_err());
        assert!(h.run("theme").is_err());
    }

    #[test]
    fn status_text_and_json() {
        let mut h = Harness::new();
        h.page_url("open google.com");
        let text = h.text("status");
        assert!(text.contains("current tab: google.com"));
        assert!(text.contains("history entries: 1"));

        let json: serde_json::Value = serde_json::from_str(&h.text("status --json")).unwrap();
        assert_eq!(json["current_tab"], "google.com");
        assert_eq!(json["cached_pages"], 1);
        assert!(h.run("status --yaml").is_err());
    }

    #[test]
    fn exit_and_quit() {
        let mut h = Harness::new();
        assert!(matches!(h.run("exit").unwrap(), CommandOutput::Exit));
        assert!(matches!(h.run("QUIT").unwrap(), CommandOutput::Exit));
    }

    #[test]
    fn help_covers_every_command() {
        let mut h = Harness::new();
        let all = h.text("help");
        for name in [
            "open", "refresh", "back", "home", "newtab", "tab", "tabs", "history",
            "clear-history", "search", "bookmark", "bookmarks", "browser", "theme",
            "status", "exit",
        ] {
            assert!(all.contains(name), "help is missing {name}");
        }
        assert!(all.starts_with("Commands (17):"));
        assert!(h.text("help go").contains("Aliases: go"));
    }
}
