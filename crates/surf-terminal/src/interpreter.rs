//! Command trait, registry, and dispatch logic.
//!
//! Supports quoted arguments, case-insensitive command names, aliases and a
//! built-in `help`.

use std::collections::HashMap;

use surf_session::{PageView, Session};
use surf_types::config::Theme;
use surf_types::error::{Result, SurfError};

/// Output produced by a command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A page to display.
    Page {
        page: PageView,
        /// History suggestions for a typed URL; `None` when nothing was typed.
        suggestions: Option<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to the app to swap the colour theme.
    ThemeSwap { theme: Theme },
    /// Signal to the app to end the session loop.
    Exit,
}

/// Shared mutable environment passed to every command.
pub struct Environment<'a> {
    /// The browsing session commands act on.
    pub session: &'a mut Session,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "tab <n>").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_ascii_lowercase(), cmd);
    }

    /// Make `alias` dispatch to the command named `target`.
    pub fn set_alias(&mut self, alias: &str, target: &str) {
        self.aliases
            .insert(alias.to_ascii_lowercase(), target.to_ascii_lowercase());
    }

    /// Parse and execute a command line.
    ///
    /// Command names are case-insensitive; arguments are passed through
    /// as typed.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let tokens = tokenize(line)?;
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let name = self.resolve(first);
        if name == "help" {
            return self.execute_help(&args);
        }

        log::debug!("dispatch {name} {args:?}");
        match self.commands.get(name.as_str()) {
            Some(cmd) => cmd.execute(&args, env),
            None => Err(SurfError::Command(format!("unknown command: {first}"))),
        }
    }

    fn resolve(&self, name: &str) -> String {
        let lower = name.to_ascii_lowercase();
        self.aliases.get(&lower).cloned().unwrap_or(lower)
    }

    /// Built-in `help [command]`.
    fn execute_help(&self, args: &[&str]) -> Result<CommandOutput> {
        if let Some(&name) = args.first() {
            let resolved = self.resolve(name);
            return match self.commands.get(resolved.as_str()) {
                Some(cmd) => {
                    let mut out = format!("{} ({})\n", cmd.name(), cmd.category());
                    out.push_str(&format!("  {}\n", cmd.description()));
                    out.push_str(&format!("  Usage: {}", cmd.usage()));
                    let aliases = self.aliases_of(cmd.name());
                    if !aliases.is_empty() {
                        out.push_str(&format!("\n  Aliases: {}", aliases.join(", ")));
                    }
                    Ok(CommandOutput::Text(out))
                },
                None => Err(SurfError::Command(format!("unknown command: {name}"))),
            };
        }

        // Group commands by category.
        let mut categories: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
        categories
            .entry("general")
            .or_default()
            .push(("help", "Show commands or details of one command"));
        for cmd in self.commands.values() {
            categories
                .entry(cmd.category())
                .or_default()
                .push((cmd.name(), cmd.description()));
        }

        let mut cats: Vec<(&str, Vec<(&str, &str)>)> = categories.into_iter().collect();
        cats.sort_by_key(|(cat, _)| *cat);

        let total: usize = cats.iter().map(|(_, cmds)| cmds.len()).sum();
        let mut out = format!("Commands ({total}):\n");
        for (cat, mut cmds) in cats {
            cmds.sort_by_key(|(name, _)| *name);
            out.push_str(&format!("\n  [{cat}]\n"));
            for (name, desc) in &cmds {
                out.push_str(&format!("    {name:14} {desc}\n"));
            }
        }
        out.push_str("\nType 'help <command>' for details.");
        Ok(CommandOutput::Text(out))
    }

    fn aliases_of(&self, name: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        found.sort_unstable();
        found
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tokenizer: handles single quotes, double quotes, and backslash escapes.
// ---------------------------------------------------------------------------

/// Tokenize a command line respecting quotes and backslash escapes.
///
/// - Single-quoted strings preserve all characters literally.
/// - Inside double quotes, `\"` and `\\` are escapes.
/// - Backslash escapes the next character outside of quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => match chars.next_if(|&next| next == '"' || next == '\\') {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                },
                _ => current.push(ch),
            }
        } else {
            match ch {
                '\'' => in_single = true,
                '"' => in_double = true,
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                },
                _ => current.push(ch),
            }
        }
    }

    if in_single {
        return Err(SurfError::Command("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(SurfError::Command("unterminated double quote".to_string()));
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
