//! `:` command line — parsing and execution.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `group <g\|all>` | Set the group selector |
//! | `tier <t\|all>` | Set the tier selector |
//! | `season <s\|all>` | Set the season selector |
//! | `sort <default\|name\|filled>` | Set the sort order |
//! | `toggle <filled\|alias\|meaning\|season>` | Flip a filter |
//! | `reset` | Reset every filter |
//! | `clear` | Clear the keyword |

use huaming_core::{Choice, SortMode, Toggle};

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Group(Choice),
    Tier(Choice),
    Season(Choice),
    Sort(SortMode),
    Toggle(Toggle),
    Reset,
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        let required = |usage: &'static str| {
            if rest.is_empty() {
                Err(format!("usage: {usage}"))
            } else {
                Ok(rest)
            }
        };

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "reset" => Ok(Command::Reset),
            "clear" => Ok(Command::Clear),
            "theme" => required("theme <default|gruvbox>").map(|n| Command::Theme(n.to_string())),
            "group" => required("group <n|all>").map(|g| Command::Group(Choice::parse(g))),
            "tier" => required("tier <name|all>").map(|t| Command::Tier(Choice::parse(t))),
            "season" => required("season <春|夏|秋|冬|…|all>").map(|s| Command::Season(Choice::parse(s))),
            "sort" => required("sort <default|name|filled>")?
                .parse()
                .map(Command::Sort),
            "toggle" => required("toggle <filled|alias|meaning|season>")?
                .parse()
                .map(Command::Toggle),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => {
                tracing::debug!(theme = %name, "theme switched");
                s.theme = theme;
            }
            None => s.notice = Some(format!("未知主题：{name}")),
        },
        Command::Group(choice) => {
            if offered(&s.options.groups, &choice) {
                s.update_selection(|sel| sel.set_group(choice));
            } else {
                s.notice = Some(format!("没有这个分组：{choice}"));
            }
        }
        Command::Tier(choice) => {
            if offered(&s.options.tiers, &choice) {
                s.update_selection(|sel| sel.set_tier(choice));
            } else {
                s.notice = Some(format!("没有这个等级：{choice}"));
            }
        }
        Command::Season(choice) => s.update_selection(|sel| sel.set_season(choice)),
        Command::Sort(mode) => s.update_selection(|sel| sel.set_sort(mode)),
        Command::Toggle(toggle) => s.update_selection(|sel| sel.toggle(toggle)),
        Command::Reset => s.reset(),
        Command::Clear => s.clear_keyword(),
    }
}

fn offered(values: &[String], choice: &Choice) -> bool {
    match choice {
        Choice::All => true,
        Choice::Only(v) => values.contains(v),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
