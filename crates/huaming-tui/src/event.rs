//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types. The
//! configurable keys come from a [`Keymap`] built from `[keybindings]`.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `:`                     | `CommandMode`              |
//! | `?`                     | `Help`                     |
//! | `PageUp`, `Ctrl+u`      | `PageUp`                   |
//! | `PageDown`, `Ctrl+d`    | `PageDown`                 |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `1`–`4`                 | `Toggle(..)`               |
//! | `5`–`8`                 | `QuickSeason(0..=3)`       |
//! | `s` / `g` / `t`         | `CycleSort/Group/Tier`     |
//! | `r`                     | `Reset`                    |
//! | `Ctrl+l`                | `ClearKeyword`             |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode every printable
//! character is a `Char`; only `Ctrl+c`, `Ctrl+l`, `Escape`, `Enter`, `Tab`,
//! `Backspace` and the arrow keys keep their special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use huaming_core::config::KeybindingsConfig;
use huaming_core::Toggle;

/// Direction for list and text-cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application (or close the open popup).
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Transfer focus to the keyword bar.
    QueryFocus,
    /// Open the `:` command line.
    CommandMode,
    /// Toggle the help popup.
    Help,
    PageUp,
    PageDown,
    /// Move the list cursor, or the text cursor in insert mode.
    Nav(Direction),
    /// Flip one of the four boolean filters.
    Toggle(Toggle),
    /// Quick-toggle the season at this index of the quick-season list.
    QuickSeason(usize),
    CycleSort,
    CycleGroup,
    CycleTier,
    /// Reset every filter to its default.
    Reset,
    ClearKeyword,
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm the active input or open the detail popup.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (keyword focus, popup, command line).
    Escape,
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// The configurable part of the key mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub toggle_focus: KeyCode,
    pub query_focus: KeyCode,
    pub command: KeyCode,
    pub help: KeyCode,
    pub cycle_sort: KeyCode,
    pub cycle_group: KeyCode,
    pub cycle_tier: KeyCode,
    pub reset: KeyCode,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

impl Keymap {
    /// Unparseable entries fall back to the built-in key.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let key = |value: &str, fallback: KeyCode| {
            parse_key(value).unwrap_or_else(|| {
                tracing::warn!(value, "unrecognised key binding, using default");
                fallback
            })
        };
        Self {
            toggle_focus: key(&cfg.toggle_focus, KeyCode::Tab),
            query_focus: key(&cfg.query_focus, KeyCode::Char('/')),
            command: key(&cfg.command, KeyCode::Char(':')),
            help: key(&cfg.help, KeyCode::Char('?')),
            cycle_sort: key(&cfg.cycle_sort, KeyCode::Char('s')),
            cycle_group: key(&cfg.cycle_group, KeyCode::Char('g')),
            cycle_tier: key(&cfg.cycle_tier, KeyCode::Char('t')),
            reset: key(&cfg.reset, KeyCode::Char('r')),
        }
    }

    fn lookup(&self, code: KeyCode) -> Option<AppEvent> {
        let bound = [
            (self.toggle_focus, AppEvent::FocusNext),
            (self.query_focus, AppEvent::QueryFocus),
            (self.command, AppEvent::CommandMode),
            (self.help, AppEvent::Help),
            (self.cycle_sort, AppEvent::CycleSort),
            (self.cycle_group, AppEvent::CycleGroup),
            (self.cycle_tier, AppEvent::CycleTier),
            (self.reset, AppEvent::Reset),
        ];
        bound
            .into_iter()
            .find(|(k, _)| *k == code)
            .map(|(_, ev)| ev)
    }
}

/// `"Tab"`, `"Enter"`, `"Space"`, `"F5"` or a single character.
pub fn parse_key(value: &str) -> Option<KeyCode> {
    match value {
        "Tab" => Some(KeyCode::Tab),
        "Enter" => Some(KeyCode::Enter),
        "Space" => Some(KeyCode::Char(' ')),
        "Esc" => Some(KeyCode::Esc),
        s if s.len() > 1 && s.starts_with('F') => s[1..].parse().ok().map(KeyCode::F),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no semantic meaning for the
/// application (mouse events, unbound keys).
pub fn to_app_event(event: Event, keymap: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keymap),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent, keymap: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    if key.modifiers == Mod::CONTROL {
        return match key.code {
            Char('c') => Some(AppEvent::Quit),
            Char('l') => Some(AppEvent::ClearKeyword),
            Char('u') => Some(AppEvent::PageUp),
            Char('d') => Some(AppEvent::PageDown),
            _ => None,
        };
    }

    // Configurable keys win over the fixed ones below. Shifted symbols like
    // `?` and `:` may arrive with SHIFT set depending on the terminal.
    if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT {
        if let Some(ev) = keymap.lookup(key.code) {
            return Some(ev);
        }
    }

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c @ '1'..='4') if key.modifiers == Mod::NONE => {
            Some(AppEvent::Toggle(Toggle::ALL[c as usize - '1' as usize]))
        }
        Char(c @ '5'..='8') if key.modifiers == Mod::NONE => {
            Some(AppEvent::QuickSeason(c as usize - '5' as usize))
        }

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('l') if key.modifiers == Mod::CONTROL => Some(AppEvent::ClearKeyword),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    fn normal(ev: Event) -> Option<AppEvent> {
        to_app_event(ev, &Keymap::default())
    }

    #[test]
    fn quit_keys() {
        assert_eq!(normal(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(normal(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn focus_query_command_and_help() {
        assert_eq!(normal(press(KeyCode::Tab)), Some(AppEvent::FocusNext));
        assert_eq!(normal(press(KeyCode::Char('/'))), Some(AppEvent::QueryFocus));
        assert_eq!(normal(press(KeyCode::Char(':'))), Some(AppEvent::CommandMode));
        assert_eq!(
            normal(key(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(AppEvent::Help)
        );
    }

    #[test]
    fn digit_keys_toggle_filters_and_seasons() {
        assert_eq!(
            normal(press(KeyCode::Char('1'))),
            Some(AppEvent::Toggle(Toggle::OnlyFilled))
        );
        assert_eq!(
            normal(press(KeyCode::Char('4'))),
            Some(AppEvent::Toggle(Toggle::SeasonOnly))
        );
        assert_eq!(normal(press(KeyCode::Char('5'))), Some(AppEvent::QuickSeason(0)));
        assert_eq!(normal(press(KeyCode::Char('8'))), Some(AppEvent::QuickSeason(3)));
    }

    #[test]
    fn cycle_and_reset_keys() {
        assert_eq!(normal(press(KeyCode::Char('s'))), Some(AppEvent::CycleSort));
        assert_eq!(normal(press(KeyCode::Char('g'))), Some(AppEvent::CycleGroup));
        assert_eq!(normal(press(KeyCode::Char('t'))), Some(AppEvent::CycleTier));
        assert_eq!(normal(press(KeyCode::Char('r'))), Some(AppEvent::Reset));
        assert_eq!(normal(ctrl(KeyCode::Char('l'))), Some(AppEvent::ClearKeyword));
    }

    #[test]
    fn list_navigation() {
        assert_eq!(normal(press(KeyCode::Up)), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(normal(press(KeyCode::Char('j'))), Some(AppEvent::Nav(Direction::Down)));
        assert_eq!(normal(press(KeyCode::PageDown)), Some(AppEvent::PageDown));
        assert_eq!(normal(ctrl(KeyCode::Char('u'))), Some(AppEvent::PageUp));
        assert_eq!(normal(press(KeyCode::Enter)), Some(AppEvent::Enter));
    }

    #[test]
    fn remapped_keys_follow_config() {
        let cfg = KeybindingsConfig {
            cycle_sort: "o".to_string(),
            help: "F1".to_string(),
            ..KeybindingsConfig::default()
        };
        let keymap = Keymap::from_config(&cfg);
        assert_eq!(
            to_app_event(press(KeyCode::Char('o')), &keymap),
            Some(AppEvent::CycleSort)
        );
        assert_eq!(to_app_event(press(KeyCode::F(1)), &keymap), Some(AppEvent::Help));
        // the old key is now an ordinary character
        assert_eq!(
            to_app_event(press(KeyCode::Char('s')), &keymap),
            Some(AppEvent::Char('s'))
        );
    }

    #[test]
    fn bad_binding_falls_back() {
        let cfg = KeybindingsConfig {
            reset: "ctrl-nope".to_string(),
            ..KeybindingsConfig::default()
        };
        assert_eq!(Keymap::from_config(&cfg).reset, KeyCode::Char('r'));
    }

    #[test]
    fn resize_and_unbound() {
        assert_eq!(normal(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
        assert_eq!(normal(press(KeyCode::F(5))), None);
    }

    // ── Insert mode ────────────────────────────────────────────────────────

    #[test]
    fn insert_mode_shortcut_letters_are_chars() {
        for ch in ['j', 'k', 'q', 's', 'g', 't', 'r', '1', '5', '/', ':', '?'] {
            assert_eq!(
                to_app_event_insert(press(KeyCode::Char(ch))),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char"
            );
        }
    }

    #[test]
    fn insert_mode_keeps_control_bindings() {
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
        assert_eq!(
            to_app_event_insert(ctrl(KeyCode::Char('l'))),
            Some(AppEvent::ClearKeyword)
        );
        assert_eq!(
            to_app_event_insert(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
    }
}
