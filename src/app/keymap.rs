//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the normal (list) mode of the
//! TUI. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization
//!
//! Form, confirmation and help modals handle their keys directly; only the
//! list screen is rebindable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Each action represents a distinct operation in the TUI. Multiple key
/// combinations can map to the same action (e.g., both 'j' and Down arrow
/// move down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Switch to the next entity tab.
    SwitchTab,
    /// Switch to the previous entity tab.
    PrevTab,
    /// Move up in the current table.
    MoveUp,
    /// Move down in the current table.
    MoveDown,
    /// Move one page up in the current table.
    PageUp,
    /// Move one page down in the current table.
    PageDown,
    /// Open the form to create a new entry.
    NewEntry,
    /// Open the form pre-filled with the selected entry.
    EditEntry,
    /// Ask for confirmation to delete the selected entry.
    DeleteEntry,
    /// Re-fetch the active tab's collection from the API.
    Refresh,
    /// Display the help/keybindings reference.
    OpenHelp,
    /// Ignore this key (used for keys that shouldn't trigger anything).
    Ignore,
}

/// Manages keybinding configuration and key-to-action resolution.
///
/// The keymap uses a canonical mapping from `(KeyModifiers, KeyCode)` pairs to
/// [`KeyAction`]s. It supports loading from and saving to a configuration
/// file, with sensible defaults if no custom config is present.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Canonical mapping from (modifiers, code) to action.
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    ///
    /// Includes:
    /// - Arrow keys and vim-style keys (hjkl) for navigation
    /// - Common keys like q (quit), n (new), e (edit), d (delete), r (refresh)
    /// - Tab/BackTab for tab switching
    /// - Page Up/Down for pagination
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Tab), KeyAction::SwitchTab);
        // Shift+Tab is BackTab in crossterm; some terminals report the SHIFT
        // modifier alongside it, some send Tab+SHIFT
        bindings.insert((M::NONE, BackTab), KeyAction::PrevTab);
        bindings.insert((M::SHIFT, BackTab), KeyAction::PrevTab);
        bindings.insert((M::SHIFT, Tab), KeyAction::PrevTab);

        bindings.insert((M::NONE, Char('n')), KeyAction::NewEntry);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditEntry);
        bindings.insert((M::NONE, Enter), KeyAction::EditEntry);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteEntry);
        bindings.insert((M::NONE, KeyCode::Delete), KeyAction::DeleteEntry);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);

        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);

        // Page keys
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load a keymap from a file, or create defaults if the file doesn't exist.
    ///
    /// If the specified path exists it is parsed; otherwise a fresh default
    /// keymap is written to the path for future customization.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the keymap configuration file.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// The file should use the format: `<Action> = <KeySpec>`. The method
    /// starts from defaults and overrides with user-specified bindings.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the keymap configuration file.
    ///
    /// # Returns
    ///
    /// `Some(keymap)` if the file exists and is readable; `None` otherwise.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        Some(map)
    }

    /// Write the current keymap to a configuration file.
    ///
    /// Exports a readable subset of the defaults in `<Action> = <KeySpec>`
    /// format, with comments documenting the accepted key specs and actions.
    ///
    /// # Arguments
    ///
    /// * `path` - The path where the keymap will be written.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# biblio-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Tab, BackTab, Up, Down, Left, Right, PageUp, PageDown, Delete, n, e, d, r, j, k, h, l\n");
        buf.push_str("# Actions: Quit, SwitchTab, PrevTab, MoveUp, MoveDown, PageUp, PageDown, NewEntry, EditEntry, DeleteEntry, Refresh, OpenHelp, Ignore\n\n");

        // Emit a stable, readable subset of current bindings
        let dump = [
            ("q", KeyAction::Quit),
            ("Esc", KeyAction::Ignore),
            ("Tab", KeyAction::SwitchTab),
            ("BackTab", KeyAction::PrevTab),
            ("n", KeyAction::NewEntry),
            ("e", KeyAction::EditEntry),
            ("Enter", KeyAction::EditEntry),
            ("d", KeyAction::DeleteEntry),
            ("Delete", KeyAction::DeleteEntry),
            ("r", KeyAction::Refresh),
            ("?", KeyAction::OpenHelp),
            ("Up", KeyAction::MoveUp),
            ("Down", KeyAction::MoveDown),
            ("k", KeyAction::MoveUp),
            ("j", KeyAction::MoveDown),
            ("h", KeyAction::PageUp),
            ("l", KeyAction::PageDown),
            ("PageUp", KeyAction::PageUp),
            ("PageDown", KeyAction::PageDown),
        ];
        for (k, a) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its corresponding action.
    ///
    /// # Arguments
    ///
    /// * `key` - The key event to resolve.
    ///
    /// # Returns
    ///
    /// `Option<KeyAction>` indicating the action if found, or `None` if no action is mapped.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+q", "BackTab".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let chars: Vec<char> = rest.chars().collect();
            if chars.len() == 1 {
                KeyCode::Char(chars[0])
            } else {
                return None;
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "SwitchTab" => Some(KeyAction::SwitchTab),
        "PrevTab" => Some(KeyAction::PrevTab),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "NewEntry" => Some(KeyAction::NewEntry),
        "EditEntry" => Some(KeyAction::EditEntry),
        "DeleteEntry" => Some(KeyAction::DeleteEntry),
        "Refresh" => Some(KeyAction::Refresh),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::SwitchTab => "SwitchTab",
        KeyAction::PrevTab => "PrevTab",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::NewEntry => "NewEntry",
        KeyAction::EditEntry => "EditEntry",
        KeyAction::DeleteEntry => "DeleteEntry",
        KeyAction::Refresh => "Refresh",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_resolve_core_actions() {
        let km = Keymap::new_defaults();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&quit), Some(KeyAction::Quit));
        let refresh = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&refresh), Some(KeyAction::Refresh));
        let unbound = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&unbound), None);
    }

    #[test]
    fn config_lines_override_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("biblio_keys_{}.conf", std::process::id()));
        std::fs::write(&path, "Quit = Ctrl+c\n# comment\nRefresh = F\n").unwrap();
        let km = Keymap::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&ctrl_c), Some(KeyAction::Quit));
        let big_f = KeyEvent::new(KeyCode::Char('F'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&big_f), Some(KeyAction::Refresh));
        // Defaults stay in place unless overridden
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&q), Some(KeyAction::Quit));
    }
}
