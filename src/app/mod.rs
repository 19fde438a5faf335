//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state, the theme
//! configuration, and re-exports the event loop entry point (`run`).

pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::time::Instant;

use crate::controller::ResourceController;
use crate::form::FormState;
use crate::model::{Author, BookCopy, Loan, Reader};
use crate::notify::Toasts;

/// Entity screen currently shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveTab {
    Authors,
    Copies,
    Loans,
    Readers,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 4] = [
        ActiveTab::Authors,
        ActiveTab::Copies,
        ActiveTab::Loans,
        ActiveTab::Readers,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActiveTab::Authors => "Authors",
            ActiveTab::Copies => "Copies",
            ActiveTab::Loans => "Loans",
            ActiveTab::Readers => "Readers",
        }
    }

    /// Singular noun for prompts ("Delete this author?").
    pub fn noun(self) -> &'static str {
        match self {
            ActiveTab::Authors => "author",
            ActiveTab::Copies => "copy",
            ActiveTab::Loans => "loan",
            ActiveTab::Readers => "reader",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ActiveTab::Authors => ActiveTab::Copies,
            ActiveTab::Copies => ActiveTab::Loans,
            ActiveTab::Loans => ActiveTab::Readers,
            ActiveTab::Readers => ActiveTab::Authors,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveTab::Authors => ActiveTab::Readers,
            ActiveTab::Copies => ActiveTab::Authors,
            ActiveTab::Loans => ActiveTab::Copies,
            ActiveTab::Readers => ActiveTab::Loans,
        }
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// The entity form modal is open.
    Form,
    /// The delete confirmation prompt is open.
    ConfirmDelete,
    Help,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    /// Accent for success toasts.
    pub ok: Color,
    /// Accent for error toasts.
    pub err: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            ok: Color::Green,
            err: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            ok: Color::Rgb(0xa6, 0xe3, 0xa1),           // green
            err: Color::Rgb(0xf3, 0x8b, 0xa8),          // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "ok" => theme.ok = color,
                    "err" => theme.err = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or special names: "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let t = s.trim();
        let lower = t.to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = if let Some(h) = lower.strip_prefix('#') {
            h
        } else {
            lower.as_str()
        };
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# biblio-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // For named colors, emit a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::White => "#FFFFFF".to_string(),
                other => format!("{:?}", other),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("ok", self.ok);
        kv("err", self.err);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub active_tab: ActiveTab,
    pub authors: ResourceController<Author>,
    pub copies: ResourceController<BookCopy>,
    pub loans: ResourceController<Loan>,
    pub readers: ResourceController<Reader>,
    /// Open entity form, if any. Belongs to the active tab.
    pub form: Option<FormState>,
    /// Selected button in the delete prompt: 0 = delete, 1 = keep.
    pub confirm_choice: usize,
    pub input_mode: InputMode,
    pub rows_per_page: usize,
    pub toasts: Toasts,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config("theme.conf", "keybinds.conf")
    }

    /// Create an `AppState` with theme and keybindings loaded from (or
    /// initialized at) the given paths.
    pub fn with_config(theme_path: &str, keybinds_path: &str) -> Self {
        Self {
            started_at: Instant::now(),
            active_tab: ActiveTab::Authors,
            authors: ResourceController::new(),
            copies: ResourceController::new(),
            loans: ResourceController::new(),
            readers: ResourceController::new(),
            form: None,
            confirm_choice: 1,
            input_mode: InputMode::Normal,
            rows_per_page: 10,
            toasts: Toasts::new(),
            theme: Theme::load_or_init(theme_path),
            keymap: keymap::Keymap::load_or_init(keybinds_path),
            should_quit: false,
        }
    }

    pub fn active_count(&self) -> usize {
        match self.active_tab {
            ActiveTab::Authors => self.authors.items().len(),
            ActiveTab::Copies => self.copies.items().len(),
            ActiveTab::Loans => self.loans.items().len(),
            ActiveTab::Readers => self.readers.items().len(),
        }
    }

    pub fn active_loading(&self) -> bool {
        match self.active_tab {
            ActiveTab::Authors => self.authors.loading(),
            ActiveTab::Copies => self.copies.loading(),
            ActiveTab::Loans => self.loans.loading(),
            ActiveTab::Readers => self.readers.loading(),
        }
    }

    pub fn active_submitting(&self) -> bool {
        match self.active_tab {
            ActiveTab::Authors => self.authors.submitting(),
            ActiveTab::Copies => self.copies.submitting(),
            ActiveTab::Loans => self.loans.submitting(),
            ActiveTab::Readers => self.readers.submitting(),
        }
    }

    /// Id awaiting confirmation on the active tab.
    pub fn active_pending_delete(&self) -> Option<i64> {
        match self.active_tab {
            ActiveTab::Authors => self.authors.pending_delete(),
            ActiveTab::Copies => self.copies.pending_delete(),
            ActiveTab::Loans => self.loans.pending_delete(),
            ActiveTab::Readers => self.readers.pending_delete(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a type-agnostic controller operation against the controller of a tab.
macro_rules! with_controller {
    ($app:expr, $tab:expr, $ctl:ident => $body:expr) => {
        match $tab {
            $crate::app::ActiveTab::Authors => {
                let $ctl = &mut $app.authors;
                $body
            }
            $crate::app::ActiveTab::Copies => {
                let $ctl = &mut $app.copies;
                $body
            }
            $crate::app::ActiveTab::Loans => {
                let $ctl = &mut $app.loans;
                $body
            }
            $crate::app::ActiveTab::Readers => {
                let $ctl = &mut $app.readers;
                $body
            }
        }
    };
}

pub(crate) use with_controller;

/// Re-export the application event loop entry function.
pub use update::run_app as run;
