//! User configuration: keybindings and tab-strip layout.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/htabs/config.toml` (default `~/.config/htabs/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use htabs::core::layout::{IndentConfig, Orientation};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectPrev,
    SelectNext,
    NewTab,
    NewSibling,
    NewChild,
    CloseTab,
    ToggleCollapse,
    ToggleOrientation,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::SelectPrev,
        Action::SelectNext,
        Action::NewTab,
        Action::NewSibling,
        Action::NewChild,
        Action::CloseTab,
        Action::ToggleCollapse,
        Action::ToggleOrientation,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::NewTab => "new_tab",
            Action::NewSibling => "new_sibling",
            Action::NewChild => "new_child",
            Action::CloseTab => "close_tab",
            Action::ToggleCollapse => "toggle_collapse",
            Action::ToggleOrientation => "toggle_orientation",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT take part in matching.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short label for the status bar (e.g. `"↑"`, `"Ctrl+w"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, label) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(label);
            }
        }
        let key = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Delete, _) => "Delete".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+w"`, `"Alt+Up"`, `"n"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.pop()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and tab-strip layout.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Columns each nesting level shifts the tab highlight.
    pub tab_indent: u16,
    /// Columns each nesting level shifts the tab title.
    pub header_indent: u16,
    /// Width of the sidebar in stacked orientation.
    pub tab_bar_width: u16,
    pub orientation: Orientation,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            tab_indent: 2,
            header_indent: 2,
            tab_bar_width: 36,
            orientation: Orientation::Stacked,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(SelectPrev, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(SelectNext, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(NewTab, vec![KeyBind::new(Char('t'), n)]);
        m.insert(NewSibling, vec![KeyBind::new(Char('s'), n)]);
        m.insert(NewChild, vec![KeyBind::new(Char('c'), n)]);
        m.insert(CloseTab, vec![KeyBind::new(Char('x'), n), KeyBind::new(Delete, n)]);
        m.insert(ToggleCollapse, vec![KeyBind::new(Char(' '), n), KeyBind::new(Enter, n)]);
        m.insert(ToggleOrientation, vec![KeyBind::new(Char('o'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    pub fn indent(&self) -> IndentConfig {
        IndentConfig {
            tab_indent: self.tab_indent,
            header_indent: self.header_indent,
        }
    }

    /// Find the action bound to a key event.  When several match, the one
    /// with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: tab | {}: sibling | {}: child | {}: close | {}: collapse | {}: placement",
            self.short_binding(Action::NewTab),
            self.short_binding(Action::NewSibling),
            self.short_binding(Action::NewChild),
            self.short_binding(Action::CloseTab),
            self.short_binding(Action::ToggleCollapse),
            self.short_binding(Action::ToggleOrientation),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        match std::fs::read_to_string(config_path()) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "tab_indent" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.tab_indent = v.min(16);
                    }
                    continue;
                }
                "header_indent" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.header_indent = v.min(16);
                    }
                    continue;
                }
                "tab_bar_width" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.tab_bar_width = v.clamp(12, 120);
                    }
                    continue;
                }
                "orientation" => {
                    if let Ok(o) = value.parse() {
                        config.orientation = o;
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!(key, "ignoring unknown config key");
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# htabs configuration".to_string(),
            String::new(),
            "# Layout".to_string(),
            format!("tab_indent = {}", self.tab_indent),
            format!("header_indent = {}", self.header_indent),
            format!("tab_bar_width = {}", self.tab_bar_width),
            format!("orientation = {}", self.orientation),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.render(false)).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/htabs/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("htabs").join("config.toml")
}
