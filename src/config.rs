//! User configuration: keybindings, animator and page settings, persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scrollframe/config.toml` (default
//! `~/.config/scrollframe/config.toml`).  `SCROLLFRAME_BASE_PATH` overrides
//! the configured base path.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::surface::Rgb;

/// Environment variable that overrides `base_path`.
pub const BASE_PATH_ENV: &str = "SCROLLFRAME_BASE_PATH";

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    SliderPrev,
    SliderNext,
    FaqNext,
    FaqPrev,
    FaqToggle,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::Top,
        Action::Bottom,
        Action::SliderPrev,
        Action::SliderNext,
        Action::FaqNext,
        Action::FaqPrev,
        Action::FaqToggle,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::SliderPrev => "slider_prev",
            Action::SliderNext => "slider_next",
            Action::FaqNext => "faq_next",
            Action::FaqPrev => "faq_prev",
            Action::FaqToggle => "faq_toggle",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => key_name(self.code),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Length of the hero image sequence.
    pub total_frames: usize,
    /// Frames loaded (in order) before the background tier starts.
    pub priority_frames: usize,
    /// Fill behind letterboxed frames.
    pub frame_bg: Rgb,
    /// Deployment prefix for every asset locator.
    pub base_path: String,
    /// Directory the static export lives in.
    pub asset_root: PathBuf,
    pub reduced_motion: bool,
    /// Document pixels per terminal row (scroll resolution).
    pub px_per_row: f64,
    pub device_pixel_ratio: f64,
    /// Animation clock period.
    pub frame_interval_ms: u64,
    /// Pause between background loads; 0 just yields.
    pub idle_pause_ms: u64,
    /// Frames are downscaled to fit this box on load.
    pub thumbnail_max: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            total_frames: 120,
            priority_frames: 10,
            frame_bg: Rgb(0xf5, 0xf5, 0xf5),
            base_path: String::new(),
            asset_root: PathBuf::from("public"),
            reduced_motion: false,
            px_per_row: 16.0,
            device_pixel_ratio: 1.0,
            frame_interval_ms: 16,
            idle_pause_ms: 0,
            thumbnail_max: 640,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Bottom, vec![KeyBind::new(End, n)]);
        m.insert(Action::SliderPrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Action::SliderNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::FaqNext, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(Action::FaqPrev, vec![KeyBind::new(Char('p'), n)]);
        m.insert(Action::FaqToggle, vec![KeyBind::new(Enter, n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: slider | {}: faq | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::SliderPrev),
            self.short_binding(Action::SliderNext),
            self.short_binding(Action::FaqToggle),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults, then apply the
    /// environment override.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        };
        config.apply_env(std::env::var(BASE_PATH_ENV).ok());
        config
    }

    /// Apply the value of `SCROLLFRAME_BASE_PATH`, if set.
    fn apply_env(&mut self, base_path: Option<String>) {
        if let Some(base) = base_path {
            self.base_path = normalise_base_path(&base);
        }
    }

    /// Persist current config to disk, returning where it went.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
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

            // Numeric settings are bounded for predictable behaviour; bad
            // values keep the default.
            match key {
                "total_frames" => {
                    if let Ok(v) = value.parse::<usize>() {
                        // Locators pad to three digits.
                        config.total_frames = v.clamp(1, 999);
                    }
                    continue;
                }
                "priority_frames" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.priority_frames = v;
                    }
                    continue;
                }
                "frame_bg" => {
                    if let Some(c) = Rgb::parse_hex(value) {
                        config.frame_bg = c;
                    }
                    continue;
                }
                "base_path" => {
                    config.base_path = normalise_base_path(value);
                    continue;
                }
                "asset_root" => {
                    if !value.is_empty() {
                        config.asset_root = PathBuf::from(value);
                    }
                    continue;
                }
                "reduced_motion" => {
                    config.reduced_motion = value == "true";
                    continue;
                }
                "px_per_row" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.px_per_row = v.clamp(1.0, 64.0);
                        }
                    }
                    continue;
                }
                "device_pixel_ratio" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.device_pixel_ratio = v.clamp(0.5, 4.0);
                        }
                    }
                    continue;
                }
                "frame_interval_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.frame_interval_ms = v.clamp(4, 100);
                    }
                    continue;
                }
                "idle_pause_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.idle_pause_ms = v.min(1000);
                    }
                    continue;
                }
                "thumbnail_max" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.thumbnail_max = v.clamp(16, 4096);
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
            "# scrollframe configuration".to_string(),
            String::new(),
            "# Hero sequence".to_string(),
            format!("total_frames = {}", self.total_frames),
            format!("priority_frames = {}", self.priority_frames),
            format!("frame_bg = \"{}\"", self.frame_bg.to_hex()),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("thumbnail_max = {}", self.thumbnail_max),
            format!("idle_pause_ms = {}", self.idle_pause_ms),
            String::new(),
            "# Assets".to_string(),
            format!("base_path = \"{}\"", self.base_path),
            format!("asset_root = \"{}\"", self.asset_root.display()),
            String::new(),
            "# Display".to_string(),
            format!("px_per_row = {}", self.px_per_row),
            format!("device_pixel_ratio = {}", self.device_pixel_ratio),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scrollframe/config.toml`).
/// Asset paths are joined as `{base}/...`, so a trailing slash is dropped.
pub fn normalise_base_path(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scrollframe").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut ev = KeyEvent::new(code, modifiers);
        ev.kind = KeyEventKind::Press;
        ev
    }

    #[test]
    fn defaults_match_the_stock_sequence() {
        let c = AppConfig::default();
        assert_eq!(c.total_frames, 120);
        assert_eq!(c.priority_frames, 10);
        assert_eq!(c.frame_bg, Rgb(0xf5, 0xf5, 0xf5));
        assert!(c.base_path.is_empty());
    }

    #[test]
    fn settings_parse_and_clamp() {
        let c = AppConfig::parse(
            "# comment\n\
             total_frames = 180\n\
             priority_frames = 12\n\
             frame_bg = \"#101010\"\n\
             base_path = \"/Click-X/\"\n\
             reduced_motion = true\n\
             px_per_row = 500\n\
             device_pixel_ratio = nope\n\
             frame_interval_ms = 1\n",
        );
        assert_eq!(c.total_frames, 180);
        assert_eq!(c.priority_frames, 12);
        assert_eq!(c.frame_bg, Rgb(0x10, 0x10, 0x10));
        assert_eq!(c.base_path, "/Click-X");
        assert!(c.reduced_motion);
        assert_eq!(c.px_per_row, 64.0);
        assert_eq!(c.device_pixel_ratio, 1.0);
        assert_eq!(c.frame_interval_ms, 4);
    }

    #[test]
    fn frame_count_stays_within_three_digits() {
        assert_eq!(AppConfig::parse("total_frames = 5000").total_frames, 999);
        assert_eq!(AppConfig::parse("total_frames = 0").total_frames, 1);
    }

    #[test]
    fn bindings_round_trip_through_the_file_format() {
        let mut c = AppConfig::default();
        c.bindings.insert(
            Action::Quit,
            vec![KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL)],
        );
        c.total_frames = 180;
        let back = AppConfig::parse(&c.serialise());
        assert_eq!(back.bindings, c.bindings);
        assert_eq!(back.total_frames, 180);
        assert_eq!(back.frame_bg, c.frame_bg);
        assert_eq!(back.asset_root, c.asset_root);
    }

    #[test]
    fn match_key_resolves_default_bindings() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(c.match_key(key(KeyCode::Right, KeyModifiers::NONE)), Some(Action::SliderNext));
        assert_eq!(c.match_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::FaqToggle));
        assert_eq!(c.match_key(key(KeyCode::Char('j'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn page_keys_bind_to_page_actions() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::PageDown, KeyModifiers::NONE)), Some(Action::PageDown));
        assert_eq!(c.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::PageDown));
        assert_eq!(c.match_key(key(KeyCode::PageUp, KeyModifiers::NONE)), Some(Action::PageUp));
        assert_eq!(c.match_key(key(KeyCode::Char('b'), KeyModifiers::NONE)), Some(Action::PageUp));
    }

    #[test]
    fn env_base_path_drops_trailing_slashes() {
        let mut c = AppConfig::parse("base_path = /from-file");
        c.apply_env(Some("/Click-X/".to_string()));
        assert_eq!(c.base_path, "/Click-X");
        c.apply_env(None);
        assert_eq!(c.base_path, "/Click-X");
        assert_eq!(normalise_base_path("//"), "");
    }

    #[test]
    fn unparseable_bindings_keep_defaults() {
        let c = AppConfig::parse("scroll_down = Hyper+x\nmystery = 3");
        assert_eq!(c.bindings, AppConfig::default_bindings());
    }

    #[test]
    fn status_hint_uses_first_bindings() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("↓/↑: scroll"));
        assert!(hint.contains("Enter: faq"));
    }
}
