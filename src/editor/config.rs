use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::group::GroupPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub groups: GroupPolicy,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub quit: String,
    pub next_element: String,
    pub prev_element: String,
    /// Mark or unmark the selected element for the next group.
    pub mark: String,
    pub group_marked: String,
    pub ungroup: String,
    pub toggle_fixed: String,
    pub cycle_style: String,
    pub cancel: String,
    #[serde(default = "default_nudge_left")]
    pub nudge_left: String,
    #[serde(default = "default_nudge_right")]
    pub nudge_right: String,
    #[serde(default = "default_nudge_up")]
    pub nudge_up: String,
    #[serde(default = "default_nudge_down")]
    pub nudge_down: String,
}

fn default_nudge_left() -> String { "Left".into() }
fn default_nudge_right() -> String { "Right".into() }
fn default_nudge_up() -> String { "Up".into() }
fn default_nudge_down() -> String { "Down".into() }

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            quit: "q".into(),
            next_element: "Tab".into(),
            prev_element: "BackTab".into(),
            mark: "Space".into(),
            group_marked: "g".into(),
            ungroup: "u".into(),
            toggle_fixed: "f".into(),
            cycle_style: "c".into(),
            cancel: "Esc".into(),
            nudge_left: default_nudge_left(),
            nudge_right: default_nudge_right(),
            nudge_up: default_nudge_up(),
            nudge_down: default_nudge_down(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("invalid config {} ({e}), using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> std::path::PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = std::path::PathBuf::from(home);
        path.push(".config");
        path.push("point-groups");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        if !event.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        return matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return matches_key(rest, event.code);
    }

    // Plain bindings never fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "BackTab" => code == KeyCode::BackTab,
        "Backspace" => code == KeyCode::Backspace,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_binding_rejects_modifiers() {
        assert!(matches_binding("g", &key(KeyCode::Char('g'), KeyModifiers::NONE)));
        assert!(!matches_binding("g", &key(KeyCode::Char('g'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_prefixed_and_named_bindings() {
        assert!(matches_binding("Ctrl-u", &key(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(matches_binding("Alt-Enter", &key(KeyCode::Enter, KeyModifiers::ALT)));
        assert!(matches_binding("Space", &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(matches_binding("F5", &key(KeyCode::F(5), KeyModifiers::NONE)));
        assert!(!matches_binding("gg", &key(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"groups": {"purge_empty_on_ungroup": true, "property_failure": "collect"}}"#,
        )
        .unwrap();
        assert!(config.groups.purge_empty_on_ungroup);
        assert_eq!(config.groups.property_failure, crate::group::FailurePolicy::Collect);
        assert_eq!(config.key_bindings.quit, "q");
    }
}
