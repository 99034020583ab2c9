//! Discrete navigation events and key bindings.
//!
//! Front ends map their native input to these types. The menu core never
//! sees raw key codes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A discrete navigation event driving the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavEvent {
    NavigateUp,
    NavigateDown,
    Select,
    PreviousCategory,
    NextCategory,
    Back,
    /// Show or hide the whole menu.
    ToggleVisibility,
}

/// Which way a tab switch goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Previous,
    Next,
}

impl NavEvent {
    /// The tab direction for `PreviousCategory` / `NextCategory`.
    pub fn tab_direction(self) -> Option<TabDirection> {
        match self {
            Self::PreviousCategory => Some(TabDirection::Previous),
            Self::NextCategory => Some(TabDirection::Next),
            _ => None,
        }
    }
}

/// A raw edit forwarded into the focused text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Character typed.
    Insert(char),
    /// Delete-left.
    Backspace,
    /// Replace the whole field (paste, or a line-based front end).
    Replace(String),
}

impl TextEdit {
    /// Apply the edit to a field buffer.
    pub fn apply(&self, buffer: &mut String) {
        match self {
            Self::Insert(ch) => buffer.push(*ch),
            Self::Backspace => {
                buffer.pop();
            },
            Self::Replace(text) => {
                buffer.clear();
                buffer.push_str(text);
            },
        }
    }
}

/// Key token → navigation event table.
///
/// Tokens are matched case-insensitively. The defaults mirror a numpad
/// layout (8/2 up/down, 4/6 tabs, 5 select) with WASD and word aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    bindings: HashMap<String, NavEvent>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let table: &[(&str, NavEvent)] = &[
            ("8", NavEvent::NavigateUp),
            ("w", NavEvent::NavigateUp),
            ("up", NavEvent::NavigateUp),
            ("2", NavEvent::NavigateDown),
            ("s", NavEvent::NavigateDown),
            ("down", NavEvent::NavigateDown),
            ("5", NavEvent::Select),
            ("e", NavEvent::Select),
            ("enter", NavEvent::Select),
            ("4", NavEvent::PreviousCategory),
            ("a", NavEvent::PreviousCategory),
            ("prev", NavEvent::PreviousCategory),
            ("6", NavEvent::NextCategory),
            ("d", NavEvent::NextCategory),
            ("next", NavEvent::NextCategory),
            ("b", NavEvent::Back),
            ("back", NavEvent::Back),
            ("backspace", NavEvent::Back),
            ("m", NavEvent::ToggleVisibility),
            ("menu", NavEvent::ToggleVisibility),
        ];
        Self {
            bindings: table
                .iter()
                .map(|(k, ev)| ((*k).to_string(), *ev))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Look up the event bound to a key token.
    pub fn lookup(&self, token: &str) -> Option<NavEvent> {
        self.bindings
            .get(&token.trim().to_ascii_lowercase())
            .copied()
    }

    /// Bind (or rebind) a key token.
    pub fn bind(&mut self, token: &str, event: NavEvent) {
        self.bindings.insert(token.trim().to_ascii_lowercase(), event);
    }

    /// Merge user overrides on top of these bindings.
    pub fn merged(mut self, overrides: &KeyBindings) -> Self {
        for (k, ev) in &overrides.bindings {
            self.bind(k, *ev);
        }
        self
    }

    /// All tokens bound to `event`, sorted.
    pub fn keys_for(&self, event: NavEvent) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, ev)| **ev == event)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_numpad_layout() {
        let keys = KeyBindings::default();
        assert_eq!(keys.lookup("8"), Some(NavEvent::NavigateUp));
        assert_eq!(keys.lookup("2"), Some(NavEvent::NavigateDown));
        assert_eq!(keys.lookup("5"), Some(NavEvent::Select));
        assert_eq!(keys.lookup("4"), Some(NavEvent::PreviousCategory));
        assert_eq!(keys.lookup("6"), Some(NavEvent::NextCategory));
        assert_eq!(keys.lookup("backspace"), Some(NavEvent::Back));
        assert_eq!(keys.lookup("m"), Some(NavEvent::ToggleVisibility));
    }

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        let keys = KeyBindings::default();
        assert_eq!(keys.lookup("  ENTER "), Some(NavEvent::Select));
        assert_eq!(keys.lookup("nope"), None);
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut overrides = KeyBindings {
            bindings: HashMap::new(),
        };
        overrides.bind("k", NavEvent::NavigateUp);
        overrides.bind("w", NavEvent::Back);
        let keys = KeyBindings::default().merged(&overrides);
        assert_eq!(keys.lookup("k"), Some(NavEvent::NavigateUp));
        assert_eq!(keys.lookup("w"), Some(NavEvent::Back));
        assert_eq!(keys.lookup("8"), Some(NavEvent::NavigateUp));
    }

    #[test]
    fn keys_for_is_sorted() {
        let keys = KeyBindings::default();
        assert_eq!(keys.keys_for(NavEvent::Select), vec!["5", "e", "enter"]);
    }

    #[test]
    fn tab_direction_only_for_tab_events() {
        assert_eq!(
            NavEvent::PreviousCategory.tab_direction(),
            Some(TabDirection::Previous)
        );
        assert_eq!(
            NavEvent::NextCategory.tab_direction(),
            Some(TabDirection::Next)
        );
        assert_eq!(NavEvent::Select.tab_direction(), None);
    }

    #[test]
    fn text_edit_apply() {
        let mut buf = String::from("Bo");
        TextEdit::Insert('b').apply(&mut buf);
        assert_eq!(buf, "Bob");
        TextEdit::Backspace.apply(&mut buf);
        assert_eq!(buf, "Bo");
        TextEdit::Replace("Alice".into()).apply(&mut buf);
        assert_eq!(buf, "Alice");
        let mut empty = String::new();
        TextEdit::Backspace.apply(&mut empty);
        assert!(empty.is_empty());
    }
}
