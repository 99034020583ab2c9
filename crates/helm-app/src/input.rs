//! Line-based input: each stdin line becomes key presses, a text edit or a
//! console command.

use helm_types::input::{KeyBindings, NavEvent};

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Empty,
    Quit,
    Help,
    /// One or more bound key tokens, e.g. `6 2 2 5`.
    Keys(Vec<NavEvent>),
    /// `t <text>`: replace the focused field.
    Text(String),
    /// `/syntax args...`: run a command directly.
    Command(String),
    /// A token with no binding.
    Unknown(String),
}

pub fn parse_line(line: &str, keys: &KeyBindings) -> ConsoleLine {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleLine::Empty;
    }
    if line.starts_with('/') {
        return ConsoleLine::Command(line.to_string());
    }
    match line {
        "quit" | "q" => return ConsoleLine::Quit,
        "help" | "?" => return ConsoleLine::Help,
        "t" => return ConsoleLine::Text(String::new()),
        _ => {},
    }
    if let Some(text) = line.strip_prefix("t ") {
        return ConsoleLine::Text(text.trim().to_string());
    }

    let mut events = Vec::new();
    for token in line.split_whitespace() {
        match keys.lookup(token) {
            Some(event) => events.push(event),
            None => return ConsoleLine::Unknown(token.to_string()),
        }
    }
    ConsoleLine::Keys(events)
}

/// Usage text listing the active bindings.
pub fn help_text(keys: &KeyBindings) -> String {
    let events = [
        (NavEvent::ToggleVisibility, "open/close menu"),
        (NavEvent::NavigateUp, "up"),
        (NavEvent::NavigateDown, "down"),
        (NavEvent::PreviousCategory, "previous tab"),
        (NavEvent::NextCategory, "next tab / pick player"),
        (NavEvent::Select, "select / execute"),
        (NavEvent::Back, "back"),
    ];
    let mut out = String::from("Keys (several per line allowed):\n");
    for (event, what) in events {
        out.push_str(&format!("  {:<24} {what}\n", keys.keys_for(event).join(" ")));
    }
    out.push_str("  t <text>                 fill the focused field\n");
    out.push_str("  /<command> [args]        run a command directly\n");
    out.push_str("  help, quit\n");
    out
}
