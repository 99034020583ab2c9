//! Plain-text rendering of menu frames.

use std::fmt::Write;

use helm_menu::Frame;

const DETAIL_COLUMN: usize = 28;

/// Render `frame` as lines of text, ending with a newline.
pub fn render(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", frame.title);

    if !frame.tabs.is_empty() {
        let tabs: Vec<String> = frame
            .tabs
            .iter()
            .map(|t| {
                if t.active {
                    format!("[{}]", t.label)
                } else {
                    format!(" {} ", t.label)
                }
            })
            .collect();
        let _ = writeln!(out, "{}", tabs.join(""));
    }

    for row in &frame.rows {
        let marker = if row.selected { '>' } else { ' ' };
        match (&row.detail, row.editing) {
            (Some(detail), true) => {
                let _ = writeln!(out, "{marker} {}: {detail}_", row.text);
            },
            (None, true) => {
                let _ = writeln!(out, "{marker} {}: _", row.text);
            },
            (Some(detail), false) => {
                let _ = writeln!(out, "{marker} {:<DETAIL_COLUMN$} {detail}", row.text);
            },
            (None, false) => {
                let _ = writeln!(out, "{marker} {}", row.text);
            },
        }
    }

    if let Some(status) = &frame.status {
        let _ = writeln!(out, "-- {status}");
    }
    if let Some(hint) = &frame.hint {
        let _ = writeln!(out, "({hint})");
    }
    out
}
