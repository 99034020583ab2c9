//! Backend-neutral description of one drawn menu frame.
//!
//! Screens produce a [`Frame`]; the front end turns it into pixels or text.

use crate::nav;

/// One category tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    pub active: bool,
}

/// One line of the menu body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    /// Secondary text (a field value, a description).
    pub detail: Option<String>,
    pub selected: bool,
    /// The row is a text field that currently receives edits.
    pub editing: bool,
}

impl Row {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }
}

/// Everything needed to draw the menu once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub tabs: Vec<Tab>,
    pub rows: Vec<Row>,
    /// Key help line.
    pub hint: Option<String>,
    /// Status line text, filled in by the controller.
    pub status: Option<String>,
}

impl Frame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// The row flagged as selected, if any.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.selected)
    }

    /// Plain texts of all rows.
    pub fn row_texts(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Build rows for a selectable list, windowed around `selected`.
pub fn list_rows(labels: &[String], selected: usize, max_visible: usize) -> Vec<Row> {
    nav::visible_window(labels.len(), selected, max_visible)
        .map(|i| Row::new(labels[i].clone()).selected(i == selected))
        .collect()
}

pub(crate) const HINT_LIST: &str = "8/2=Up/Down, 5=Select, Backspace=Back";
pub(crate) const HINT_FIELDS: &str = "8/2=Navigate Fields, 5=Execute, Backspace=Cancel";
