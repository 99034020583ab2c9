//! Sequential multi-field parameter capture with validation on submit.

use helm_command::{ParamKind, Parameter};
use helm_types::entity::EntityProvider;
use helm_types::input::TextEdit;

/// Why a submit was rejected. Shown in the status line, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill all required parameters.")]
    MissingRequired,

    #[error("{0} must be a number!")]
    NotANumber(String),

    #[error("player '{0}' not found!")]
    UnknownEntity(String),
}

/// Values for a command's parameters plus the field being edited.
#[derive(Debug, Clone)]
pub struct ParameterCollector {
    params: Vec<Parameter>,
    values: Vec<String>,
    cursor: usize,
    /// In-progress text of the field under the cursor.
    input: String,
}

impl ParameterCollector {
    pub fn new(params: Vec<Parameter>) -> Self {
        let values = vec![String::new(); params.len()];
        Self {
            params,
            values,
            cursor: 0,
            input: String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// The parameter under the cursor.
    pub fn current(&self) -> Option<&Parameter> {
        self.params.get(self.cursor)
    }

    /// Text of the field under the cursor, including unsaved edits.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Value of field `index` as it would be submitted.
    pub fn value(&self, index: usize) -> Option<&str> {
        if index == self.cursor && index < self.values.len() {
            Some(&self.input)
        } else {
            self.values.get(index).map(String::as_str)
        }
    }

    fn save_input(&mut self) {
        if let Some(slot) = self.values.get_mut(self.cursor) {
            slot.clone_from(&self.input);
        }
    }

    fn move_to(&mut self, index: usize) {
        self.save_input();
        self.cursor = index;
        self.input = self.values.get(index).cloned().unwrap_or_default();
    }

    /// Move to the next field, keeping what was typed. Stops at the last.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.params.len() {
            self.move_to(self.cursor + 1);
        }
    }

    /// Move to the previous field, keeping what was typed. Stops at the first.
    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.move_to(self.cursor - 1);
        }
    }

    /// Apply a text edit to the field under the cursor.
    pub fn edit(&mut self, edit: &TextEdit) {
        if !self.params.is_empty() {
            edit.apply(&mut self.input);
        }
    }

    /// Overwrite field `index` (e.g. from a picker).
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.to_string();
            if index == self.cursor {
                self.input = value.to_string();
            }
        }
    }

    /// Validate and return the full ordered value list.
    ///
    /// Checks run in order: required fields, numeric fields, then entity
    /// names (only when `entities` is given). A rejected submit leaves every
    /// field as it was.
    pub fn submit(
        &mut self,
        entities: Option<&dyn EntityProvider>,
    ) -> Result<Vec<String>, ValidationError> {
        self.save_input();
        let fields = || self.params.iter().zip(&self.values);

        if fields().any(|(p, v)| !p.optional && v.trim().is_empty()) {
            return Err(ValidationError::MissingRequired);
        }

        if let Some((p, _)) = fields().find(|(p, v)| {
            p.kind() == ParamKind::Number
                && !v.trim().is_empty()
                && !v.trim().parse::<f64>().is_ok_and(f64::is_finite)
        }) {
            return Err(ValidationError::NotANumber(p.key.clone()));
        }

        if let Some(entities) = entities {
            if let Some((_, v)) = fields().find(|(p, v)| {
                p.kind() == ParamKind::Entity
                    && !v.trim().is_empty()
                    && entities.find_entity_by_name(v).is_none()
            }) {
                return Err(ValidationError::UnknownEntity(v.trim().to_string()));
            }
        }

        Ok(self.values.iter().map(|v| v.trim().to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use helm_types::entity::Entity;

    use super::*;

    struct Lobby;

    impl EntityProvider for Lobby {
        fn list_active_entities(&self) -> Vec<Entity> {
            vec![Entity {
                id: 1,
                display_name: "Bob".to_string(),
                is_alive: true,
                is_privileged_role: false,
            }]
        }
        fn local_is_privileged(&self) -> bool {
            false
        }
    }

    fn collector(keys: &[&str]) -> ParameterCollector {
        ParameterCollector::new(keys.iter().map(|k| Parameter::required(k)).collect())
    }

    fn type_text(c: &mut ParameterCollector, text: &str) {
        c.edit(&TextEdit::Replace(text.to_string()));
    }

    #[test]
    fn cursor_is_clamped() {
        let mut c = collector(&["player", "amount"]);
        c.retreat();
        assert_eq!(c.cursor(), 0);
        c.advance();
        c.advance();
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn moving_saves_input() {
        let mut c = collector(&["player", "amount"]);
        type_text(&mut c, "Bob");
        c.advance();
        assert_eq!(c.input(), "");
        type_text(&mut c, "5");
        c.retreat();
        assert_eq!(c.input(), "Bob");
        assert_eq!(c.value(1), Some("5"));
    }

    #[test]
    fn required_blank_rejected_and_progress_kept() {
        let mut c = collector(&["player", "amount"]);
        type_text(&mut c, "Bob");
        assert_eq!(c.submit(None), Err(ValidationError::MissingRequired));
        assert_eq!(
            ValidationError::MissingRequired.to_string(),
            "please fill all required parameters."
        );
        assert_eq!(c.value(0), Some("Bob"));
        assert_eq!(c.value(1), Some(""));
    }

    #[test]
    fn non_numeric_amount_rejected() {
        let mut c = collector(&["player", "amount"]);
        type_text(&mut c, "Bob");
        c.advance();
        type_text(&mut c, "oops");
        let err = c.submit(Some(&Lobby)).unwrap_err();
        assert_eq!(err.to_string(), "amount must be a number!");
        assert_eq!(c.value(0), Some("Bob"));
        assert_eq!(c.value(1), Some("oops"));
    }

    #[test]
    fn numeric_amount_accepted() {
        let mut c = collector(&["player", "amount"]);
        c.set_value(0, "Bob");
        c.advance();
        type_text(&mut c, "42");
        assert_eq!(c.submit(Some(&Lobby)).unwrap(), vec!["Bob", "42"]);
    }

    #[test]
    fn non_finite_amount_rejected() {
        for raw in ["inf", "-Infinity", "NaN", "1e400"] {
            let mut c = collector(&["player", "amount"]);
            type_text(&mut c, "Bob");
            c.advance();
            type_text(&mut c, raw);
            assert_eq!(
                c.submit(None),
                Err(ValidationError::NotANumber("amount".to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn optional_blank_is_kept_as_blank() {
        let mut c = ParameterCollector::new(vec![
            Parameter::required("player"),
            Parameter::optional("delay"),
        ]);
        type_text(&mut c, "Bob");
        assert_eq!(c.submit(None).unwrap(), vec!["Bob", ""]);
    }

    #[test]
    fn optional_numeric_still_checked_when_filled() {
        let mut c = ParameterCollector::new(vec![Parameter::optional("delay")]);
        type_text(&mut c, "soon");
        assert_eq!(
            c.submit(None),
            Err(ValidationError::NotANumber("delay".to_string()))
        );
    }

    #[test]
    fn unknown_entity_rejected_after_other_checks() {
        let mut c = collector(&["player", "amount"]);
        type_text(&mut c, "Carol");
        c.advance();
        type_text(&mut c, "x");
        // Numeric pass runs first.
        assert!(matches!(c.submit(Some(&Lobby)), Err(ValidationError::NotANumber(_))));
        type_text(&mut c, "3");
        assert_eq!(
            c.submit(Some(&Lobby)),
            Err(ValidationError::UnknownEntity("Carol".to_string()))
        );
        // Without a provider names are not checked.
        assert!(c.submit(None).is_ok());
    }

    #[test]
    fn set_value_on_cursor_updates_input() {
        let mut c = collector(&["player"]);
        c.set_value(0, "Bob");
        assert_eq!(c.input(), "Bob");
        c.set_value(7, "ignored");
        assert_eq!(c.len(), 1);
    }
}
