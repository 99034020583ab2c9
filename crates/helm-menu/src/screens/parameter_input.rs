//! Field-by-field argument entry for one command.

use helm_command::{Command, ParamKind};
use helm_types::input::{TabDirection, TextEdit};

use super::{
    EntityPicker, MenuState, PickAction, Screen, ScreenContext, ScreenReply, Transition,
};
use crate::frame::{Frame, HINT_FIELDS, Row};
use crate::params::ParameterCollector;
use crate::stack::Lifecycle;

/// The pending command: descriptor, collected values and cursor.
#[derive(Debug, Clone)]
pub struct ParameterInput {
    command: Command,
    collector: ParameterCollector,
}

impl ParameterInput {
    pub fn new(command: Command) -> Self {
        let collector = ParameterCollector::new(command.parameters.clone());
        Self { command, collector }
    }

    /// Fill field `index` and, if it was the focused one, move past it.
    pub fn prefilled(mut self, index: usize, value: &str) -> Self {
        self.collector.set_value(index, value);
        if index == self.collector.cursor() {
            self.collector.advance();
        }
        self
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn collector(&self) -> &ParameterCollector {
        &self.collector
    }

    fn focused_kind(&self) -> Option<ParamKind> {
        self.collector.current().map(|p| p.kind())
    }
}

impl Lifecycle for ParameterInput {}

impl Screen for ParameterInput {
    fn state(&self) -> MenuState {
        MenuState::ParameterInput
    }

    fn navigate_up(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.collector.retreat();
    }

    fn navigate_down(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.collector.advance();
    }

    /// Next-tab on an entity field opens a picker for it.
    fn switch_tab(&mut self, direction: TabDirection, _ctx: &mut ScreenContext<'_>) -> Transition {
        if direction == TabDirection::Next && self.focused_kind() == Some(ParamKind::Entity) {
            let field = self.collector.cursor();
            return Transition::Push(Box::new(EntityPicker::new(PickAction::Reply { field })));
        }
        Transition::Stay
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        match self.collector.submit(Some(ctx.entities)) {
            Ok(values) => {
                ctx.dispatch(self.command.name.clone(), &self.command.syntax, values);
                Transition::Pop
            },
            Err(e) => {
                log::debug!("Parameters for `{}` rejected: {e}", self.command.syntax);
                ctx.report(e.to_string());
                Transition::Stay
            },
        }
    }

    fn edit_text(&mut self, edit: &TextEdit) {
        self.collector.edit(edit);
    }

    fn draw(&self, _ctx: &ScreenContext<'_>) -> Frame {
        let cursor = self.collector.cursor();
        let rows = self
            .collector
            .params()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let value = self.collector.value(i).unwrap_or_default();
                let shown = if value.trim().is_empty() && i != cursor {
                    "(empty)"
                } else {
                    value
                };
                Row::new(format!("{}. {}", i + 1, p.description))
                    .with_detail(shown)
                    .selected(i == cursor)
                    .editing(i == cursor)
            })
            .collect();
        let hint = if self.focused_kind() == Some(ParamKind::Entity) {
            format!("{HINT_FIELDS}, 6=Pick player")
        } else {
            HINT_FIELDS.to_string()
        };
        Frame::new(format!("Enter Parameters: {}", self.command.name))
            .with_rows(rows)
            .with_hint(hint)
    }

    fn on_reply(&mut self, reply: ScreenReply) {
        match reply {
            ScreenReply::Picked { field, name } => self.collector.set_value(field, &name),
        }
    }
}
