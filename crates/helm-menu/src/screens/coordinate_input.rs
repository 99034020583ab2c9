//! X/Y/Z entry for teleporting to a location.

use helm_types::input::TextEdit;

use super::{MenuState, Screen, ScreenContext, Transition};
use crate::frame::{Frame, HINT_FIELDS, Row};
use crate::layout::TELEPORT_SYNTAX;
use crate::nav;
use crate::stack::Lifecycle;

const AXES: [&str; 3] = ["X Coordinate", "Y Coordinate", "Z Coordinate"];
const INVALID: &str = "Invalid coordinates! Please enter valid numbers for X, Y, and Z.";

#[derive(Debug, Clone, Default)]
pub struct CoordinateInput {
    fields: [String; 3],
    focused: usize,
}

impl CoordinateInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    fn parsed(&self) -> Option<[f64; 3]> {
        let mut out = [0.0; 3];
        for (slot, field) in out.iter_mut().zip(&self.fields) {
            *slot = field.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        }
        Some(out)
    }
}

impl Lifecycle for CoordinateInput {}

impl Screen for CoordinateInput {
    fn state(&self) -> MenuState {
        MenuState::CoordinateInput
    }

    fn navigate_up(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.focused = nav::wrap_prev(self.focused, AXES.len());
    }

    fn navigate_down(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.focused = nav::wrap_next(self.focused, AXES.len());
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        if self.parsed().is_none() {
            ctx.report(INVALID);
            return Transition::Stay;
        }
        let args = self.fields.iter().map(|f| f.trim().to_string()).collect();
        ctx.dispatch("Teleport to Location", TELEPORT_SYNTAX, args);
        Transition::Pop
    }

    fn edit_text(&mut self, edit: &TextEdit) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            edit.apply(field);
        }
    }

    fn draw(&self, _ctx: &ScreenContext<'_>) -> Frame {
        let rows = AXES
            .iter()
            .zip(&self.fields)
            .enumerate()
            .map(|(i, (axis, value))| {
                Row::new(*axis)
                    .with_detail(value.clone())
                    .selected(i == self.focused)
                    .editing(i == self.focused)
            })
            .collect();
        Frame::new("Teleport to Coordinates")
            .with_rows(rows)
            .with_hint(HINT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use helm_command::StatusChannel;

    use super::*;
    use crate::screens::testing::{Lobby, registry};

    fn type_text(input: &mut CoordinateInput, text: &str) {
        input.edit_text(&TextEdit::Replace(text.to_string()));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let reg = registry();
        let lobby = Lobby::new(&[], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut input = CoordinateInput::new();
        input.navigate_up(&mut ctx);
        assert_eq!(input.focused(), 2);
        input.navigate_down(&mut ctx);
        assert_eq!(input.focused(), 0);
    }

    #[test]
    fn rejects_non_numeric() {
        let reg = registry();
        let lobby = Lobby::new(&[], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut input = CoordinateInput::new();
        type_text(&mut input, "1");
        input.navigate_down(&mut ctx);
        type_text(&mut input, "north");
        assert!(matches!(input.execute_selected(&mut ctx), Transition::Stay));
        assert_eq!(status.read().as_deref(), Some(INVALID));
        assert!(ctx.take_requests().is_empty());
    }

    #[test]
    fn rejects_non_finite() {
        let reg = registry();
        let lobby = Lobby::new(&[], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut input = CoordinateInput::new();
        for value in ["1", "inf", "2"] {
            type_text(&mut input, value);
            input.navigate_down(&mut ctx);
        }
        assert!(matches!(input.execute_selected(&mut ctx), Transition::Stay));
        assert_eq!(status.read().as_deref(), Some(INVALID));
        assert!(ctx.take_requests().is_empty());
    }

    #[test]
    fn dispatches_tp_with_xyz() {
        let reg = registry();
        let lobby = Lobby::new(&[], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut input = CoordinateInput::new();
        for value in ["10", " -4.5", "0"] {
            type_text(&mut input, value);
            input.navigate_down(&mut ctx);
        }
        assert!(matches!(input.execute_selected(&mut ctx), Transition::Pop));
        let reqs = ctx.take_requests();
        assert_eq!(reqs[0].syntax, "tp");
        assert_eq!(reqs[0].args, vec!["10", "-4.5", "0"]);
    }
}
