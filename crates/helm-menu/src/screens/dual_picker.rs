//! Two-column entity picker: teleport one entity to another.

use helm_types::input::TabDirection;

use super::{MenuState, NO_ENTITIES, Screen, ScreenContext, Transition, roster_rows};
use crate::frame::{Frame, Row};
use crate::layout::TELEPORT_SYNTAX;
use crate::nav;
use crate::stack::Lifecycle;

const HINT: &str = "8/2=Up/Down, 4/6=Switch Column, 5=Select, Backspace=Back";
const SAME_ENTITY: &str = "Invalid player selection!";

/// Which column has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Source,
    Destination,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Self::Source => Self::Destination,
            Self::Destination => Self::Source,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DualPicker {
    source: usize,
    destination: usize,
    focus: Side,
}

impl DualPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Side {
        self.focus
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.source, self.destination)
    }

    fn focused_index(&mut self) -> &mut usize {
        match self.focus {
            Side::Source => &mut self.source,
            Side::Destination => &mut self.destination,
        }
    }
}

impl Lifecycle for DualPicker {
    fn on_enter(&mut self) {
        *self = Self::default();
    }
}

impl Screen for DualPicker {
    fn state(&self) -> MenuState {
        MenuState::DualPicker
    }

    fn navigate_up(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = ctx.roster().len();
        let idx = self.focused_index();
        *idx = nav::wrap_prev(nav::clamp(*idx, len), len);
    }

    fn navigate_down(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = ctx.roster().len();
        let idx = self.focused_index();
        *idx = nav::wrap_next(nav::clamp(*idx, len), len);
    }

    fn switch_tab(&mut self, _direction: TabDirection, _ctx: &mut ScreenContext<'_>) -> Transition {
        self.focus = self.focus.other();
        Transition::Stay
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        let roster = ctx.roster();
        if roster.is_empty() {
            ctx.report(NO_ENTITIES);
            return Transition::Stay;
        }
        let len = roster.len();
        self.source = nav::clamp(self.source, len);
        self.destination = nav::clamp(self.destination, len);

        if self.focus == Side::Source {
            self.focus = Side::Destination;
            if self.destination == self.source {
                self.destination = nav::wrap_next(self.destination, len);
            }
            return Transition::Stay;
        }

        let (src, dst) = (&roster[self.source], &roster[self.destination]);
        if src.id == dst.id {
            ctx.report(SAME_ENTITY);
            return Transition::Stay;
        }
        ctx.dispatch(
            "Teleport Player to Player",
            TELEPORT_SYNTAX,
            vec![src.display_name.clone(), dst.display_name.clone()],
        );
        Transition::Pop
    }

    fn draw(&self, ctx: &ScreenContext<'_>) -> Frame {
        let roster = ctx.roster();
        let title = match self.focus {
            Side::Source => "Select Source Player",
            Side::Destination => "Select Destination Player",
        };
        let mut rows = vec![Row::new("From:")];
        rows.extend(roster_rows(
            &roster,
            self.source,
            self.focus == Side::Source,
            ctx.max_visible_rows,
        ));
        rows.push(Row::new("To:"));
        rows.extend(roster_rows(
            &roster,
            self.destination,
            self.focus == Side::Destination,
            ctx.max_visible_rows,
        ));
        Frame::new(title).with_rows(rows).with_hint(HINT)
    }
}
