//! Teleport submenu: to a location, to an entity, or entity to entity.

use super::{
    CoordinateInput, DualPicker, EntityPicker, MenuState, PickAction, Screen, ScreenContext,
    Transition,
};
use crate::frame::{Frame, HINT_LIST, Row};
use crate::layout::TELEPORT_SYNTAX;
use crate::nav;
use crate::stack::Lifecycle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeleportOption {
    Location,
    ToEntity,
    EntityToEntity,
}

impl TeleportOption {
    const ALL: [TeleportOption; 3] = [Self::Location, Self::ToEntity, Self::EntityToEntity];

    fn title(self) -> &'static str {
        match self {
            Self::Location => "Teleport to Location",
            Self::ToEntity => "Teleport to Player",
            Self::EntityToEntity => "Teleport Player to Player",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Location => "Enter X/Y/Z coordinates to teleport to a specific position",
            Self::ToEntity => "Teleport to a selected player's current location",
            Self::EntityToEntity => "Teleport one player to another player's location",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeleportOptions {
    selected: usize,
}

impl TeleportOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Lifecycle for TeleportOptions {}

impl Screen for TeleportOptions {
    fn state(&self) -> MenuState {
        MenuState::TeleportOptions
    }

    fn navigate_up(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.selected = nav::wrap_prev(self.selected, TeleportOption::ALL.len());
    }

    fn navigate_down(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.selected = nav::wrap_next(self.selected, TeleportOption::ALL.len());
    }

    fn execute_selected(&mut self, _ctx: &mut ScreenContext<'_>) -> Transition {
        let option = TeleportOption::ALL[nav::clamp(self.selected, TeleportOption::ALL.len())];
        match option {
            TeleportOption::Location => Transition::Push(Box::new(CoordinateInput::new())),
            TeleportOption::ToEntity => {
                Transition::Push(Box::new(EntityPicker::new(PickAction::Dispatch {
                    label: option.title().to_string(),
                    syntax: TELEPORT_SYNTAX.to_string(),
                })))
            },
            TeleportOption::EntityToEntity => Transition::Push(Box::new(DualPicker::new())),
        }
    }

    fn draw(&self, _ctx: &ScreenContext<'_>) -> Frame {
        let rows = TeleportOption::ALL
            .iter()
            .enumerate()
            .map(|(i, opt)| {
                Row::new(opt.title())
                    .with_detail(opt.description())
                    .selected(i == self.selected)
            })
            .collect();
        Frame::new("Teleportation Options")
            .with_rows(rows)
            .with_hint(HINT_LIST)
    }
}
