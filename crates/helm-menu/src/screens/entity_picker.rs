//! Pick one live entity, then act on it.

use super::{
    EntityCommands, MenuState, NO_ENTITIES, Screen, ScreenContext, ScreenReply, Transition,
    roster_rows,
};
use crate::frame::{Frame, HINT_LIST};
use crate::nav;
use crate::stack::Lifecycle;

/// What happens when an entity is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickAction {
    /// Open the command list for the entity.
    OpenCommands,
    /// Pop and hand the name back to the parameter field `field`.
    Reply { field: usize },
    /// Run `syntax <name>` and pop.
    Dispatch { label: String, syntax: String },
}

#[derive(Debug, Clone)]
pub struct EntityPicker {
    action: PickAction,
    selected: usize,
}

impl EntityPicker {
    pub fn new(action: PickAction) -> Self {
        Self {
            action,
            selected: 0,
        }
    }

    /// Start with `index` highlighted.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn title(&self) -> &str {
        match &self.action {
            PickAction::OpenCommands => "Players in Lobby",
            PickAction::Reply { .. } => "Select Player",
            PickAction::Dispatch { label, .. } => label.as_str(),
        }
    }
}

impl Lifecycle for EntityPicker {}

impl Screen for EntityPicker {
    fn state(&self) -> MenuState {
        MenuState::EntityPicker
    }

    fn navigate_up(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = ctx.roster().len();
        self.selected = nav::wrap_prev(nav::clamp(self.selected, len), len);
    }

    fn navigate_down(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = ctx.roster().len();
        self.selected = nav::wrap_next(nav::clamp(self.selected, len), len);
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        let roster = ctx.roster();
        if roster.is_empty() {
            ctx.report(NO_ENTITIES);
            return Transition::Stay;
        }
        self.selected = nav::clamp(self.selected, roster.len());
        let name = roster[self.selected].display_name.clone();
        match &self.action {
            PickAction::OpenCommands => Transition::Push(Box::new(EntityCommands::new(name))),
            PickAction::Reply { field } => Transition::PopWith(ScreenReply::Picked {
                field: *field,
                name,
            }),
            PickAction::Dispatch { label, syntax } => {
                ctx.dispatch(label.clone(), syntax, vec![name]);
                Transition::Pop
            },
        }
    }

    fn draw(&self, ctx: &ScreenContext<'_>) -> Frame {
        let roster = ctx.roster();
        let mut frame = Frame::new(self.title()).with_hint(HINT_LIST);
        frame.rows = roster_rows(&roster, self.selected, true, ctx.max_visible_rows);
        frame
    }
}

#[cfg(test)]
mod tests {
    use helm_command::StatusChannel;

    use super::*;
    use crate::screens::testing::{Lobby, registry};

    #[test]
    fn wraps_over_roster() {
        let reg = registry();
        let lobby = Lobby::new(&["Alice", "Bob", "Carol"], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::OpenCommands);
        picker.navigate_up(&mut ctx);
        assert_eq!(picker.selected(), 2);
        picker.navigate_down(&mut ctx);
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn open_commands_pushes_list() {
        let reg = registry();
        let lobby = Lobby::new(&["Alice", "Bob"], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::OpenCommands).starting_at(1);
        match picker.execute_selected(&mut ctx) {
            Transition::Push(s) => assert_eq!(s.state(), MenuState::EntityCommandSelection),
            _ => panic!("expected command list"),
        }
    }

    #[test]
    fn reply_pops_with_name() {
        let reg = registry();
        let lobby = Lobby::new(&["Alice", "Bob"], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::Reply { field: 2 });
        picker.navigate_down(&mut ctx);
        match picker.execute_selected(&mut ctx) {
            Transition::PopWith(reply) => assert_eq!(
                reply,
                ScreenReply::Picked {
                    field: 2,
                    name: "Bob".to_string()
                }
            ),
            _ => panic!("expected reply"),
        }
    }

    #[test]
    fn dispatch_runs_and_pops() {
        let reg = registry();
        let lobby = Lobby::new(&["Alice", "Bob"], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::Dispatch {
            label: "Teleport to Player".to_string(),
            syntax: "tp".to_string(),
        })
        .starting_at(1);
        assert!(matches!(picker.execute_selected(&mut ctx), Transition::Pop));
        let reqs = ctx.take_requests();
        assert_eq!(reqs[0].syntax, "tp");
        assert_eq!(reqs[0].args, vec!["Bob"]);
        assert_eq!(reqs[0].label, "Teleport to Player");
    }

    #[test]
    fn shrinking_roster_clamps_selection() {
        let reg = registry();
        let lobby = Lobby::new(&["Alice"], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::Reply { field: 0 }).starting_at(5);
        let frame = picker.draw(&ctx);
        assert!(frame.rows[0].selected);
        assert!(matches!(picker.execute_selected(&mut ctx), Transition::PopWith(_)));
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn empty_roster_reports() {
        let reg = registry();
        let lobby = Lobby::new(&[], false);
        let status = StatusChannel::new();
        let mut ctx = ScreenContext::new(&reg, &lobby, &status);
        let mut picker = EntityPicker::new(PickAction::OpenCommands);
        assert!(matches!(picker.execute_selected(&mut ctx), Transition::Stay));
        assert_eq!(status.read().as_deref(), Some(NO_ENTITIES));
        assert_eq!(picker.draw(&ctx).row_texts(), vec![NO_ENTITIES]);
    }
}
