//! Commands that can target one picked entity.

use helm_command::{Command, Tier};

use super::{MenuState, ParameterInput, Screen, ScreenContext, Transition};
use crate::frame::{Frame, HINT_LIST, Row};
use crate::nav;
use crate::stack::Lifecycle;

const NO_COMMANDS: &str = "No commands available";

#[derive(Debug, Clone)]
pub struct EntityCommands {
    target: String,
    selected: usize,
}

impl EntityCommands {
    pub fn new(target: String) -> Self {
        Self {
            target,
            selected: 0,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Entity-targeting commands the session may run, in catalog order.
    ///
    /// Only the descriptor a syntax actually resolves to is listed, so a
    /// shadowed lower-precedence command never shows up twice.
    pub fn visible_commands(ctx: &ScreenContext<'_>) -> Vec<Command> {
        ctx.registry
            .iter()
            .filter(|reg| reg.command.targets_entity())
            .filter(|reg| {
                ctx.registry
                    .resolve(&reg.command.syntax)
                    .is_some_and(|winner| std::sync::Arc::ptr_eq(winner, reg))
            })
            .filter(|reg| match reg.command.tier {
                Tier::Normal => true,
                Tier::Privileged => ctx.privileged,
                Tier::Debug => ctx.allow_debug,
            })
            .map(|reg| reg.command.clone())
            .collect()
    }
}

impl Lifecycle for EntityCommands {}

impl Screen for EntityCommands {
    fn state(&self) -> MenuState {
        MenuState::EntityCommandSelection
    }

    fn navigate_up(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = Self::visible_commands(ctx).len();
        self.selected = nav::wrap_prev(nav::clamp(self.selected, len), len);
    }

    fn navigate_down(&mut self, ctx: &mut ScreenContext<'_>) {
        let len = Self::visible_commands(ctx).len();
        self.selected = nav::wrap_next(nav::clamp(self.selected, len), len);
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        let commands = Self::visible_commands(ctx);
        let Some(cmd) = commands.into_iter().nth(self.selected) else {
            return Transition::Stay;
        };
        if cmd.parameters.len() == 1 {
            ctx.dispatch(cmd.name.clone(), &cmd.syntax, vec![self.target.clone()]);
            return Transition::Stay;
        }
        let input = ParameterInput::new(cmd).prefilled(0, &self.target);
        Transition::Push(Box::new(input))
    }

    fn draw(&self, ctx: &ScreenContext<'_>) -> Frame {
        let commands = Self::visible_commands(ctx);
        let mut frame =
            Frame::new(format!("Commands for: {}", self.target)).with_hint(HINT_LIST);
        if commands.is_empty() {
            frame.rows = vec![Row::new(NO_COMMANDS)];
            return frame;
        }
        let selected = nav::clamp(self.selected, commands.len());
        frame.rows = nav::visible_window(commands.len(), selected, ctx.max_visible_rows)
            .map(|i| {
                let cmd = &commands[i];
                let row = Row::new(cmd.name.clone()).selected(i == selected);
                let rest: Vec<&str> = cmd.parameters[1..].iter().map(|p| p.key.as_str()).collect();
                if rest.is_empty() {
                    row
                } else {
                    row.with_detail(rest.join(", "))
                }
            })
            .collect();
        frame
    }
}
