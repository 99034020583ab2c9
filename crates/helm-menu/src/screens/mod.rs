//! Menu screens and the context they run in.
//!
//! Screens never talk to the controller directly. Each input handler gets
//! a [`ScreenContext`] for reading session data and queueing dispatches,
//! and returns a [`Transition`] the controller applies to the stack.

mod category_list;
mod coordinate_input;
mod dual_picker;
mod entity_commands;
mod entity_picker;
mod parameter_input;
mod teleport_options;

use std::time::Duration;

use helm_command::{CommandRegistry, StatusChannel};
use helm_types::entity::{Entity, EntityProvider};
use helm_types::input::{TabDirection, TextEdit};

use crate::frame::{Frame, Row, list_rows};
use crate::nav;
use crate::stack::Lifecycle;

pub use category_list::CategoryList;
pub use coordinate_input::CoordinateInput;
pub use dual_picker::{DualPicker, Side};
pub use entity_commands::EntityCommands;
pub use entity_picker::{EntityPicker, PickAction};
pub use parameter_input::ParameterInput;
pub use teleport_options::TeleportOptions;

/// Which mode the menu is in, as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    CategorySelection,
    EntityPicker,
    ParameterInput,
    EntityCommandSelection,
    TeleportOptions,
    CoordinateInput,
    DualPicker,
}

/// A value handed back to the screen below when a screen pops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenReply {
    /// An entity was picked for parameter `field`.
    Picked { field: usize, name: String },
}

/// What the controller should do with the stack after an input.
pub enum Transition {
    Stay,
    Push(Box<dyn Screen>),
    Pop,
    PopWith(ScreenReply),
}

/// A command execution requested by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Display name used in status messages.
    pub label: String,
    pub syntax: String,
    pub args: Vec<String>,
}

/// Session data and side channels available to screens.
pub struct ScreenContext<'a> {
    pub registry: &'a CommandRegistry,
    pub entities: &'a dyn EntityProvider,
    pub status: &'a StatusChannel,
    /// Whether the local session holds the privileged role.
    pub privileged: bool,
    /// Whether Debug-tier commands may run.
    pub allow_debug: bool,
    pub max_visible_rows: usize,
    pub status_ttl: Duration,
    requests: Vec<DispatchRequest>,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        entities: &'a dyn EntityProvider,
        status: &'a StatusChannel,
    ) -> Self {
        Self {
            registry,
            entities,
            status,
            privileged: entities.local_is_privileged(),
            allow_debug: false,
            max_visible_rows: 8,
            status_ttl: Duration::from_secs(3),
            requests: Vec::new(),
        }
    }

    /// Queue a command for execution once the input has been handled.
    pub fn dispatch(&mut self, label: impl Into<String>, syntax: &str, args: Vec<String>) {
        self.requests.push(DispatchRequest {
            label: label.into(),
            syntax: syntax.to_string(),
            args,
        });
    }

    /// Show a transient message in the status line.
    pub fn report(&self, text: impl Into<String>) {
        self.status.set(text, self.status_ttl);
    }

    /// Current entity roster.
    pub fn roster(&self) -> Vec<Entity> {
        self.entities.list_active_entities()
    }

    /// Drain the queued dispatches.
    pub fn take_requests(&mut self) -> Vec<DispatchRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// One mode of the menu.
pub trait Screen: Lifecycle {
    fn state(&self) -> MenuState;

    fn navigate_up(&mut self, ctx: &mut ScreenContext<'_>);

    fn navigate_down(&mut self, ctx: &mut ScreenContext<'_>);

    /// Previous/next category. Most screens ignore it.
    fn switch_tab(&mut self, _direction: TabDirection, _ctx: &mut ScreenContext<'_>) -> Transition {
        Transition::Stay
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition;

    /// Raw text for the focused field, if the screen has one.
    fn edit_text(&mut self, _edit: &TextEdit) {}

    fn draw(&self, ctx: &ScreenContext<'_>) -> Frame;

    /// Receive the reply of a screen that was popped off this one.
    fn on_reply(&mut self, _reply: ScreenReply) {}
}

/// Rows for an entity list, or the empty-roster notice.
pub(crate) fn roster_rows(
    roster: &[Entity],
    selected: usize,
    focused: bool,
    max_visible: usize,
) -> Vec<Row> {
    if roster.is_empty() {
        return vec![Row::new(NO_ENTITIES)];
    }
    let labels: Vec<String> = roster.iter().map(Entity::label).collect();
    let mut rows = list_rows(&labels, nav::clamp(selected, roster.len()), max_visible);
    if !focused {
        rows.iter_mut().for_each(|row| row.selected = false);
    }
    rows
}

pub(crate) const NO_ENTITIES: &str = "No players available!";


#[cfg(test)]
mod tests {
    use super::testing::Lobby;
    use super::*;

    #[test]
    fn roster_rows_window_and_focus() {
        let names: Vec<String> = (0..12).map(|i| format!("P{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let roster = Lobby::new(&names, true).entities;

        let rows = roster_rows(&roster, 11, true, 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].text, "P11 (ID: 11)");
        assert!(rows[3].selected);

        let rows = roster_rows(&roster, 11, false, 4);
        assert!(rows.iter().all(|r| !r.selected));

        let rows = roster_rows(&[], 0, true, 4);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, NO_ENTITIES);
    }
}
