//! Root screen: category tabs over command lists and the entity roster.

use helm_types::config::{CategoryKind, ScreenKind};
use helm_types::input::TabDirection;

use super::{
    EntityPicker, MenuState, ParameterInput, PickAction, Screen, ScreenContext, TeleportOptions,
    Transition, roster_rows,
};
use crate::frame::{Frame, Row, Tab};
use crate::layout::{Category, MenuItem};
use crate::nav;
use crate::stack::Lifecycle;

const HINT: &str = "4/6=Category, 8/2=Up/Down, 5=Select, M=Close";
const PRIVILEGE_REQUIRED: &str = "Command requires host privileges!";

/// Category tabs plus the item index within the active tab.
#[derive(Debug, Clone)]
pub struct CategoryList {
    categories: Vec<Category>,
    category: usize,
    index: usize,
}

impl CategoryList {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            category: 0,
            index: 0,
        }
    }

    /// Back to the first tab, first item.
    pub fn reset(&mut self) {
        self.category = 0;
        self.index = 0;
    }

    pub fn category_index(&self) -> usize {
        self.category
    }

    pub fn item_index(&self) -> usize {
        self.index
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active(&self) -> Option<&Category> {
        self.categories.get(self.category)
    }

    fn item_count(&self, ctx: &ScreenContext<'_>) -> usize {
        match self.active() {
            Some(c) if c.kind == CategoryKind::Entities => ctx.roster().len(),
            Some(c) => c.items.len(),
            None => 0,
        }
    }

    fn select_item(&self, item: &MenuItem, ctx: &mut ScreenContext<'_>) -> Transition {
        match item {
            MenuItem::Screen(ScreenKind::TeleportOptions) => {
                Transition::Push(Box::new(TeleportOptions::new()))
            },
            MenuItem::Command(cmd) if cmd.is_privileged() && !ctx.privileged => {
                log::info!("Refused privileged command `{}` from menu", cmd.syntax);
                ctx.report(PRIVILEGE_REQUIRED);
                Transition::Stay
            },
            MenuItem::Command(cmd) if cmd.parameters.is_empty() => {
                ctx.dispatch(cmd.name.clone(), &cmd.syntax, Vec::new());
                Transition::Stay
            },
            MenuItem::Command(cmd) => Transition::Push(Box::new(ParameterInput::new(cmd.clone()))),
        }
    }
}

impl Lifecycle for CategoryList {}

impl Screen for CategoryList {
    fn state(&self) -> MenuState {
        MenuState::CategorySelection
    }

    fn navigate_up(&mut self, ctx: &mut ScreenContext<'_>) {
        self.index = nav::wrap_prev(self.index, self.item_count(ctx));
    }

    fn navigate_down(&mut self, ctx: &mut ScreenContext<'_>) {
        self.index = nav::wrap_next(self.index, self.item_count(ctx));
    }

    fn switch_tab(&mut self, direction: TabDirection, _ctx: &mut ScreenContext<'_>) -> Transition {
        let len = self.categories.len();
        self.category = match direction {
            TabDirection::Previous => nav::wrap_prev(self.category, len),
            TabDirection::Next => nav::wrap_next(self.category, len),
        };
        self.index = 0;
        Transition::Stay
    }

    fn execute_selected(&mut self, ctx: &mut ScreenContext<'_>) -> Transition {
        let Some(category) = self.active() else {
            return Transition::Stay;
        };
        if category.kind == CategoryKind::Entities {
            if ctx.roster().is_empty() {
                ctx.report(super::NO_ENTITIES);
                return Transition::Stay;
            }
            let picker = EntityPicker::new(PickAction::OpenCommands).starting_at(self.index);
            return Transition::Push(Box::new(picker));
        }
        match category.items.get(self.index) {
            Some(item) => self.select_item(item, ctx),
            None => Transition::Stay,
        }
    }

    fn draw(&self, ctx: &ScreenContext<'_>) -> Frame {
        let mut frame = Frame::new("Command Menu").with_hint(HINT);
        frame.tabs = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| Tab {
                label: c.name.clone(),
                active: i == self.category,
            })
            .collect();
        frame.rows = match self.active() {
            Some(c) if c.kind == CategoryKind::Entities => {
                roster_rows(&ctx.roster(), self.index, true, ctx.max_visible_rows)
            },
            Some(c) => nav::visible_window(c.items.len(), self.index, ctx.max_visible_rows)
                .map(|i| {
                    let item = &c.items[i];
                    let row = Row::new(item.label(ctx.privileged)).selected(i == self.index);
                    match item.detail() {
                        Some(d) => row.with_detail(d),
                        None => row,
                    }
                })
                .collect(),
            None => Vec::new(),
        };
        frame
    }
}
