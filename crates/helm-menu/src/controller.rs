//! Menu controller: routes navigation events to the active screen and runs
//! the commands screens ask for.
//!
//! The controller is driven from a single UI thread. Commands execute as
//! tasks on a tokio runtime and report back only through the shared
//! [`StatusChannel`] and the [`Echo`] collaborator, so a completion can
//! never act on a screen that has since been popped.

use std::sync::Arc;
use std::time::Duration;

use helm_command::{
    Arguments, CommandResult, Dispatcher, Echo, Invocation, LogEcho, StatusChannel,
};
use helm_types::config::{HelmConfig, MenuLayout};
use helm_types::entity::EntityProvider;
use helm_types::error::Result;
use helm_types::input::{NavEvent, TextEdit};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::frame::Frame;
use crate::layout::build_categories;
use crate::screens::{
    CategoryList, DispatchRequest, MenuState, Screen, ScreenContext, Transition,
};
use crate::stack::ScreenStack;

/// Settings the controller reads from [`HelmConfig`].
#[derive(Debug, Clone, Copy)]
struct Settings {
    status_ttl: Duration,
    max_visible_rows: usize,
    cancel_on_close: bool,
    privileged: Option<bool>,
}

impl From<&HelmConfig> for Settings {
    fn from(cfg: &HelmConfig) -> Self {
        Self {
            status_ttl: cfg.status_ttl(),
            max_visible_rows: cfg.max_visible_rows,
            cancel_on_close: cfg.cancel_on_close,
            privileged: cfg.privileged,
        }
    }
}

/// Screen context over the controller's collaborators.
///
/// A free function so the context can borrow these fields while the stack
/// is borrowed mutably.
fn context<'a>(
    dispatcher: &'a Dispatcher,
    entities: &'a dyn EntityProvider,
    status: &'a StatusChannel,
    settings: &Settings,
    privileged: bool,
) -> ScreenContext<'a> {
    let mut ctx = ScreenContext::new(dispatcher.registry(), entities, status);
    ctx.privileged = privileged;
    ctx.allow_debug = dispatcher.allows_debug();
    ctx.max_visible_rows = settings.max_visible_rows;
    ctx.status_ttl = settings.status_ttl;
    ctx
}

pub struct MenuController {
    visible: bool,
    root: CategoryList,
    stack: ScreenStack<dyn Screen>,
    dispatcher: Dispatcher,
    status: StatusChannel,
    entities: Arc<dyn EntityProvider>,
    echo: Arc<dyn Echo>,
    settings: Settings,
    runtime: Handle,
    /// Parent of every execution token; replaced after each close.
    session: CancellationToken,
    in_flight: Vec<JoinHandle<CommandResult>>,
}

impl MenuController {
    /// Build the controller. Fails if the layout references an unknown
    /// command.
    pub fn new(
        dispatcher: Dispatcher,
        layout: &MenuLayout,
        entities: Arc<dyn EntityProvider>,
        config: &HelmConfig,
        runtime: Handle,
    ) -> Result<Self> {
        let categories = build_categories(layout, dispatcher.registry())?;
        Ok(Self {
            visible: false,
            root: CategoryList::new(categories),
            stack: ScreenStack::new(),
            dispatcher,
            status: StatusChannel::new(),
            entities,
            echo: Arc::new(LogEcho),
            settings: Settings::from(config),
            runtime,
            session: CancellationToken::new(),
            in_flight: Vec::new(),
        })
    }

    /// Share an existing status channel (e.g. one the overlay already reads).
    pub fn with_status(mut self, status: StatusChannel) -> Self {
        self.status = status;
        self
    }

    /// Route failure messages to `echo` instead of the log.
    pub fn with_echo(mut self, echo: Arc<dyn Echo>) -> Self {
        self.echo = echo;
        self
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The active mode. `CategorySelection` while no screen is stacked.
    pub fn state(&self) -> MenuState {
        self.stack
            .current()
            .map_or(MenuState::CategorySelection, |s| s.state())
    }

    /// Number of screens above the category list.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn categories(&self) -> &CategoryList {
        &self.root
    }

    /// Whether the local session counts as privileged right now.
    pub fn privileged(&self) -> bool {
        self.settings
            .privileged
            .unwrap_or_else(|| self.entities.local_is_privileged())
    }

    /// Show or hide the menu. Either way the menu returns to the first
    /// category with an empty stack; closing also cancels running commands
    /// when configured to.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        self.stack.clear();
        self.root.reset();
        if self.visible {
            log::info!("Menu opened");
            return;
        }
        log::info!("Menu closed");
        if self.settings.cancel_on_close {
            self.session.cancel();
            self.session = CancellationToken::new();
        }
    }

    /// Feed one navigation event. Ignored while hidden, except the toggle.
    pub fn handle_event(&mut self, event: NavEvent) {
        if event == NavEvent::ToggleVisibility {
            self.toggle_visibility();
            return;
        }
        if !self.visible {
            return;
        }

        let privileged = self.privileged();
        let (transition, requests) = {
            let mut ctx = context(
                &self.dispatcher,
                self.entities.as_ref(),
                &self.status,
                &self.settings,
                privileged,
            );

            let screen: &mut dyn Screen = match self.stack.current_mut() {
                Some(s) => s,
                None => &mut self.root,
            };
            let transition = match event {
                NavEvent::NavigateUp => {
                    screen.navigate_up(&mut ctx);
                    Transition::Stay
                },
                NavEvent::NavigateDown => {
                    screen.navigate_down(&mut ctx);
                    Transition::Stay
                },
                NavEvent::Select => screen.execute_selected(&mut ctx),
                NavEvent::PreviousCategory | NavEvent::NextCategory => match event.tab_direction() {
                    Some(direction) => screen.switch_tab(direction, &mut ctx),
                    None => Transition::Stay,
                },
                NavEvent::Back => Transition::Pop,
                NavEvent::ToggleVisibility => Transition::Stay,
            };
            (transition, ctx.take_requests())
        };

        self.apply(transition);
        for request in requests {
            self.spawn_dispatch(request, privileged);
        }
    }

    /// Forward a raw text edit to the focused field.
    pub fn edit_text(&mut self, edit: &TextEdit) {
        if !self.visible {
            return;
        }
        if let Some(screen) = self.stack.current_mut() {
            screen.edit_text(edit);
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {},
            Transition::Push(screen) => {
                log::debug!("Entering {:?}", screen.state());
                self.stack.push(screen);
            },
            Transition::Pop => {
                self.stack.pop();
            },
            Transition::PopWith(reply) => {
                if let Some(screen) = self.stack.pop() {
                    screen.on_reply(reply);
                }
            },
        }
    }

    /// Run a command in the background with status feedback.
    ///
    /// Writes a persistent "Executing" entry, then the outcome with the
    /// status TTL, then clears the outcome after the TTL unless something
    /// else has been written since.
    fn spawn_dispatch(&mut self, request: DispatchRequest, privileged: bool) {
        self.in_flight.retain(|h| !h.is_finished());

        let DispatchRequest {
            label,
            syntax,
            args,
        } = request;
        self.status.set_persistent(format!("Executing {label}..."));

        let dispatcher = self.dispatcher.clone();
        let status = self.status.clone();
        let echo = Arc::clone(&self.echo);
        let token = self.session.child_token();
        let ttl = self.settings.status_ttl;

        let handle = self.runtime.spawn(async move {
            let args = Arguments::new(args);
            let result = dispatcher
                .execute_with_token(&syntax, &args, Invocation::menu(privileged), token)
                .await;
            let text = if result.success {
                format!("{label} executed ({syntax})")
            } else {
                let message = result.message().to_string();
                echo.echo(&message);
                message
            };
            let stamp = status.set(text, ttl);
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                status.clear_if(stamp);
            });
            result
        });
        self.in_flight.push(handle);
    }

    /// Wait for every command dispatched so far and return their results
    /// in dispatch order.
    pub async fn settle(&mut self) -> Vec<CommandResult> {
        let mut results = Vec::with_capacity(self.in_flight.len());
        for handle in self.in_flight.drain(..) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => log::error!("Command task failed: {e}"),
            }
        }
        results
    }

    /// Describe the current screen, or `None` while hidden.
    pub fn draw(&self) -> Option<Frame> {
        if !self.visible {
            return None;
        }
        let ctx = context(
            &self.dispatcher,
            self.entities.as_ref(),
            &self.status,
            &self.settings,
            self.privileged(),
        );
        let screen: &dyn Screen = match self.stack.current() {
            Some(s) => s,
            None => &self.root,
        };
        let mut frame = screen.draw(&ctx);
        frame.status = self.status.read();
        Some(frame)
    }
}
