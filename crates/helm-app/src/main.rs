//! HELM console front end.
//!
//! Reads one line at a time from stdin: key tokens drive the menu
//! (numpad layout by default, `m` toggles it), `t <text>` fills the focused
//! field, `/command args` runs a command directly. The world is a small
//! demo lobby.
//!
//! Config path comes from the first argument or `HELM_CONFIG`;
//! `HELM_PLAYER` picks which demo player owns the console (0 is the host).

mod catalog;
mod input;
mod render;
mod world;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use helm_command::{CommandRegistry, Dispatcher};
use helm_menu::MenuController;
use helm_types::config::HelmConfig;
use helm_types::input::{NavEvent, TextEdit};
use input::ConsoleLine;
use world::DemoWorld;

/// How long to wait for dispatched commands before redrawing.
const SETTLE_WAIT: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("HELM_CONFIG").ok())
        .map(PathBuf::from);
    let config = HelmConfig::load_or_default(config_path.as_deref())?;

    let local = std::env::var("HELM_PLAYER")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let world = Arc::new(DemoWorld::demo(local));
    log::info!("Starting HELM as {}", world.local_name());

    let registry = CommandRegistry::build(catalog::catalog(&world))?;
    let dispatcher = Dispatcher::new(Arc::new(registry), config.debug_commands);
    let layout = config.menu.clone().unwrap_or_else(catalog::default_layout);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("helm-command")
        .build()?;

    let entities = Arc::clone(&world);
    let mut menu = MenuController::new(
        dispatcher.clone(),
        &layout,
        entities,
        &config,
        runtime.handle().clone(),
    )?;
    let keys = config.key_bindings();
    let toggle_keys = keys.keys_for(NavEvent::ToggleVisibility).join("/");

    print!("{}", input::help_text(&keys));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match input::parse_line(&line, &keys) {
            ConsoleLine::Quit => break,
            ConsoleLine::Empty => {},
            ConsoleLine::Help => print!("{}", input::help_text(&keys)),
            ConsoleLine::Keys(events) => {
                for event in events {
                    menu.handle_event(event);
                }
            },
            ConsoleLine::Text(text) => menu.edit_text(&TextEdit::Replace(text)),
            ConsoleLine::Command(line) => {
                let result = runtime.block_on(dispatcher.execute_line(&line, menu.privileged()));
                if result.success {
                    println!("ok");
                } else {
                    println!("error: {}", result.message());
                }
            },
            ConsoleLine::Unknown(token) => {
                println!("Unknown key '{token}' (type 'help')");
                continue;
            },
        }

        // Give quick commands a moment so their outcome is in this frame.
        // Slower ones keep running and show up on a later redraw.
        let _ = runtime.block_on(async { tokio::time::timeout(SETTLE_WAIT, menu.settle()).await });

        match menu.draw() {
            Some(frame) => print!("{}", render::render(&frame)),
            None => match menu.status().read() {
                Some(status) => println!("-- {status}"),
                None => println!("(menu hidden, press {toggle_keys})"),
            },
        }
        stdout.flush()?;
    }

    log::info!("Shutting down");
    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
