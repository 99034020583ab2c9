//! Demo command catalog and the default menu layout.
//!
//! Bodies act on a shared [`DemoWorld`]. Commands that have no visible
//! effect in the demo are logged.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use helm_command::{Arguments, CatalogEntry, Command, CommandBody, Parameter, Tier};
use helm_types::config::{CategoryKind, CategorySpec, EntrySpec, MenuLayout, ScreenKind};
use helm_types::error::{HelmError, Result};
use tokio_util::sync::CancellationToken;

use crate::world::{DemoWorld, MAX_HEALTH};

const TP_USAGE: &str = "usage: tp <player> | tp <player> <player> | tp <x> <y> <z>";

/// Logs the invocation and does nothing else.
struct Logged {
    syntax: &'static str,
}

#[async_trait]
impl CommandBody for Logged {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        log::info!("{} {}", self.syntax, args.as_slice().join(" "));
        Ok(())
    }
}

struct Teleport {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Teleport {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        match args.len() {
            1 => {
                let target = self.world.player(args.require(0, "player")?)?;
                self.world.move_local(target.position)
            },
            2 => {
                let destination = self.world.player(args.require(1, "destination")?)?;
                self.world
                    .move_to(args.require(0, "source")?, destination.position)
            },
            3 => {
                let position = [args.parse(0, "x")?, args.parse(1, "y")?, args.parse(2, "z")?];
                self.world.move_local(position)
            },
            _ => Err(HelmError::Validation(TP_USAGE.to_string())),
        }
    }
}

struct Heal {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Heal {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        self.world.heal(args.require(0, "player")?)
    }
}

struct Kill {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Kill {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        self.world.damage(args.require(0, "player")?, MAX_HEALTH)?;
        Ok(())
    }
}

/// Holds its effect for `duration` seconds, or until cancelled.
struct Noise;

#[async_trait]
impl CommandBody for Noise {
    async fn execute(&self, args: &Arguments, cancel: CancellationToken) -> Result<()> {
        let player = args.require(0, "player")?;
        let seconds: f64 = args.parse(1, "duration")?;
        if seconds < 0.0 {
            return Err(HelmError::execution("duration must be positive"));
        }
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|_| HelmError::execution("duration out of range"))?;
        log::info!("Playing noise on {player} for {seconds}s");
        tokio::select! {
            () = tokio::time::sleep(duration) => {
                log::info!("Noise on {player} finished");
                Ok(())
            },
            () = cancel.cancelled() => Err(HelmError::Cancelled),
        }
    }
}

struct Credit {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Credit {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let amount: i64 = args.parse(0, "amount")?;
        let total = self.world.add_credits(amount)?;
        log::info!("Credits now {total}");
        Ok(())
    }
}

struct Spawn {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Spawn {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let enemy = args.require(0, "enemy")?;
        let player = args.require(1, "player")?;
        let amount: usize = args.parse(2, "amount")?;
        self.world.spawn_enemy(enemy, player, amount)
    }
}

struct Revive {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Revive {
    async fn execute(&self, _args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let revived = self.world.revive_all();
        log::info!("Revived {revived} players");
        Ok(())
    }
}

struct Toggle {
    world: Arc<DemoWorld>,
    key: &'static str,
}

#[async_trait]
impl CommandBody for Toggle {
    async fn execute(&self, _args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let on = self.world.toggle(self.key);
        log::info!("{}: {}", self.key, if on { "enabled" } else { "disabled" });
        Ok(())
    }
}

struct Players {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Players {
    async fn execute(&self, _args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        for player in self.world.players() {
            log::info!("{} hp={} at {:?}", player.entity.label(), player.health, player.position);
        }
        Ok(())
    }
}

struct Say;

#[async_trait]
impl CommandBody for Say {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let player = args.require(0, "player")?;
        let message = args.as_slice()[1..].join(" ");
        if message.trim().is_empty() {
            return Err(HelmError::execution("missing message"));
        }
        log::info!("[{player}] {message}");
        Ok(())
    }
}

struct Inspect {
    world: Arc<DemoWorld>,
}

#[async_trait]
impl CommandBody for Inspect {
    async fn execute(&self, args: &Arguments, _cancel: CancellationToken) -> Result<()> {
        let player = self.world.player(args.require(0, "player")?)?;
        log::info!("{player:?}");
        Ok(())
    }
}

/// The full demo catalog.
pub fn catalog(world: &Arc<DemoWorld>) -> Vec<CatalogEntry> {
    let logged = |name: &str, syntax: &'static str, keys: &[&str]| {
        CatalogEntry::with_body(
            Command::new(name, syntax, Tier::Normal).with_keys(keys),
            Arc::new(Logged { syntax }),
        )
    };
    let toggle = |name: &str, syntax: &'static str, key: &'static str| {
        let world = Arc::clone(world);
        CatalogEntry::new(
            Command::new(name, syntax, Tier::Normal),
            move || -> Arc<dyn CommandBody> { Arc::new(Toggle { world, key }) },
        )
    };
    let w = || Arc::clone(world);

    vec![
        // Teleportation
        logged("Exit", "exit", &[]),
        logged("Enter", "enter", &[]),
        CatalogEntry::with_body(
            Command::new("Teleport", "tp", Tier::Normal),
            Arc::new(Teleport { world: w() }),
        ),
        logged("Void", "void", &[]),
        logged("Home", "home", &[]),
        logged("Mob", "mob", &[]),
        logged("Random", "random", &[]),
        // Combat
        CatalogEntry::with_body(
            Command::new("Noise", "noise", Tier::Normal).with_keys(&["player", "duration"]),
            Arc::new(Noise),
        ),
        logged("Bomb", "bomb", &["player"]),
        logged("Bombard", "bombard", &["player"]),
        logged("Hate", "hate", &["player"]),
        logged("Mask", "mask", &["player", "amount"]),
        logged("Fatality", "fatality", &["player", "enemy"]),
        CatalogEntry::with_body(
            Command::new("Poison", "poison", Tier::Normal).with_params([
                Parameter::required("player"),
                Parameter::required("damage"),
                Parameter::required("duration"),
                Parameter::optional("delay").describe("delay (optional)"),
            ]),
            Arc::new(Logged { syntax: "poison" }),
        ),
        logged("Stun", "stun", &["player"]),
        CatalogEntry::with_body(
            Command::new("Kill", "kill", Tier::Normal).with_keys(&["player"]),
            Arc::new(Kill { world: w() }),
        ),
        // Utilities
        CatalogEntry::with_body(
            Command::new("Say", "say", Tier::Normal).with_keys(&["player", "message"]),
            Arc::new(Say),
        ),
        logged("Translate", "translate", &[]),
        logged("Buy", "buy", &["item", "quantity"]),
        logged("Grab", "grab", &["item"]),
        // World
        logged("Block", "block", &[]),
        logged("Build", "build", &[]),
        logged("Suit", "suit", &["suit"]),
        logged("Visit", "visit", &[]),
        logged("Spin", "spin", &[]),
        logged("Explode", "explode", &[]),
        // Toggles
        toggle("God Mode", "god", "god"),
        toggle("No Clip", "noclip", "noclip"),
        toggle("Jump", "jump", "jump"),
        toggle("Rapid Fire", "rapid", "rapid"),
        toggle("Fake Death", "fakedeath", "fakedeath"),
        toggle("Invisibility", "invis", "invis"),
        // Game
        logged("Start Game", "start", &[]),
        logged("End Game", "end", &[]),
        CatalogEntry::with_body(
            Command::new("Heal", "heal", Tier::Normal).with_keys(&["player"]),
            Arc::new(Heal { world: w() }),
        ),
        CatalogEntry::with_body(
            Command::new("Players", "players", Tier::Normal),
            Arc::new(Players { world: w() }),
        ),
        logged("Clear", "clear", &[]),
        // Privileged
        CatalogEntry::with_body(
            Command::new("Spawn Enemy", "spawn", Tier::Privileged)
                .with_keys(&["enemy", "player", "amount"]),
            Arc::new(Spawn { world: w() }),
        ),
        CatalogEntry::with_body(
            Command::new("Credit", "credit", Tier::Privileged).with_keys(&["amount"]),
            Arc::new(Credit { world: w() }),
        ),
        CatalogEntry::with_body(
            Command::new("Land", "land", Tier::Privileged),
            Arc::new(Logged { syntax: "land" }),
        ),
        CatalogEntry::with_body(
            Command::new("Eject", "eject", Tier::Privileged),
            Arc::new(Logged { syntax: "eject" }),
        ),
        CatalogEntry::with_body(
            Command::new("Revive", "revive", Tier::Privileged),
            Arc::new(Revive { world: w() }),
        ),
        // Debug
        CatalogEntry::with_body(
            Command::new("Inspect", "inspect", Tier::Debug).with_keys(&["player"]),
            Arc::new(Inspect { world: w() }),
        ),
    ]
}

fn commands(name: &str, entries: impl IntoIterator<Item = EntrySpec>) -> CategorySpec {
    CategorySpec {
        name: name.to_string(),
        kind: CategoryKind::Commands,
        entries: entries.into_iter().collect(),
    }
}

fn syntaxes(list: &[&str]) -> Vec<EntrySpec> {
    list.iter().map(|s| EntrySpec::Command(s.to_string())).collect()
}

/// Layout used when the config has no `[[menu.category]]` table.
pub fn default_layout() -> MenuLayout {
    let mut teleport = syntaxes(&["exit", "enter", "void", "home", "mob", "random"]);
    teleport.insert(
        2,
        EntrySpec::Screen {
            screen: ScreenKind::TeleportOptions,
        },
    );
    MenuLayout {
        categories: vec![
            commands("Teleportation", teleport),
            commands(
                "Combat",
                syntaxes(&[
                    "noise", "bomb", "bombard", "hate", "mask", "fatality", "poison", "stun",
                    "kill",
                ]),
            ),
            commands("Utilities", syntaxes(&["say", "translate", "buy", "grab"])),
            commands(
                "World",
                syntaxes(&["block", "build", "suit", "visit", "spin", "explode"]),
            ),
            commands(
                "Toggles",
                syntaxes(&["god", "noclip", "jump", "rapid", "fakedeath", "invis"]),
            ),
            commands(
                "Game",
                syntaxes(&["start", "end", "heal", "players", "clear"]),
            ),
            commands(
                "Privileged",
                syntaxes(&["spawn", "credit", "land", "eject", "revive"]),
            ),
            CategorySpec {
                name: "Players".to_string(),
                kind: CategoryKind::Entities,
                entries: Vec::new(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use helm_command::{CommandRegistry, Dispatcher, Invocation};
    use helm_menu::build_categories;

    use super::*;

    fn dispatcher(world: &Arc<DemoWorld>, debug: bool) -> Dispatcher {
        let registry = CommandRegistry::build(catalog(world)).unwrap();
        Dispatcher::new(Arc::new(registry), debug)
    }

    #[test]
    fn catalog_builds_and_layout_resolves() {
        let world = Arc::new(DemoWorld::demo(0));
        let registry = CommandRegistry::build(catalog(&world)).unwrap();
        let layout = default_layout();
        layout.validate().unwrap();
        let categories = build_categories(&layout, &registry).unwrap();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0].items.len(), 7);
        assert_eq!(categories[7].kind, CategoryKind::Entities);
        assert!(registry.resolve("inspect").is_some());
    }

    #[tokio::test]
    async fn teleport_forms() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);

        let r = d.execute_line("tp bob", false).await;
        assert!(r.success, "{}", r.message());
        assert_eq!(world.player("Alice").unwrap().position, [12.0, 0.0, -4.0]);

        let r = d.execute_line("tp Carol Bob", false).await;
        assert!(r.success);
        assert_eq!(world.player("Carol").unwrap().position, [12.0, 0.0, -4.0]);

        let r = d.execute_line("tp 1 2.5 -3", false).await;
        assert!(r.success);
        assert_eq!(world.player("Alice").unwrap().position, [1.0, 2.5, -3.0]);

        let r = d.execute_line("tp 1 north 3", false).await;
        assert_eq!(r.message(), "y must be a number!");

        let r = d.execute_line("tp", false).await;
        assert_eq!(r.message(), TP_USAGE);
    }

    #[tokio::test]
    async fn credit_requires_privilege_and_number() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);

        let r = d.execute_line("credit 50", false).await;
        assert_eq!(r.message(), "requires elevated privileges");

        let r = d.execute_line("credit lots", true).await;
        assert_eq!(r.message(), "amount must be a number!");

        let r = d.execute_line("credit 50", true).await;
        assert!(r.success);
        assert_eq!(world.credits(), 50);
    }

    #[tokio::test]
    async fn kill_then_heal() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        assert!(d.execute_line("kill Bob", false).await.success);
        assert!(!world.player("Bob").unwrap().entity.is_alive);
        let r = d.execute_line("kill Bob", false).await;
        assert_eq!(r.message(), "Bob is already dead");
        assert!(d.execute_line("heal bob", false).await.success);
        assert!(world.player("Bob").unwrap().entity.is_alive);
    }

    #[tokio::test]
    async fn toggles_and_revive() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        assert!(d.execute_line("god", false).await.success);
        assert!(world.is_enabled("god"));
        assert!(d.execute_line("revive", true).await.success);
        assert!(world.player("Dave").unwrap().entity.is_alive);
    }

    #[tokio::test]
    async fn say_needs_a_message() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        assert!(d.execute_line(r#"say Bob "hello there""#, false).await.success);
        assert_eq!(
            d.execute_line("say Bob", false).await.message(),
            "missing message"
        );
    }

    #[tokio::test]
    async fn inspect_needs_debug_mode() {
        let world = Arc::new(DemoWorld::demo(0));
        let r = dispatcher(&world, false).execute_line("inspect Bob", false).await;
        assert_eq!(r.message(), "requires debug mode");
        let r = dispatcher(&world, true).execute_line("inspect Bob", false).await;
        assert!(r.success);
    }

    #[tokio::test(start_paused = true)]
    async fn noise_runs_for_duration() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        let r = d.execute_line("noise Bob 30", false).await;
        assert!(r.success);
        let r = d.execute_line("noise Bob -1", false).await;
        assert_eq!(r.message(), "duration must be positive");
    }

    #[tokio::test]
    async fn noise_rejects_unrepresentable_duration() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        let r = d.execute_line("noise Bob 1e30", false).await;
        assert!(!r.success);
        assert_eq!(r.message(), "duration out of range");
        let r = d.execute_line("noise Bob inf", false).await;
        assert_eq!(r.message(), "duration out of range");
    }

    #[tokio::test]
    async fn credit_overflow_is_an_error() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        let max = format!("credit {}", i64::MAX);
        assert!(d.execute_line(&max, true).await.success);
        let r = d.execute_line("credit 1", true).await;
        assert!(!r.success);
        assert_eq!(r.message(), "amount out of range");
        assert_eq!(world.credits(), i64::MAX);
    }

    #[tokio::test]
    async fn spawn_amount_is_capped() {
        let world = Arc::new(DemoWorld::demo(0));
        let d = dispatcher(&world, false);
        let r = d.execute_line("spawn Bracken Bob 100000000000", true).await;
        assert!(!r.success);
        assert_eq!(r.message(), "amount must be at most 50");
        assert!(world.enemies().is_empty());
        assert!(d.execute_line("spawn Bracken Bob 3", true).await.success);
        assert_eq!(world.enemies().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn noise_stops_when_cancelled() {
        let token = CancellationToken::new();
        let args = Arguments::from(&["Bob", "30"][..]);
        let body = Noise;
        let run = body.execute(&args, token.clone());
        token.cancel();
        assert!(matches!(run.await, Err(HelmError::Cancelled)));
    }
}
