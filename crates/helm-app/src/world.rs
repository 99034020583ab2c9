//! In-memory stand-in for a live game session.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use helm_types::entity::{Entity, EntityProvider};
use helm_types::error::{HelmError, Result};

pub const MAX_HEALTH: u32 = 100;
/// Most enemies one `spawn` may create.
pub const MAX_SPAWN: usize = 50;

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    pub position: [f64; 3],
    pub health: u32,
}

impl Player {
    fn new(id: u64, name: &str, host: bool, position: [f64; 3]) -> Self {
        Self {
            entity: Entity {
                id,
                display_name: name.to_string(),
                is_alive: true,
                is_privileged_role: host,
            },
            position,
            health: MAX_HEALTH,
        }
    }
}

#[derive(Debug, Default)]
struct WorldState {
    players: Vec<Player>,
    /// Index of the player this console belongs to.
    local: usize,
    credits: i64,
    toggles: BTreeSet<String>,
    enemies: Vec<(String, [f64; 3])>,
}

/// A lobby of demo players that command bodies mutate.
#[derive(Debug, Default)]
pub struct DemoWorld {
    state: RwLock<WorldState>,
}

impl DemoWorld {
    /// Alice hosts, Bob and Carol are alive, Dave is dead. The console
    /// belongs to `local`.
    pub fn demo(local: usize) -> Self {
        let mut players = vec![
            Player::new(0, "Alice", true, [0.0, 0.0, 0.0]),
            Player::new(1, "Bob", false, [12.0, 0.0, -4.0]),
            Player::new(2, "Carol", false, [-30.5, 2.0, 18.0]),
            Player::new(3, "Dave", false, [5.0, -1.0, 40.0]),
        ];
        players[3].entity.is_alive = false;
        players[3].health = 0;
        let local = local.min(players.len() - 1);
        Self {
            state: RwLock::new(WorldState {
                players,
                local,
                ..WorldState::default()
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, WorldState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, WorldState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn local_name(&self) -> String {
        let state = self.read();
        state.players[state.local].entity.display_name.clone()
    }

    pub fn player(&self, name: &str) -> Result<Player> {
        let state = self.read();
        find(&state.players, name).map(|i| state.players[i].clone())
    }

    pub fn players(&self) -> Vec<Player> {
        self.read().players.clone()
    }

    pub fn credits(&self) -> i64 {
        self.read().credits
    }

    pub fn is_enabled(&self, toggle: &str) -> bool {
        self.read().toggles.contains(toggle)
    }

    pub fn enemies(&self) -> Vec<(String, [f64; 3])> {
        self.read().enemies.clone()
    }

    pub fn move_to(&self, name: &str, position: [f64; 3]) -> Result<()> {
        let mut state = self.write();
        let i = find(&state.players, name)?;
        state.players[i].position = position;
        log::info!("{} moved to {:?}", state.players[i].entity.display_name, position);
        Ok(())
    }

    /// Move the local player to `position`.
    pub fn move_local(&self, position: [f64; 3]) -> Result<()> {
        let name = self.local_name();
        self.move_to(&name, position)
    }

    pub fn heal(&self, name: &str) -> Result<()> {
        let mut state = self.write();
        let i = find(&state.players, name)?;
        let player = &mut state.players[i];
        player.health = MAX_HEALTH;
        player.entity.is_alive = true;
        Ok(())
    }

    /// Apply damage. Returns `true` if the player died.
    pub fn damage(&self, name: &str, amount: u32) -> Result<bool> {
        let mut state = self.write();
        let i = find(&state.players, name)?;
        let player = &mut state.players[i];
        if !player.entity.is_alive {
            return Err(HelmError::execution(format!(
                "{} is already dead",
                player.entity.display_name
            )));
        }
        player.health = player.health.saturating_sub(amount);
        if player.health == 0 {
            player.entity.is_alive = false;
        }
        Ok(!player.entity.is_alive)
    }

    pub fn revive_all(&self) -> usize {
        let mut state = self.write();
        let mut revived = 0;
        for player in state.players.iter_mut().filter(|p| !p.entity.is_alive) {
            player.entity.is_alive = true;
            player.health = MAX_HEALTH;
            revived += 1;
        }
        revived
    }

    /// Returns the new balance.
    pub fn add_credits(&self, amount: i64) -> Result<i64> {
        let mut state = self.write();
        state.credits = state
            .credits
            .checked_add(amount)
            .ok_or_else(|| HelmError::execution("amount out of range"))?;
        Ok(state.credits)
    }

    /// Flip a toggle. Returns the new state.
    pub fn toggle(&self, key: &str) -> bool {
        let mut state = self.write();
        if state.toggles.remove(key) {
            false
        } else {
            state.toggles.insert(key.to_string());
            true
        }
    }

    pub fn spawn_enemy(&self, kind: &str, near: &str, amount: usize) -> Result<()> {
        if amount > MAX_SPAWN {
            return Err(HelmError::execution(format!(
                "amount must be at most {MAX_SPAWN}"
            )));
        }
        let mut state = self.write();
        let i = find(&state.players, near)?;
        let position = state.players[i].position;
        state
            .enemies
            .extend(std::iter::repeat_n((kind.to_string(), position), amount));
        Ok(())
    }
}

fn find(players: &[Player], name: &str) -> Result<usize> {
    let name = name.trim();
    players
        .iter()
        .position(|p| p.entity.display_name.eq_ignore_ascii_case(name))
        .ok_or_else(|| HelmError::execution(format!("player '{name}' not found!")))
}

impl EntityProvider for DemoWorld {
    fn list_active_entities(&self) -> Vec<Entity> {
        self.read()
            .players
            .iter()
            .map(|p| p.entity.clone())
            .collect()
    }

    fn local_is_privileged(&self) -> bool {
        let state = self.read();
        state.players[state.local].entity.is_privileged_role
    }
}
