//! Console configuration loaded from TOML.
//!
//! ```toml
//! status_ttl_ms = 3000
//! max_visible_rows = 8
//! debug_commands = false
//! cancel_on_close = true
//!
//! [keys]
//! k = "navigate_up"
//! j = "navigate_down"
//!
//! [[menu.category]]
//! name = "Teleportation"
//! entries = ["exit", "home", { screen = "teleport_options" }]
//!
//! [[menu.category]]
//! name = "Players"
//! kind = "entities"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HelmError, Result};
use crate::input::KeyBindings;

/// Top-level console configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HelmConfig {
    /// How long a command outcome stays in the status line.
    #[serde(default = "default_status_ttl_ms")]
    pub status_ttl_ms: u64,
    /// Rows shown by list screens before they start windowing.
    #[serde(default = "default_max_visible_rows")]
    pub max_visible_rows: usize,
    /// Allow Debug-tier commands to run.
    #[serde(default = "default_debug_commands")]
    pub debug_commands: bool,
    /// Cancel in-flight commands when the menu is closed.
    #[serde(default = "yes")]
    pub cancel_on_close: bool,
    /// Force the session privilege flag instead of asking the entity provider.
    #[serde(default)]
    pub privileged: Option<bool>,
    /// Key binding overrides, merged over the defaults.
    #[serde(default)]
    pub keys: Option<KeyBindings>,
    /// Menu layout override.
    #[serde(default)]
    pub menu: Option<MenuLayout>,
}

fn default_status_ttl_ms() -> u64 {
    3000
}
fn default_max_visible_rows() -> usize {
    8
}
fn default_debug_commands() -> bool {
    cfg!(debug_assertions)
}
fn yes() -> bool {
    true
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            status_ttl_ms: default_status_ttl_ms(),
            max_visible_rows: default_max_visible_rows(),
            debug_commands: default_debug_commands(),
            cancel_on_close: true,
            privileged: None,
            keys: None,
            menu: None,
        }
    }
}

impl HelmConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&src)?;
        log::info!("Loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Load from `path` if given and present, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                log::warn!("Config {} not found, using defaults", p.display());
                Ok(Self::default())
            },
            None => Ok(Self::default()),
        }
    }

    /// Status line time-to-live.
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    /// Default key bindings with the configured overrides applied.
    pub fn key_bindings(&self) -> KeyBindings {
        match &self.keys {
            Some(overrides) => KeyBindings::default().merged(overrides),
            None => KeyBindings::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_visible_rows == 0 {
            return Err(HelmError::Config(
                "max_visible_rows must be at least 1".to_string(),
            ));
        }
        if let Some(menu) = &self.menu {
            menu.validate()?;
        }
        Ok(())
    }
}

/// Ordered list of menu categories (`[[menu.category]]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuLayout {
    #[serde(rename = "category", default)]
    pub categories: Vec<CategorySpec>,
}

impl MenuLayout {
    /// Structural checks that don't need the command registry.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(HelmError::Config("menu has no categories".to_string()));
        }
        let entity_tabs = self
            .categories
            .iter()
            .filter(|c| c.kind == CategoryKind::Entities)
            .count();
        if entity_tabs > 1 {
            return Err(HelmError::Config(
                "at most one entity category is allowed".to_string(),
            ));
        }
        Ok(())
    }
}

/// One tab of the category list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub kind: CategoryKind,
    #[serde(default)]
    pub entries: Vec<EntrySpec>,
}

/// What a category tab lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Registry commands and submenus.
    #[default]
    Commands,
    /// The live entity roster.
    Entities,
}

/// A single item inside a command category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// A registered command syntax.
    Command(String),
    /// A dedicated submenu screen.
    Screen { screen: ScreenKind },
}

/// Submenus that can be opened from a category entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    TeleportOptions,
}
