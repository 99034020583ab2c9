//! Tiered syntax → command registry.
//!
//! Built once from a catalog table, read-only afterwards. Each tier has its
//! own namespace; lookups walk the tiers in [`Tier::PRECEDENCE`] order.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use helm_types::error::{HelmError, Result};

use crate::command::{CatalogEntry, Command, CommandBody, Tier};

/// A command descriptor together with its body.
pub struct RegisteredCommand {
    pub command: Command,
    pub body: Arc<dyn CommandBody>,
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Registry of available commands across the three tiers.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    /// Registration order, for listings.
    commands: Vec<Arc<RegisteredCommand>>,
    /// Per-tier syntax → index into `commands`.
    tiers: [HashMap<String, usize>; 3],
}

impl CommandRegistry {
    /// Build from a catalog. Fails on a duplicate syntax within one tier.
    pub fn build(catalog: impl IntoIterator<Item = CatalogEntry>) -> Result<Self> {
        let mut reg = Self::default();
        for entry in catalog {
            let CatalogEntry { command, factory } = entry;
            let slot = command.tier.slot();
            if reg.tiers[slot].contains_key(&command.syntax) {
                return Err(HelmError::Registry(format!(
                    "duplicate {} command syntax `{}`",
                    command.tier, command.syntax
                )));
            }
            log::debug!("Registered {} command `{}`", command.tier, command.syntax);
            reg.tiers[slot].insert(command.syntax.clone(), reg.commands.len());
            reg.commands.push(Arc::new(RegisteredCommand {
                command,
                body: factory(),
            }));
        }
        log::info!("Command registry built with {} commands", reg.commands.len());
        Ok(reg)
    }

    /// Resolve a syntax, Normal first, then Privileged, then Debug.
    pub fn resolve(&self, syntax: &str) -> Option<&Arc<RegisteredCommand>> {
        Tier::PRECEDENCE
            .iter()
            .find_map(|tier| self.resolve_in(*tier, syntax))
    }

    /// Resolve within a single tier.
    pub fn resolve_in(&self, tier: Tier, syntax: &str) -> Option<&Arc<RegisteredCommand>> {
        self.tiers[tier.slot()]
            .get(syntax)
            .map(|&idx| &self.commands[idx])
    }

    /// Whether any tier knows the syntax.
    pub fn contains(&self, syntax: &str) -> bool {
        self.resolve(syntax).is_some()
    }

    /// All commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RegisteredCommand>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
