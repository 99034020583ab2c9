//! Resolve a [`MenuLayout`] against the command registry.

use helm_command::{Command, CommandRegistry};
use helm_types::config::{CategoryKind, EntrySpec, MenuLayout, ScreenKind};
use helm_types::error::{HelmError, Result};

/// Syntax the teleport submenu dispatches.
pub const TELEPORT_SYNTAX: &str = "tp";

/// A selectable entry of a command category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Command(Command),
    Screen(ScreenKind),
}

impl MenuItem {
    /// Row label; privileged commands are marked for non-privileged sessions.
    pub fn label(&self, privileged: bool) -> String {
        match self {
            Self::Command(cmd) if cmd.is_privileged() && !privileged => {
                format!("{} [HOST ONLY]", cmd.name)
            },
            Self::Command(cmd) => cmd.name.clone(),
            Self::Screen(ScreenKind::TeleportOptions) => "Teleport Options".to_string(),
        }
    }

    /// Parameter keys, e.g. `player, amount`.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Command(cmd) if !cmd.parameters.is_empty() => Some(
                cmd.parameters
                    .iter()
                    .map(|p| p.key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        }
    }
}

/// One tab of the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub kind: CategoryKind,
    /// Empty for the entity category, whose rows are the live roster.
    pub items: Vec<MenuItem>,
}

/// Build the category tabs. Every command syntax must be registered.
pub fn build_categories(layout: &MenuLayout, registry: &CommandRegistry) -> Result<Vec<Category>> {
    layout.validate()?;
    let mut categories = Vec::with_capacity(layout.categories.len());
    for spec in &layout.categories {
        let mut items = Vec::new();
        if spec.kind == CategoryKind::Commands {
            for entry in &spec.entries {
                items.push(resolve_entry(&spec.name, entry, registry)?);
            }
        } else if !spec.entries.is_empty() {
            log::warn!(
                "Entries of entity category '{}' are ignored",
                spec.name
            );
        }
        categories.push(Category {
            name: spec.name.clone(),
            kind: spec.kind,
            items,
        });
    }
    log::debug!("Menu layout built with {} categories", categories.len());
    Ok(categories)
}

fn resolve_entry(category: &str, entry: &EntrySpec, registry: &CommandRegistry) -> Result<MenuItem> {
    match entry {
        EntrySpec::Command(syntax) => registry
            .resolve(syntax)
            .map(|c| MenuItem::Command(c.command.clone()))
            .ok_or_else(|| {
                HelmError::Registry(format!(
                    "menu category '{category}' references unknown command `{syntax}`"
                ))
            }),
        EntrySpec::Screen { screen } => {
            if *screen == ScreenKind::TeleportOptions && !registry.contains(TELEPORT_SYNTAX) {
                return Err(HelmError::Registry(format!(
                    "menu category '{category}' opens teleport options but `{TELEPORT_SYNTAX}` is not registered"
                )));
            }
            Ok(MenuItem::Screen(*screen))
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use helm_command::{Arguments, CatalogEntry, CommandBody, Tier};
    use helm_types::config::{CategorySpec, HelmConfig};
    use tokio_util::sync::CancellationToken;

    use super::*;

    struct Noop;

    #[async_trait]
    impl CommandBody for Noop {
        async fn execute(&self, _args: &Arguments, _cancel: CancellationToken) -> Result<()> {
            Ok(())
        }
    }

    fn registry(with_tp: bool) -> CommandRegistry {
        let mut entries = vec![
            CatalogEntry::with_body(Command::new("Clear", "clear", Tier::Normal), Arc::new(Noop)),
            CatalogEntry::with_body(
                Command::new("Credit", "credit", Tier::Privileged).with_keys(&["amount"]),
                Arc::new(Noop),
            ),
        ];
        if with_tp {
            entries.push(CatalogEntry::with_body(
                Command::new("Teleport", "tp", Tier::Normal),
                Arc::new(Noop),
            ));
        }
        CommandRegistry::build(entries).unwrap()
    }

    fn layout(src: &str) -> MenuLayout {
        HelmConfig::from_toml_str(src).unwrap().menu.unwrap()
    }

    #[test]
    fn builds_commands_screens_and_entities() {
        let layout = layout(
            r#"
            [[menu.category]]
            name = "Game"
            entries = ["clear", "credit", { screen = "teleport_options" }]

            [[menu.category]]
            name = "Players"
            kind = "entities"
            "#,
        );
        let cats = build_categories(&layout, &registry(true)).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].items.len(), 3);
        assert_eq!(cats[0].items[0].label(false), "Clear");
        assert_eq!(cats[0].items[1].label(false), "Credit [HOST ONLY]");
        assert_eq!(cats[0].items[1].label(true), "Credit");
        assert_eq!(cats[0].items[1].detail().as_deref(), Some("amount"));
        assert_eq!(cats[0].items[2], MenuItem::Screen(ScreenKind::TeleportOptions));
        assert_eq!(cats[1].kind, CategoryKind::Entities);
        assert!(cats[1].items.is_empty());
    }

    #[test]
    fn unknown_syntax_is_an_error() {
        let layout = MenuLayout {
            categories: vec![CategorySpec {
                name: "World".to_string(),
                kind: CategoryKind::Commands,
                entries: vec![EntrySpec::Command("explode".to_string())],
            }],
        };
        let err = build_categories(&layout, &registry(true)).unwrap_err();
        assert!(matches!(err, HelmError::Registry(_)));
        assert!(err.to_string().contains("`explode`"));
    }

    #[test]
    fn teleport_screen_needs_tp() {
        let layout = MenuLayout {
            categories: vec![CategorySpec {
                name: "Teleportation".to_string(),
                kind: CategoryKind::Commands,
                entries: vec![EntrySpec::Screen {
                    screen: ScreenKind::TeleportOptions,
                }],
            }],
        };
        assert!(build_categories(&layout, &registry(false)).is_err());
        assert!(build_categories(&layout, &registry(true)).is_ok());
    }
}
