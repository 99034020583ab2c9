//! Collaborator interfaces for live-session data.
//!
//! The console never enumerates game objects itself. A host integration
//! implements [`EntityProvider`] and the menu asks it for the current
//! roster on every draw.

/// A live entity as the menu sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: u64,
    pub display_name: String,
    pub is_alive: bool,
    /// Holds the privileged role in the session (e.g. the host).
    pub is_privileged_role: bool,
}

impl Entity {
    /// Row label: `name (ID: n)` plus `[DEAD]` / `[HOST]` markers.
    pub fn label(&self) -> String {
        let mut s = format!("{} (ID: {})", self.display_name, self.id);
        if !self.is_alive {
            s.push_str(" [DEAD]");
        }
        if self.is_privileged_role {
            s.push_str(" [HOST]");
        }
        s
    }
}

/// Source of live entities and of the local session's privilege.
pub trait EntityProvider: Send + Sync {
    /// Entities currently in the session, in display order.
    fn list_active_entities(&self) -> Vec<Entity>;

    /// Whether the local caller holds the privileged role.
    fn local_is_privileged(&self) -> bool;

    /// Case-insensitive exact name lookup.
    fn find_entity_by_name(&self, name: &str) -> Option<Entity> {
        let name = name.trim();
        self.list_active_entities()
            .into_iter()
            .find(|e| e.display_name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lobby(Vec<Entity>);

    impl EntityProvider for Lobby {
        fn list_active_entities(&self) -> Vec<Entity> {
            self.0.clone()
        }
        fn local_is_privileged(&self) -> bool {
            true
        }
    }

    fn entity(id: u64, name: &str, alive: bool, host: bool) -> Entity {
        Entity {
            id,
            display_name: name.to_string(),
            is_alive: alive,
            is_privileged_role: host,
        }
    }

    #[test]
    fn label_markers() {
        assert_eq!(entity(1, "Bob", true, false).label(), "Bob (ID: 1)");
        assert_eq!(
            entity(0, "Alice", false, true).label(),
            "Alice (ID: 0) [DEAD] [HOST]"
        );
    }

    #[test]
    fn find_by_name_ignores_case() {
        let lobby = Lobby(vec![entity(0, "Alice", true, true), entity(1, "Bob", true, false)]);
        assert_eq!(lobby.find_entity_by_name("bob").map(|e| e.id), Some(1));
        assert_eq!(lobby.find_entity_by_name(" ALICE ").map(|e| e.id), Some(0));
        assert!(lobby.find_entity_by_name("Carol").is_none());
    }
}
