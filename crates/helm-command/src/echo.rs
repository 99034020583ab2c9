//! Out-of-band echo of command failures (in-game chat, overlay log, ...).

use std::sync::{Arc, Mutex, PoisonError};

/// Receives failure messages for display outside the menu.
pub trait Echo: Send + Sync {
    fn echo(&self, message: &str);
}

/// Echo that writes to the log at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEcho;

impl Echo for LogEcho {
    fn echo(&self, message: &str) {
        log::info!("[SYSTEM] {message}");
    }
}

/// Echo that keeps messages in memory, newest last.
#[derive(Debug, Default, Clone)]
pub struct MemoryEcho {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryEcho {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the echoed messages.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all echoed messages.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Echo for MemoryEcho {
    fn echo(&self, message: &str) {
        if message.trim().is_empty() {
            return;
        }
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_echo_collects() {
        let echo = MemoryEcho::new();
        let shared = echo.clone();
        echo.echo("first");
        echo.echo("   ");
        shared.echo("second");
        assert_eq!(echo.lines(), vec!["first", "second"]);
        shared.clear();
        assert!(echo.lines().is_empty());
    }
}
