//! Error types for HELM.

use std::io;

/// Errors produced by the HELM console.
#[derive(Debug, thiserror::Error)]
pub enum HelmError {
    #[error("command not found: {0}")]
    NotFound(String),

    #[error("privilege denied: {0}")]
    PrivilegeDenied(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("execution failed: {0}")]
    Execution(String),

    #[error("command cancelled")]
    Cancelled,

    #[error("registry error: {0}")]
    Registry(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl HelmError {
    /// Convenience constructor for command body failures.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// The user-facing part of the error, without the category prefix.
    ///
    /// This is what ends up in the status line; `Display` is kept for logs.
    pub fn short_message(&self) -> String {
        match self {
            Self::NotFound(s)
            | Self::PrivilegeDenied(s)
            | Self::Validation(s)
            | Self::Execution(s)
            | Self::Registry(s)
            | Self::Config(s) => s.clone(),
            Self::Cancelled => "command cancelled".to_string(),
            Self::Io(e) => e.to_string(),
            Self::TomlParse(e) => e.message().to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, HelmError>;
