//! Command descriptors, arguments, and the executable body trait.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use helm_types::error::{HelmError, Result};
use tokio_util::sync::CancellationToken;

/// Privilege classification of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Normal,
    Debug,
    Privileged,
}

impl Tier {
    /// Lookup order used by the registry.
    pub const PRECEDENCE: [Tier; 3] = [Tier::Normal, Tier::Privileged, Tier::Debug];

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Debug => 1,
            Self::Privileged => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Debug => "debug",
            Self::Privileged => "privileged",
        })
    }
}

/// Key fragments that mark a parameter as numeric.
const NUMERIC_KEYS: &[&str] = &[
    "duration", "amount", "damage", "delay", "force", "scale", "quantity",
];

/// How a parameter value is interpreted, inferred from its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Number,
    /// Names a live entity (`player`, `targetPlayer`, ...).
    Entity,
}

impl ParamKind {
    /// Infer the kind from a parameter key (case-insensitive).
    pub fn infer(key: &str) -> Self {
        let key = key.to_ascii_lowercase();
        if NUMERIC_KEYS.iter().any(|k| key.contains(k)) {
            Self::Number
        } else if key.contains("player") {
            Self::Entity
        } else {
            Self::Text
        }
    }
}

/// One declared argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub description: String,
    pub optional: bool,
}

impl Parameter {
    /// A required parameter whose description is its key.
    pub fn required(key: &str) -> Self {
        Self {
            key: key.to_string(),
            description: key.to_string(),
            optional: false,
        }
    }

    /// An optional parameter.
    pub fn optional(key: &str) -> Self {
        Self {
            optional: true,
            ..Self::required(key)
        }
    }

    /// Replace the description shown next to the input field.
    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn kind(&self) -> ParamKind {
        ParamKind::infer(&self.key)
    }
}

/// Immutable command descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Display name.
    pub name: String,
    /// Lookup key, unique within its tier.
    pub syntax: String,
    pub parameters: Vec<Parameter>,
    pub tier: Tier,
}

impl Command {
    pub fn new(name: &str, syntax: &str, tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            syntax: syntax.to_string(),
            parameters: Vec::new(),
            tier,
        }
    }

    /// Append parameters.
    pub fn with_params(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(params);
        self
    }

    /// Append required parameters by key.
    pub fn with_keys(self, keys: &[&str]) -> Self {
        self.with_params(keys.iter().map(|k| Parameter::required(k)))
    }

    pub fn is_privileged(&self) -> bool {
        self.tier == Tier::Privileged
    }

    /// `true` if the first parameter names an entity.
    pub fn targets_entity(&self) -> bool {
        self.parameters
            .first()
            .is_some_and(|p| p.kind() == ParamKind::Entity)
    }

    /// Usage string, e.g. `poison <player> <damage> [delay]`.
    pub fn usage(&self) -> String {
        let mut s = self.syntax.clone();
        for p in &self.parameters {
            if p.optional {
                s.push_str(&format!(" [{}]", p.key));
            } else {
                s.push_str(&format!(" <{}>", p.key));
            }
        }
        s
    }
}

/// Ordered argument tokens passed to a command body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    tokens: Vec<String>,
}

impl Arguments {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Token at `index`, or an execution error naming the parameter.
    pub fn require(&self, index: usize, name: &str) -> Result<&str> {
        self.get(index)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| HelmError::execution(format!("missing {name}")))
    }

    /// Parse the token at `index`.
    pub fn parse<T: FromStr>(&self, index: usize, name: &str) -> Result<T> {
        let raw = self.require(index, name)?;
        raw.trim()
            .parse()
            .map_err(|_| HelmError::execution(format!("{name} must be a number!")))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Arguments {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl From<&[&str]> for Arguments {
    fn from(tokens: &[&str]) -> Self {
        Self::new(tokens.iter().map(|s| s.to_string()).collect())
    }
}

/// The effectful part of a command, supplied by the host integration.
#[async_trait]
pub trait CommandBody: Send + Sync {
    /// Run the command. Long-running bodies should observe `cancel`.
    async fn execute(&self, args: &Arguments, cancel: CancellationToken) -> Result<()>;
}

/// Builds the body for a catalog entry.
pub type BodyFactory = Box<dyn FnOnce() -> Arc<dyn CommandBody>>;

/// One row of the static command catalog.
pub struct CatalogEntry {
    pub command: Command,
    pub factory: BodyFactory,
}

impl CatalogEntry {
    /// Entry whose body is built by `factory` at registry construction.
    pub fn new(command: Command, factory: impl FnOnce() -> Arc<dyn CommandBody> + 'static) -> Self {
        Self {
            command,
            factory: Box::new(factory),
        }
    }

    /// Entry around an already constructed body.
    pub fn with_body(command: Command, body: Arc<dyn CommandBody>) -> Self {
        Self::new(command, move || body)
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
