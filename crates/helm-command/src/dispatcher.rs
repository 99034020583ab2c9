//! Command dispatcher.
//!
//! Resolves a syntax against the registry, applies the tier gates and runs
//! the body in its own task. Every outcome, including a panicking body or a
//! cancelled token, comes back as a [`CommandResult`]; nothing propagates.

use std::fmt;
use std::sync::Arc;

use helm_types::error::HelmError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::command::{Arguments, Tier};
use crate::registry::CommandRegistry;
use crate::tokenize;

/// Where an invocation came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationSource {
    /// Selected in the menu.
    Menu,
    /// Typed as a console line.
    Console,
    /// Fired programmatically by the host.
    Direct,
}

impl fmt::Display for InvocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Menu => "menu",
            Self::Console => "console",
            Self::Direct => "direct",
        })
    }
}

/// Caller context for one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub source: InvocationSource,
    /// Whether the caller holds the privileged role.
    pub privileged: bool,
}

impl Invocation {
    pub fn menu(privileged: bool) -> Self {
        Self {
            source: InvocationSource::Menu,
            privileged,
        }
    }

    pub fn console(privileged: bool) -> Self {
        Self {
            source: InvocationSource::Console,
            privileged,
        }
    }

    pub fn direct(privileged: bool) -> Self {
        Self {
            source: InvocationSource::Direct,
            privileged,
        }
    }
}

/// Outcome of one execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    /// User-facing text, shown in the status line.
    pub message: Option<String>,
    /// Diagnostic detail for logs.
    pub error: Option<Arc<HelmError>>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            error: None,
        }
    }

    fn failure_with(message: impl Into<String>, error: HelmError) -> Self {
        Self {
            error: Some(Arc::new(error)),
            ..Self::failure(message)
        }
    }

    /// The message, or an empty string.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Executes registry commands. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    allow_debug: bool,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, allow_debug: bool) -> Self {
        Self {
            registry,
            allow_debug,
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn allows_debug(&self) -> bool {
        self.allow_debug
    }

    /// Execute with a fresh, never-cancelled token.
    pub async fn execute(
        &self,
        syntax: &str,
        args: &Arguments,
        invocation: Invocation,
    ) -> CommandResult {
        self.execute_with_token(syntax, args, invocation, CancellationToken::new())
            .await
    }

    /// Execute, aborting the body if `token` is cancelled first.
    pub async fn execute_with_token(
        &self,
        syntax: &str,
        args: &Arguments,
        invocation: Invocation,
        token: CancellationToken,
    ) -> CommandResult {
        let Some(entry) = self.registry.resolve(syntax) else {
            log::warn!(
                "Command not found: {syntax} (source: {})",
                invocation.source
            );
            return CommandResult::failure_with(
                "command not found",
                HelmError::NotFound(syntax.to_string()),
            );
        };

        match entry.command.tier {
            Tier::Privileged if !invocation.privileged => {
                log::warn!(
                    "Privileged command denied: {syntax} (source: {})",
                    invocation.source
                );
                return CommandResult::failure_with(
                    "requires elevated privileges",
                    HelmError::PrivilegeDenied(syntax.to_string()),
                );
            },
            Tier::Debug if !self.allow_debug => {
                log::warn!(
                    "Debug command disabled: {syntax} (source: {})",
                    invocation.source
                );
                return CommandResult::failure_with(
                    "requires debug mode",
                    HelmError::PrivilegeDenied(syntax.to_string()),
                );
            },
            _ => {},
        }

        log::debug!("Executing `{syntax}` (source: {})", invocation.source);
        let body = Arc::clone(&entry.body);
        let task_args = args.clone();
        let task_token = token.clone();
        let mut task = tokio::spawn(async move { body.execute(&task_args, task_token).await });

        let joined = tokio::select! {
            joined = &mut task => joined,
            () = token.cancelled() => {
                task.abort();
                log::info!("Command cancelled: {syntax}");
                return CommandResult::failure_with("command cancelled", HelmError::Cancelled);
            },
        };

        match joined {
            Ok(Ok(())) => CommandResult::ok(),
            Ok(Err(e)) => {
                log::error!("Command `{syntax}` failed: {e}");
                CommandResult::failure_with(e.short_message(), e)
            },
            Err(join_err) if join_err.is_panic() => {
                log::error!("Command `{syntax}` panicked");
                CommandResult::failure_with(
                    "command panicked",
                    HelmError::execution(format!("`{syntax}` panicked")),
                )
            },
            Err(_) => CommandResult::failure_with("command cancelled", HelmError::Cancelled),
        }
    }

    /// Parse and execute a typed console line such as `/tp Bob Alice`.
    pub async fn execute_line(&self, line: &str, privileged: bool) -> CommandResult {
        let parsed = match tokenize::parse_line(line) {
            Ok(parsed) => parsed,
            Err(e) => return CommandResult::failure_with(e.short_message(), e),
        };
        let Some((syntax, tokens)) = parsed else {
            return CommandResult::failure("empty command");
        };
        self.execute(&syntax, &Arguments::new(tokens), Invocation::console(privileged))
            .await
    }

    /// Fire and forget. Failures are logged, nothing is returned to the
    /// caller. Must be called from within a tokio runtime.
    pub fn execute_direct(&self, syntax: &str, args: Arguments, privileged: bool) -> JoinHandle<()> {
        let dispatcher = self.clone();
        let syntax = syntax.to_string();
        tokio::spawn(async move {
            let result = dispatcher
                .execute(&syntax, &args, Invocation::direct(privileged))
                .await;
            if !result.success {
                log::warn!("Direct command `{syntax}` failed: {}", result.message());
            }
        })
    }
}
