//! Command layer for HELM.
//!
//! Tiered command registry, the async dispatcher that runs command bodies,
//! the shared expiring status line, and the console-line tokenizer.

pub mod command;
pub mod dispatcher;
pub mod echo;
pub mod registry;
pub mod status;
pub mod tokenize;

pub use command::{
    Arguments, CatalogEntry, Command, CommandBody, ParamKind, Parameter, Tier,
};
pub use dispatcher::{CommandResult, Dispatcher, Invocation, InvocationSource};
pub use echo::{Echo, LogEcho, MemoryEcho};
pub use registry::{CommandRegistry, RegisteredCommand};
pub use status::{StatusChannel, StatusEntry, StatusStamp};
