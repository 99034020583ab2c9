//! Foundation types for HELM.
//!
//! Shared by every HELM crate: the error taxonomy, discrete navigation
//! events, configuration, and the collaborator traits the console consumes
//! (entity provider, session privilege).

pub mod config;
pub mod entity;
pub mod error;
pub mod input;
