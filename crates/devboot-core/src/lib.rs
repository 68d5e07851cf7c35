//! Core logic for the devboot monorepo bootstrapper.
//!
//! This crate defines the command runner, the resolved configuration,
//! and the orchestration routines that provision a local workspace.

pub mod action;
pub mod command;
pub mod config;
pub mod constants;
pub mod generator;
pub mod hooks;
pub mod pyproject;
pub mod python;
pub mod runner;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{Action, ActionParseError};
pub use command::CommandSpec;
pub use config::{BootstrapConfig, ConfigOverrides, FileConfig};
pub use runner::{CommandResult, CommandRunner, RunError, SystemRunner};
pub use workspace::WorkspaceInit;
