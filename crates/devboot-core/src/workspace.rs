use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::command::CommandSpec;
use crate::config::BootstrapConfig;
use crate::constants::MARKER_LOCKFILE;
use crate::runner::CommandRunner;

/// Outcome of [`init_nx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceInit {
    Created,
    AlreadyInitialized,
}

/// Creates a pnpm-backed Nx workspace with the Python plugin, unless the
/// lock file already marks one.
#[instrument(skip_all)]
pub fn init_nx(runner: &dyn CommandRunner, cfg: &BootstrapConfig) -> Result<WorkspaceInit> {
    info!("initializing Nx workspace with pnpm");

    let marker = cfg.monorepo_root.join(MARKER_LOCKFILE);
    if marker.exists() {
        info!("Nx workspace already initialized ({} present), skipping", marker.display());
        return Ok(WorkspaceInit::AlreadyInitialized);
    }

    runner
        .run(&create_workspace())
        .context("failed to create Nx workspace")?;
    runner
        .run(&add_python_plugin(&cfg.nx_python_plugin_version))
        .context("failed to add the @nxlv/python plugin")?;

    info!("Nx workspace ready");
    Ok(WorkspaceInit::Created)
}

fn create_workspace() -> CommandSpec {
    CommandSpec::new(
        "npx",
        [
            "create-nx-workspace@latest",
            ".",
            "--nxCloud=skip",
            "--preset=react-standalone",
            "--pm=pnpm",
        ],
    )
    .describe("Running npx create-nx-workspace...")
}

fn add_python_plugin(version: &str) -> CommandSpec {
    CommandSpec::new("pnpm", ["add".to_string(), "-D".to_string(), format!("@nxlv/python@{version}")])
        .describe("Adding @nxlv/python plugin...")
}
