use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::command::CommandSpec;
use crate::config::BootstrapConfig;
use crate::constants::PRE_COMMIT_CONFIG;
use crate::runner::CommandRunner;

/// Installs the pre-commit git hooks, installing pre-commit itself through
/// the configured interpreter when it is missing.
#[instrument(skip_all)]
pub fn install_pre_commit(runner: &dyn CommandRunner, cfg: &BootstrapConfig) -> Result<()> {
    info!("installing pre-commit hooks");

    let probe =
        CommandSpec::new("pre-commit", ["--version"]).describe("Checking pre-commit installation...");
    if !runner.probe(&probe) {
        info!("pre-commit not found, installing");
        let install = CommandSpec::new(
            cfg.interpreter.to_string_lossy(),
            ["-m", "pip", "install", "pre-commit"],
        );
        runner
            .run(&install)
            .with_context(|| format!("failed to install pre-commit with {}", cfg.interpreter.display()))?;
    }

    runner
        .run(&CommandSpec::new("pre-commit", ["install", "--config", PRE_COMMIT_CONFIG]))
        .context("failed to install pre-commit hooks")?;

    info!("pre-commit hooks installed");
    Ok(())
}
