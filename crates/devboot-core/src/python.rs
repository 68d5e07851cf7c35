use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::command::CommandSpec;
use crate::config::BootstrapConfig;
use crate::constants::PYENV_INSTALL_URL;
use crate::pyproject;
use crate::runner::CommandRunner;

/// Pins the Python runtime with pyenv, makes sure uv is available and
/// rewrites the root pyproject.
#[instrument(skip_all, fields(python = %cfg.python_version))]
pub fn init_python_env(runner: &dyn CommandRunner, cfg: &BootstrapConfig) -> Result<()> {
    info!("setting up Python environment with pyenv and uv");

    runner
        .run(&CommandSpec::new("pyenv", ["--version"]).describe("Checking pyenv installation..."))
        .with_context(|| format!("pyenv not found. Please install pyenv first: {PYENV_INSTALL_URL}"))?;

    info!("installing Python {}", cfg.python_version);
    // pyenv exits nonzero when the version is already installed.
    runner
        .run(&CommandSpec::new("pyenv", ["install", cfg.python_version.as_str()]).unchecked())
        .context("failed to run pyenv install")?;

    info!("setting local Python version to {}", cfg.python_version);
    runner
        .run(&CommandSpec::new("pyenv", ["local", cfg.python_version.as_str()]))
        .context("failed to pin the local Python version")?;

    ensure_uv(runner, cfg)?;

    info!("writing {}", cfg.root_pyproject_toml.display());
    pyproject::write(&cfg.root_pyproject_toml)?;

    info!("Python environment setup complete");
    Ok(())
}

fn ensure_uv(runner: &dyn CommandRunner, cfg: &BootstrapConfig) -> Result<()> {
    let probe = CommandSpec::new("uv", ["--version"]).describe("Checking uv installation...");
    if runner.probe(&probe) {
        info!("uv already installed, skipping");
        return Ok(());
    }

    let install = if cfg.rust_toolchain_uv_install {
        info!("installing uv via cargo (Rust toolchain required)");
        CommandSpec::new("cargo", ["install", "uv"])
    } else {
        info!("installing uv via the monorepo venv pip");
        let pip = cfg.monorepo_root.join(".venv").join("bin").join("pip");
        CommandSpec::new(pip.to_string_lossy(), ["install", "uv"])
    };

    runner.run(&install).context("failed to install uv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{argv, Reply, ScriptedRunner};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn cfg_in(dir: &Path) -> BootstrapConfig {
        let mut cfg = BootstrapConfig::new(dir.join("monorepo"));
        cfg.root_pyproject_toml = dir.join("pyproject.toml");
        cfg.python_version = "3.9.5".to_string();
        cfg
    }

    #[test]
    fn tools_present_issues_four_commands_and_writes_pyproject() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let runner = ScriptedRunner::default();

        init_python_env(&runner, &cfg).expect("setup should succeed");

        assert_eq!(
            runner.argvs(),
            vec![
                argv(&["pyenv", "--version"]),
                argv(&["pyenv", "install", "3.9.5"]),
                argv(&["pyenv", "local", "3.9.5"]),
                argv(&["uv", "--version"]),
            ]
        );
        let content = fs::read_to_string(&cfg.root_pyproject_toml).unwrap();
        assert!(content.contains("name = \"monorepo-dev-env\""));
    }

    #[test]
    fn already_installed_python_is_not_fatal() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let runner = ScriptedRunner::new([Reply::Exit(0), Reply::Exit(1)]);

        init_python_env(&runner, &cfg).expect("pyenv install failure is tolerated");

        assert!(!runner.calls()[1].check);
        assert_eq!(runner.calls().len(), 4);
    }

    #[test]
    fn missing_uv_installs_with_venv_pip() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let runner = ScriptedRunner::new([
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Exit(1),
        ]);

        init_python_env(&runner, &cfg).expect("setup should succeed");

        let calls = runner.argvs();
        assert_eq!(calls.len(), 5);
        let pip = cfg.monorepo_root.join(".venv").join("bin").join("pip");
        assert_eq!(
            calls[4],
            vec![pip.to_string_lossy().into_owned(), "install".to_string(), "uv".to_string()]
        );
        assert!(cfg.root_pyproject_toml.exists());
    }

    #[test]
    fn missing_uv_installs_with_cargo_when_requested() {
        let dir = tempdir().unwrap();
        let mut cfg = cfg_in(dir.path());
        cfg.rust_toolchain_uv_install = true;
        let runner = ScriptedRunner::new([
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Missing,
        ]);

        init_python_env(&runner, &cfg).expect("setup should succeed");

        let calls = runner.argvs();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[4], argv(&["cargo", "install", "uv"]));
    }

    #[test]
    fn missing_pyenv_fails_before_any_setup() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let runner = ScriptedRunner::new([Reply::Missing]);

        let err = init_python_env(&runner, &cfg).expect_err("must fail");

        assert_eq!(runner.calls().len(), 1);
        assert!(err.to_string().contains(PYENV_INSTALL_URL));
        assert!(!cfg.root_pyproject_toml.exists());
    }

    #[test]
    fn failed_uv_install_is_fatal() {
        let dir = tempdir().unwrap();
        let cfg = cfg_in(dir.path());
        let runner = ScriptedRunner::new([
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Exit(0),
            Reply::Exit(1),
            Reply::Missing,
        ]);

        let err = init_python_env(&runner, &cfg).expect_err("must fail");

        assert!(format!("{err:#}").contains("failed to install uv"));
        assert!(!cfg.root_pyproject_toml.exists());
    }
}
