use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use devboot_core::constants::CONFIG_FILE;
use devboot_core::{
    generator, hooks, python, workspace, Action, BootstrapConfig, CommandRunner, ConfigOverrides,
    FileConfig, SystemRunner, WorkspaceInit,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod styles;

use styles as s;

/// The command-line interface for devboot.
#[derive(Debug, Parser)]
#[command(name = "devboot")]
#[command(version)]
#[command(styles = s::get_clap_styles())]
#[command(about = "Bootstrap a local Nx + Python monorepo development environment")]
#[command(
    long_about = "devboot provisions a monorepo workspace by driving external tools in a fixed
order. Every step checks first whether its work is already done, so re-running
an action after a failure is always safe.

Actions:
  init_nx                      Create the pnpm Nx workspace and add @nxlv/python
  init_python_env              Pin Python with pyenv, ensure uv, write pyproject.toml
  install_custom_py_generator  Report the shared Python generator (provided by Nx)
  install_pre_commit           Install pre-commit and its git hooks
"
)]
#[command(
    after_help = "\x1b[1;32mExamples:\x1b[0m\n  \x1b[36mdevboot init_nx\x1b[0m                                 \x1b[2m# Create the Nx workspace\x1b[0m\n  \x1b[36mdevboot init_python_env --python-version 3.12.1\x1b[0m \x1b[2m# Pin a different Python\x1b[0m\n  \x1b[36mdevboot install_pre_commit\x1b[0m                      \x1b[2m# Install git hooks\x1b[0m"
)]
pub(crate) struct Cli {
    /// Action to perform, for example: `init_nx`, `init_python_env`, `install_pre_commit`
    action: Option<String>,
    /// Path to a devboot config file (defaults to ./devboot.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Python version to install via pyenv.
    #[arg(long)]
    python_version: Option<String>,
    /// Version of the @nxlv/python Nx plugin.
    #[arg(long)]
    nx_python_plugin_version: Option<String>,
    /// Install uv via cargo instead of the monorepo venv pip.
    #[arg(long, default_value_t = false, overrides_with = "no_rust_toolchain_uv_install")]
    rust_toolchain_uv_install: bool,
    /// Install uv via the monorepo venv pip, even if the config file asks for cargo.
    #[arg(long, default_value_t = false, overrides_with = "rust_toolchain_uv_install")]
    no_rust_toolchain_uv_install: bool,
    /// Path to the root pyproject.toml file; a relative path is resolved
    /// against the monorepo root, not the current directory.
    #[arg(long)]
    root_pyproject_toml: Option<PathBuf>,
    /// Path to the monorepo root directory. Every command runs here and the
    /// lock file, venv pip and pyproject paths are resolved against it.
    #[arg(long)]
    monorepo_root: Option<PathBuf>,
    /// Name of the custom Python generator plugin.
    #[arg(long)]
    custom_py_gen_plugin_name: Option<String>,
    /// Python interpreter used to pip install missing tools.
    #[arg(long)]
    interpreter: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    debug!("parsed cli arguments: {:?}", cli);

    let action = match parse_action(cli.action.as_deref()) {
        Ok(action) => action,
        Err(message) => {
            eprintln!("{}error:{} {message}\n", s::ERROR.render(), s::ERROR.render_reset());
            Cli::command().print_help()?;
            println!();
            std::process::exit(1);
        }
    };

    let cwd = std::env::current_dir().context("unable to determine the current directory")?;
    let cfg = build_config(&cli, &cwd)?;
    debug!("resolved configuration: {:?}", cfg);

    let runner = SystemRunner::new(&cfg.monorepo_root);
    execute(action, &cfg, &runner)
}

fn parse_action(raw: Option<&str>) -> std::result::Result<Action, String> {
    let expected = Action::ALL
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match raw {
        Some(value) => Action::from_str(value).map_err(|e| format!("{e} (expected one of: {expected})")),
        None => Err(format!("missing action (expected one of: {expected})")),
    }
}

/// Resolves settings from defaults, the optional config file and CLI flags.
fn build_config(cli: &Cli, cwd: &Path) -> Result<BootstrapConfig> {
    let file = match &cli.config {
        Some(path) => {
            let path = cwd.join(path);
            Some(
                FileConfig::load_from_file(&path)
                    .with_context(|| format!("unable to load config '{}'", path.display()))?,
            )
        }
        None => {
            let default = cwd.join(CONFIG_FILE);
            if default.is_file() {
                debug!("using config file {}", default.display());
                Some(FileConfig::load_from_file(&default)?)
            } else {
                None
            }
        }
    };

    let overrides = ConfigOverrides {
        monorepo_root: cli.monorepo_root.clone(),
        root_pyproject_toml: cli.root_pyproject_toml.clone(),
        python_version: cli.python_version.clone(),
        nx_python_plugin_version: cli.nx_python_plugin_version.clone(),
        rust_toolchain_uv_install: uv_install_override(cli),
        custom_py_gen_plugin_name: cli.custom_py_gen_plugin_name.clone(),
        interpreter: cli.interpreter.clone(),
    };

    Ok(BootstrapConfig::resolve(cwd, file, overrides))
}

/// Maps the paired uv flags to an override; the last one given wins.
fn uv_install_override(cli: &Cli) -> Option<bool> {
    if cli.rust_toolchain_uv_install {
        Some(true)
    } else if cli.no_rust_toolchain_uv_install {
        Some(false)
    } else {
        None
    }
}

/// Runs a parsed action against the resolved configuration.
fn execute(action: Action, cfg: &BootstrapConfig, runner: &dyn CommandRunner) -> Result<()> {
    match action {
        Action::InitNx => match workspace::init_nx(runner, cfg)? {
            WorkspaceInit::Created => println!("init_nx: workspace created"),
            WorkspaceInit::AlreadyInitialized => println!("init_nx: workspace already initialized"),
        },
        Action::InitPythonEnv => {
            python::init_python_env(runner, cfg)?;
            println!(
                "init_python_env: python {} pinned, wrote {}",
                cfg.python_version,
                cfg.root_pyproject_toml.display()
            );
        }
        Action::InstallCustomPyGenerator => {
            generator::install_custom_py_generator(cfg)?;
            println!("install_custom_py_generator: {} ready", cfg.custom_py_gen_plugin_name);
        }
        Action::InstallPreCommit => {
            hooks::install_pre_commit(runner, cfg)?;
            println!("install_pre_commit: hooks installed");
        }
    }

    Ok(())
}
