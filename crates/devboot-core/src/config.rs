use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::constants::*;

/// Settings for a bootstrap run, fully resolved.
///
/// Every path is absolute or relative to a caller-chosen base; nothing in the
/// routines consults the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub monorepo_root: PathBuf,
    pub root_pyproject_toml: PathBuf,
    pub python_version: String,
    pub nx_python_plugin_version: String,
    /// Install uv with `cargo install` instead of the venv pip.
    pub rust_toolchain_uv_install: bool,
    pub custom_py_gen_plugin_name: String,
    /// Python used to `pip install` missing tools.
    pub interpreter: PathBuf,
}

impl BootstrapConfig {
    /// Defaults for a monorepo rooted at `monorepo_root`.
    pub fn new(monorepo_root: impl Into<PathBuf>) -> Self {
        let monorepo_root = monorepo_root.into();
        Self {
            root_pyproject_toml: monorepo_root.join(DEFAULT_PYPROJECT),
            monorepo_root,
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            nx_python_plugin_version: DEFAULT_NX_PYTHON_PLUGIN_VERSION.to_string(),
            rust_toolchain_uv_install: false,
            custom_py_gen_plugin_name: DEFAULT_GENERATOR_NAME.to_string(),
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
        }
    }

    /// Layers `file` and then `overrides` over the defaults.
    ///
    /// Relative roots resolve against `cwd`; a relative pyproject path
    /// resolves against the final monorepo root.
    pub fn resolve(cwd: &Path, file: Option<FileConfig>, overrides: ConfigOverrides) -> Self {
        let file = file.unwrap_or_default();

        let root = overrides
            .monorepo_root
            .or(file.paths.monorepo_root)
            .map(|p| cwd.join(p))
            .unwrap_or_else(|| cwd.to_path_buf());
        let mut cfg = Self::new(root);

        if let Some(pyproject) = overrides
            .root_pyproject_toml
            .or(file.paths.root_pyproject_toml)
        {
            cfg.root_pyproject_toml = cfg.monorepo_root.join(pyproject);
        }
        if let Some(version) = overrides.python_version.or(file.python.version) {
            cfg.python_version = version;
        }
        if let Some(version) = overrides
            .nx_python_plugin_version
            .or(file.nx.python_plugin_version)
        {
            cfg.nx_python_plugin_version = version;
        }
        if let Some(flag) = overrides
            .rust_toolchain_uv_install
            .or(file.python.uv_via_cargo)
        {
            cfg.rust_toolchain_uv_install = flag;
        }
        if let Some(name) = overrides.custom_py_gen_plugin_name.or(file.nx.generator) {
            cfg.custom_py_gen_plugin_name = name;
        }
        if let Some(interpreter) = overrides.interpreter.or(file.python.interpreter) {
            cfg.interpreter = interpreter;
        }

        cfg
    }
}

/// Explicit settings that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub monorepo_root: Option<PathBuf>,
    pub root_pyproject_toml: Option<PathBuf>,
    pub python_version: Option<String>,
    pub nx_python_plugin_version: Option<String>,
    pub rust_toolchain_uv_install: Option<bool>,
    pub custom_py_gen_plugin_name: Option<String>,
    pub interpreter: Option<PathBuf>,
}

/// On-disk `devboot.toml` layout.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub python: PythonSection,
    #[serde(default)]
    pub nx: NxSection,
    #[serde(default)]
    pub paths: PathsSection,
}

impl FileConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let cfg = toml::from_str::<Self>(&text)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PythonSection {
    pub version: Option<String>,
    pub interpreter: Option<PathBuf>,
    pub uv_via_cargo: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NxSection {
    pub python_plugin_version: Option<String>,
    pub generator: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    pub monorepo_root: Option<PathBuf>,
    pub root_pyproject_toml: Option<PathBuf>,
}
