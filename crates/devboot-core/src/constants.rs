//! Constants used across the devboot workspace.

/// The filename for devboot's optional configuration.
pub const CONFIG_FILE: &str = "devboot.toml";

/// Lock file whose presence marks an initialized Nx workspace.
pub const MARKER_LOCKFILE: &str = "pnpm-lock.yaml";

/// Hook configuration passed to `pre-commit install`.
pub const PRE_COMMIT_CONFIG: &str = ".make_assets/.pre-commit-config.yaml";

pub const DEFAULT_PYTHON_VERSION: &str = "3.11.9";
pub const DEFAULT_NX_PYTHON_PLUGIN_VERSION: &str = "21.0.3";
pub const DEFAULT_GENERATOR_NAME: &str = "shared-python-tools";
pub const DEFAULT_INTERPRETER: &str = "python3";
pub const DEFAULT_PYPROJECT: &str = "pyproject.toml";

/// Identity written into the generated root pyproject.
pub const PROJECT_NAME: &str = "monorepo-dev-env";
pub const PROJECT_VERSION: &str = "0.0.1";

pub const PYENV_INSTALL_URL: &str = "https://github.com/pyenv/pyenv#installation";
