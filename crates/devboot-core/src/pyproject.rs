use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::constants::{PROJECT_NAME, PROJECT_VERSION};

/// Renders the root `pyproject.toml` written by the runtime init.
pub fn render() -> String {
    include_str!("../resources/pyproject.toml.tmpl")
        .replace("{{PROJECT_NAME}}", PROJECT_NAME)
        .replace("{{PROJECT_VERSION}}", PROJECT_VERSION)
}

/// Overwrites `path` with the rendered template.
pub fn write(path: &Path) -> Result<()> {
    let content = render();
    fs::write(path, &content).with_context(|| format!("failed to write '{}'", path.display()))?;
    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
