use anyhow::Result;
use tracing::{info, instrument};

use crate::config::BootstrapConfig;

/// The shared Python generator ships with the Nx plugin added by
/// `init_nx`, so nothing is executed here.
#[instrument(skip_all, fields(generator = %cfg.custom_py_gen_plugin_name))]
pub fn install_custom_py_generator(cfg: &BootstrapConfig) -> Result<()> {
    info!(
        "custom Python generator '{}' is provided by the Nx workspace, skipping installation",
        cfg.custom_py_gen_plugin_name
    );
    Ok(())
}
