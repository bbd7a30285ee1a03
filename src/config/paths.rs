use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::types::BrevoError;

/// Get the path to the config.json file
/// `BREVO_PACK_CONFIG` wins; otherwise looks next to the install root (parent of bin folder)
pub(super) fn get_config_path() -> Result<PathBuf, BrevoError> {
    if let Ok(custom) = env::var("BREVO_PACK_CONFIG") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            debug!(path = %trimmed, "Using config path from environment");
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Executable is at: install_root/bin/brevo-pack
    // Config should be at: install_root/config.json
    if let Ok(exe_path) = env::current_exe() {
        debug!(path = %exe_path.display(), "Executable path detected");

        if let Some(app_root) = exe_path.parent().and_then(|bin_dir| bin_dir.parent()) {
            let config_path = app_root.join("config.json");
            if config_path.exists() {
                debug!(path = %config_path.display(), "Looking for config");
                return Ok(config_path);
            }
        }
    }

    warn!("Using fallback: looking for config.json in current directory");
    Ok(PathBuf::from("config.json"))
}
