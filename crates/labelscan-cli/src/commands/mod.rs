//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use std::path::{Path, PathBuf};

use labelscan_core::{LabelscanConfig, LabelscanError};

/// Default config file location under the user config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("labelscan")
        .join("config.json")
}

/// Load configuration from an explicit path, the default location, or
/// built-in defaults when no file exists.
pub fn load_config(config_path: Option<&str>) -> labelscan_core::Result<LabelscanConfig> {
    if let Some(path) = config_path {
        return read_config(Path::new(path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        read_config(&default_path)
    } else {
        Ok(LabelscanConfig::default())
    }
}

fn read_config(path: &Path) -> labelscan_core::Result<LabelscanConfig> {
    LabelscanConfig::from_file(path)
        .map_err(|e| LabelscanError::Config(format!("{}: {}", path.display(), e)))
}
