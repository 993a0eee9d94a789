//! Configuration module for sourcefetch
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Settings are loaded once by the binary and handed to the pipeline explicitly.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "SOURCEFETCH_SETTINGS_PATH";

/// Load settings from an explicit path, the usual locations, or defaults.
///
/// Environment overrides are applied last and the result is validated.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match locate(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates = [
        Some(PathBuf::from("sourcefetch.yml")),
        dirs::config_dir().map(|p| p.join("sourcefetch/settings.yml")),
    ];

    candidates.into_iter().flatten().find(|p| p.exists())
}
