use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::fields::FlydownLocation;

/// Editor-wide switches the field toolkit consults.
///
/// The shell owns the settings file; everything here has a working default so
/// the toolkit runs unconfigured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorSettings {
    /// Whether the collapse-block UI is available. When off, the context menu
    /// never gains the parameter-orientation entry.
    #[serde(default = "default_collapse_enabled")]
    pub collapse_enabled: bool,
    /// Where flydowns open relative to their field.
    #[serde(default, rename = "flydownLocation")]
    pub flydown_location: FlydownLocation,
}

fn default_collapse_enabled() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            collapse_enabled: true,
            flydown_location: FlydownLocation::default(),
        }
    }
}

/// Load settings from a JSON file, falling back to defaults when the file is
/// missing or malformed.
#[instrument(name = "load_settings", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_settings(path: impl AsRef<Path>) -> EditorSettings {
    let path = path.as_ref();

    if !path.exists() {
        info!("Settings file not found, using defaults");
        return EditorSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("Loaded editor settings");
            settings
        }
        Err(e) => {
            warn!(error = %e, "Failed to load settings, using defaults");
            EditorSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> Result<EditorSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = EditorSettings::default();
        assert!(settings.collapse_enabled);
        assert_eq!(settings.flydown_location, FlydownLocation::Below);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path().join("nope.json"));
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"collapse_enabled": false}}"#).unwrap();

        let settings = load_settings(&path);
        assert!(!settings.collapse_enabled);
        assert_eq!(settings.flydown_location, FlydownLocation::Below);
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"collapse_enabled": true, "flydownLocation": "right"}}"#
        )
        .unwrap();

        let settings = load_settings(&path);
        assert!(settings.collapse_enabled);
        assert_eq!(settings.flydown_location, FlydownLocation::Right);
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "not json at all").unwrap();

        let settings = load_settings(&path);
        assert_eq!(settings, EditorSettings::default());
    }
}
