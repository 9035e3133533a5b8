use pixel_art::{ConvertOptions, PalettePreset};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "PIXELIZER_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// ```yaml
/// default_profile: retro
/// profiles:
///   retro:
///     gridMax: 100
///     palettePreset: pico8
///     ditherStrength: 0
/// ```
///
/// Profile fields use the same camelCase names as JSON settings files;
/// missing fields take their defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Named option sets
    #[serde(default)]
    pub profiles: HashMap<String, ConvertOptions>,

    /// Profile used when none is named on the command line
    #[serde(default)]
    pub default_profile: Option<String>,
}

impl AppConfig {
    /// Resolve the configuration path: an explicit path wins over
    /// `PIXELIZER_CONFIG`.
    pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load configuration from `path`, falling back to the built-in
    /// profiles when there is no path or the file cannot be used.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using built-in profiles");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        profiles = config.profiles.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Options for the named profile, or for the default profile when
    /// `name` is `None`. Without either, the library defaults apply.
    pub fn profile(&self, name: Option<&str>) -> Result<ConvertOptions, AppError> {
        let Some(name) = name.or(self.default_profile.as_deref()) else {
            return Ok(ConvertOptions::default());
        };

        self.profiles
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::UnknownProfile(name.to_string()))
    }

    /// Profile names in sorted order.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert("default".to_string(), ConvertOptions::default());
        profiles.insert(
            "portrait".to_string(),
            ConvertOptions::default().polished_portrait(true),
        );
        profiles.insert(
            "retro".to_string(),
            ConvertOptions::default()
                .grid_max(100)
                .palette_preset(PalettePreset::Pico8)
                .dither_strength(0.0),
        );

        Self {
            profiles,
            default_profile: Some("default".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.profile_names(), vec!["default", "portrait", "retro"]);
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.profile(None).unwrap(), ConvertOptions::default());
    }

    #[test]
    fn test_builtin_retro_profile() {
        let options = AppConfig::default().profile(Some("retro")).unwrap();
        assert_eq!(options.grid_max, 100);
        assert_eq!(options.palette_preset, PalettePreset::Pico8);
        assert_eq!(options.dither_strength, 0.0);
    }

    #[test]
    fn test_unknown_profile() {
        let err = AppConfig::default().profile(Some("poster")).unwrap_err();
        assert!(matches!(err, AppError::UnknownProfile(name) if name == "poster"));
    }

    #[test]
    fn test_parse_yaml_profiles() {
        let yaml = r#"
default_profile: comic
profiles:
  comic:
    gridMax: 120
    palettePreset: retro_comic
    edgeThreshold: 0.3
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        let options = config.profile(None).unwrap();
        assert_eq!(options.grid_max, 120);
        assert_eq!(options.palette_preset, PalettePreset::RetroComic);
        assert_eq!(options.edge_threshold, 0.3);
        // Unspecified fields keep their defaults
        assert_eq!(options.palette_size, 12);
        assert!(options.palette_smoothing);
    }

    #[test]
    fn test_yaml_without_default_profile_uses_library_defaults() {
        let config = AppConfig::from_yaml("profiles: {}").unwrap();
        assert!(config.profiles.is_empty());
        assert_eq!(config.profile(None).unwrap(), ConvertOptions::default());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("missing.yaml")));
        assert_eq!(config.profile_names(), vec!["default", "portrait", "retro"]);
    }

    #[test]
    fn test_load_invalid_yaml_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "profiles: [not, a, map]").unwrap();
        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.default_profile.as_deref(), Some("default"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "profiles:\n  tiny:\n    gridMax: 16").unwrap();
        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.profile(Some("tiny")).unwrap().grid_max, 16);
        assert_eq!(config.default_profile, None);
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = AppConfig::config_path(Some(PathBuf::from("custom.yaml")));
        assert_eq!(path, Some(PathBuf::from("custom.yaml")));
    }
}
