use std::path::{Path, PathBuf};

use formwork_tui::View;
use thiserror::Error;

use super::types::{
    DEFAULT_DELAY_MS, DEFAULT_START_PANEL, DEFAULT_SUCCESS_RATE, FormworkConfig,
    RawFormworkConfig, RawSubmissionConfig, RawUiConfig, SubmissionConfig, UiConfig,
};

/// Errors while reading configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid [ui] start_panel: {0}")]
    StartPanel(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user, then project, then `explicit`)
    pub fn load(explicit: Option<&Path>) -> Result<FormworkConfig, ConfigError> {
        let layers = [Self::user_config_path(), Self::project_config_path()];
        Self::load_from(&layers, explicit)
    }

    /// Merges `layers` in order, skipping files that do not exist. The
    /// `explicit` file goes last and must exist.
    pub fn load_from(
        layers: &[PathBuf],
        explicit: Option<&Path>,
    ) -> Result<FormworkConfig, ConfigError> {
        let mut raw = RawFormworkConfig::default();

        for path in layers.iter().filter(|p| p.exists()) {
            raw = Self::merge_raw(raw, Self::read(path)?);
        }

        if let Some(path) = explicit {
            raw = Self::merge_raw(raw, Self::read(path)?);
        }

        Self::finalize(raw)
    }

    /// Get user config path (`$XDG_CONFIG_HOME/formwork/config.toml`)
    pub fn user_config_path() -> PathBuf {
        formwork_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with FORMWORK_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        match std::env::var("FORMWORK_PROJECT_CONFIG_DIR") {
            Ok(dir) => PathBuf::from(dir).join("config.toml"),
            Err(_) => PathBuf::from(".formwork/config.toml"),
        }
    }

    fn read(path: &Path) -> Result<RawFormworkConfig, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config layer");
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawFormworkConfig, overlay: RawFormworkConfig) -> RawFormworkConfig {
        RawFormworkConfig {
            ui: RawUiConfig {
                start_panel: overlay.ui.start_panel.or(base.ui.start_panel),
            },
            submission: RawSubmissionConfig {
                delay_ms: overlay.submission.delay_ms.or(base.submission.delay_ms),
                success_rate: overlay
                    .submission
                    .success_rate
                    .or(base.submission.success_rate),
            },
            // A rule table is replaced whole, never merged row by row.
            permissions: overlay.permissions.or(base.permissions),
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawFormworkConfig) -> Result<FormworkConfig, ConfigError> {
        let start_panel = raw
            .ui
            .start_panel
            .unwrap_or_else(|| DEFAULT_START_PANEL.to_string());
        let panel: View = start_panel.parse().map_err(ConfigError::StartPanel)?;

        Ok(FormworkConfig {
            ui: UiConfig {
                start_panel: panel.slug().to_string(),
            },
            submission: SubmissionConfig {
                delay_ms: raw.submission.delay_ms.unwrap_or(DEFAULT_DELAY_MS),
                success_rate: raw
                    .submission
                    .success_rate
                    .map_or(DEFAULT_SUCCESS_RATE, |r| r.clamp(0.0, 1.0)),
            },
            permissions: raw.permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::{PermissionKey, PermissionMode, Role};
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        path
    }

    // ==================== Load Tests ====================

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");

        let config = ConfigLoader::load_from(&[missing], None).unwrap();

        assert_eq!(config.ui.start_panel, "home");
        assert_eq!(config.submission.delay_ms, 900);
        assert!(config.permissions.is_none());
    }

    #[test]
    fn test_later_layers_override_earlier_ones() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            "[ui]\nstart_panel = \"team\"\n\n[submission]\ndelay_ms = 100\nsuccess_rate = 0.5\n",
        );
        let project = write(&temp_dir, "project.toml", "[submission]\ndelay_ms = 5\n");

        let config = ConfigLoader::load_from(&[user, project], None).unwrap();

        assert_eq!(config.ui.start_panel, "team");
        assert_eq!(config.submission.delay_ms, 5);
        assert!((config.submission.success_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_explicit_file_goes_last() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(&temp_dir, "project.toml", "[ui]\nstart_panel = \"team\"\n");
        let explicit = write(&temp_dir, "explicit.toml", "[ui]\nstart_panel = \"Workflow\"\n");

        let config = ConfigLoader::load_from(&[project], Some(&explicit)).unwrap();

        assert_eq!(config.ui.start_panel, "workflow");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let result = ConfigLoader::load_from(&[], Some(&missing));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "invalid.toml", "this is not valid toml {{{{");

        let result = ConfigLoader::load_from(&[path], None);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_start_panel_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "config.toml", "[ui]\nstart_panel = \"settings\"\n");

        let result = ConfigLoader::load_from(&[path], None);
        assert!(matches!(result, Err(ConfigError::StartPanel(_))));
    }

    #[test]
    fn test_success_rate_is_clamped() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "config.toml", "[submission]\nsuccess_rate = 4.0\n");

        let config = ConfigLoader::load_from(&[path], None).unwrap();
        assert_eq!(config.submission.success_rate, 1.0);
    }

    #[test]
    fn test_rule_table_replaced_whole() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            r#"
[[permissions]]
key = "BASE_ACCESS"
label = "Basic Access Right"
modes = { admin = "required", editor = "required", viewer = "optional" }

[[permissions]]
key = "EXPORT_DATA"
label = "Data Exportation"
modes = { admin = "optional", editor = "optional", viewer = "forbidden" }
"#,
        );
        let project = write(
            &temp_dir,
            "project.toml",
            r#"
[[permissions]]
key = "BASE_ACCESS"
label = "Basic Access Right"
modes = { admin = "required", editor = "required", viewer = "required" }
"#,
        );

        let config = ConfigLoader::load_from(&[user, project], None).unwrap();
        let rules = config.rules();

        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.mode(PermissionKey::BaseAccess, Role::Viewer),
            Some(PermissionMode::Required)
        );
    }

    // ==================== Merge Tests ====================

    #[test]
    fn test_merge_raw_none_preserves_base() {
        let base = RawFormworkConfig {
            ui: RawUiConfig {
                start_panel: Some("team".to_string()),
            },
            submission: RawSubmissionConfig {
                delay_ms: Some(10),
                success_rate: Some(0.1),
            },
            permissions: None,
        };

        let merged = ConfigLoader::merge_raw(base, RawFormworkConfig::default());

        assert_eq!(merged.ui.start_panel.as_deref(), Some("team"));
        assert_eq!(merged.submission.delay_ms, Some(10));
        assert_eq!(merged.submission.success_rate, Some(0.1));
    }

    // ==================== Path Tests ====================

    #[test]
    fn test_user_config_path_is_under_formwork() {
        let path = ConfigLoader::user_config_path();
        assert!(path.to_string_lossy().contains("formwork"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    #[serial]
    fn test_project_config_path() {
        // SAFETY: serialized with the other env-mutating test
        unsafe { std::env::remove_var("FORMWORK_PROJECT_CONFIG_DIR") };
        assert_eq!(
            ConfigLoader::project_config_path(),
            PathBuf::from(".formwork/config.toml")
        );
    }

    #[test]
    #[serial]
    fn test_project_config_path_env_override() {
        let temp_dir = TempDir::new().unwrap();
        // SAFETY: serialized with the other env-mutating test
        unsafe { std::env::set_var("FORMWORK_PROJECT_CONFIG_DIR", temp_dir.path()) };
        let path = ConfigLoader::project_config_path();
        unsafe { std::env::remove_var("FORMWORK_PROJECT_CONFIG_DIR") };

        assert_eq!(path, temp_dir.path().join("config.toml"));
    }
}
