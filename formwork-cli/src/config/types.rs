use std::time::Duration;

use formwork_core::{RuleTable, SimulatedSubmitter, default_rules};
use serde::{Deserialize, Serialize};

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawFormworkConfig {
    #[serde(default)]
    pub ui: RawUiConfig,

    #[serde(default)]
    pub submission: RawSubmissionConfig,

    /// Replaces the built-in rule table when present
    pub permissions: Option<RuleTable>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawUiConfig {
    pub start_panel: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSubmissionConfig {
    pub delay_ms: Option<u64>,
    pub success_rate: Option<f64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormworkConfig {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<RuleTable>,
}

impl FormworkConfig {
    /// The configured rule table, or the built-in one.
    pub fn rules(&self) -> RuleTable {
        self.permissions.clone().unwrap_or_else(default_rules)
    }

    pub fn submitter(&self) -> SimulatedSubmitter {
        SimulatedSubmitter::new(
            Duration::from_millis(self.submission.delay_ms),
            self.submission.success_rate,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Panel opened on launch: home, profile, team or workflow
    pub start_panel: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_panel: DEFAULT_START_PANEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Simulated round trip in milliseconds
    pub delay_ms: u64,

    /// Chance that a simulated submission succeeds, 0.0 to 1.0
    pub success_rate: f64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            success_rate: DEFAULT_SUCCESS_RATE,
        }
    }
}

pub const DEFAULT_START_PANEL: &str = "home";
pub const DEFAULT_DELAY_MS: u64 = 900;
pub const DEFAULT_SUCCESS_RATE: f64 = 0.85;

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::{PermissionKey, PermissionMode, Role};

    #[test]
    fn test_default_values() {
        let config = FormworkConfig::default();
        assert_eq!(config.ui.start_panel, "home");
        assert_eq!(config.submission.delay_ms, 900);
        assert!((config.submission.success_rate - 0.85).abs() < f64::EPSILON);
        assert!(config.permissions.is_none());
        assert_eq!(config.rules(), default_rules());
    }

    #[test]
    fn test_raw_config_partial_parsing() {
        let raw: RawFormworkConfig = toml::from_str("[submission]\ndelay_ms = 10\n").unwrap();

        assert_eq!(raw.submission.delay_ms, Some(10));
        assert!(raw.submission.success_rate.is_none());
        assert!(raw.ui.start_panel.is_none());
        assert!(raw.permissions.is_none());
    }

    #[test]
    fn test_raw_config_reads_rule_table() {
        let raw: RawFormworkConfig = toml::from_str(
            r#"
[[permissions]]
key = "EXPORT_DATA"
label = "Data Exportation"
modes = { admin = "required", editor = "optional", viewer = "forbidden" }
"#,
        )
        .unwrap();

        let rules = raw.permissions.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.mode(PermissionKey::ExportData, Role::Admin),
            Some(PermissionMode::Required)
        );
    }

    #[test]
    fn test_rule_table_missing_a_role_is_rejected() {
        let result = toml::from_str::<RawFormworkConfig>(
            r#"
[[permissions]]
key = "EXPORT_DATA"
label = "Data Exportation"
modes = { admin = "required", editor = "optional" }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_submitter_uses_configured_values() {
        let config = FormworkConfig {
            submission: SubmissionConfig {
                delay_ms: 5,
                success_rate: 1.0,
            },
            ..Default::default()
        };
        let submitter = config.submitter();
        assert_eq!(submitter.delay(), Duration::from_millis(5));
        assert_eq!(submitter.success_rate(), 1.0);
    }

    #[test]
    fn test_toml_output_omits_default_rules() {
        let text = toml::to_string_pretty(&FormworkConfig::default()).unwrap();
        assert!(text.contains("[ui]"));
        assert!(text.contains("start_panel = \"home\""));
        assert!(text.contains("delay_ms = 900"));
        assert!(!text.contains("permissions"));
    }
}
