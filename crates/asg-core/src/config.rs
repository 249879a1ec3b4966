//! asgctl.toml configuration parser.
//!
//! Values are layered lowest to highest: built-in defaults, an optional
//! TOML file, then [`ConfigOverrides`] collected from the environment and
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{AsgError, AsgResult};

/// Upper bound the provider accepts for `MaxRecords`.
pub const MAX_RESULT_LIMIT: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsgConfig {
    /// AWS credential profile.
    pub profile: String,
    pub region: String,
    /// Tag filter key, EC2 filter syntax accepted ("tag:role").
    pub tag_key: String,
    pub tag_value: String,
    /// Instance lifecycle state reported in describe mode.
    pub state_filter: String,
    pub group_name: String,
    /// `MaxRecords` sent with the describe call.
    pub result_limit: i32,
    pub mode: Mode,
    pub missing_fields: MissingFieldPolicy,
    pub on_error: ErrorPolicy,
}

impl Default for AsgConfig {
    fn default() -> Self {
        Self {
            profile: "private".to_string(),
            region: "us-east-1".to_string(),
            tag_key: "tag:role".to_string(),
            tag_value: "etcd".to_string(),
            state_filter: "stopped".to_string(),
            group_name: "GOOD-ASG".to_string(),
            result_limit: 10,
            mode: Mode::ScaleOut,
            missing_fields: MissingFieldPolicy::Abort,
            on_error: ErrorPolicy::Halt,
        }
    }
}

/// Which part of the pipeline runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Fetch and report only.
    Describe,
    /// Fetch, then raise desired capacity by one.
    #[default]
    ScaleOut,
}

/// What the transform does when a required wire field is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFieldPolicy {
    /// Fail the whole transform.
    #[default]
    Abort,
    /// Substitute a sentinel. Identity fields (ARN, name) still abort.
    Default,
}

/// What the run loop does after a group fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failed group.
    #[default]
    Halt,
    /// Record the failure and move on.
    Continue,
}

/// Values supplied by the environment or flags. `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub tag_key: Option<String>,
    pub tag_value: Option<String>,
    pub state_filter: Option<String>,
    pub group_name: Option<String>,
    pub result_limit: Option<i32>,
    pub mode: Option<Mode>,
    pub missing_fields: Option<MissingFieldPolicy>,
    pub on_error: Option<ErrorPolicy>,
}

impl AsgConfig {
    pub fn from_file(path: &Path) -> AsgResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AsgConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> AsgResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> AsgResult<String> {
        toml::to_string_pretty(self).map_err(|e| AsgError::Config(e.to_string()))
    }

    /// Apply overrides on top of this config.
    pub fn with_overrides(mut self, o: ConfigOverrides) -> Self {
        if let Some(v) = o.profile {
            self.profile = v;
        }
        if let Some(v) = o.region {
            self.region = v;
        }
        if let Some(v) = o.tag_key {
            self.tag_key = v;
        }
        if let Some(v) = o.tag_value {
            self.tag_value = v;
        }
        if let Some(v) = o.state_filter {
            self.state_filter = v;
        }
        if let Some(v) = o.group_name {
            self.group_name = v;
        }
        if let Some(v) = o.result_limit {
            self.result_limit = v;
        }
        if let Some(v) = o.mode {
            self.mode = v;
        }
        if let Some(v) = o.missing_fields {
            self.missing_fields = v;
        }
        if let Some(v) = o.on_error {
            self.on_error = v;
        }
        self
    }

    /// Reject configurations that can not produce a valid describe call.
    pub fn validate(&self) -> AsgResult<()> {
        if self.profile.trim().is_empty() {
            return Err(AsgError::Config("profile must not be empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(AsgError::Config("region must not be empty".to_string()));
        }
        if self.group_name.trim().is_empty() {
            return Err(AsgError::Config("group_name must not be empty".to_string()));
        }
        if !(1..=MAX_RESULT_LIMIT).contains(&self.result_limit) {
            return Err(AsgError::Config(format!(
                "result_limit must be between 1 and {MAX_RESULT_LIMIT}, got {}",
                self.result_limit
            )));
        }
        Ok(())
    }

    /// Tag key with any EC2 filter prefix removed ("tag:role" -> "role").
    pub fn tag_filter_key(&self) -> &str {
        self.tag_key.strip_prefix("tag:").unwrap_or(&self.tag_key)
    }
}

// ── String forms (flags and env vars) ──────────────────────────────

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Describe => "describe",
            Mode::ScaleOut => "scale-out",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "describe" => Ok(Mode::Describe),
            "scale-out" | "scale_out" | "scaleout" => Ok(Mode::ScaleOut),
            other => Err(format!("unknown mode: {other} (expected describe or scale-out)")),
        }
    }
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingFieldPolicy::Abort => "abort",
            MissingFieldPolicy::Default => "default",
        })
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(MissingFieldPolicy::Abort),
            "default" => Ok(MissingFieldPolicy::Default),
            other => Err(format!(
                "unknown missing-field policy: {other} (expected abort or default)"
            )),
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorPolicy::Halt => "halt",
            ErrorPolicy::Continue => "continue",
        })
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(ErrorPolicy::Halt),
            "continue" => Ok(ErrorPolicy::Continue),
            other => Err(format!("unknown error policy: {other} (expected halt or continue)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_constants() {
        let config = AsgConfig::default();
        assert_eq!(config.profile, "private");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.group_name, "GOOD-ASG");
        assert_eq!(config.result_limit, 10);
        assert_eq!(config.mode, Mode::ScaleOut);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
group_name = "web-asg"
mode = "describe"
on_error = "continue"
"#;
        let config: AsgConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.group_name, "web-asg");
        assert_eq!(config.mode, Mode::Describe);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
        // Unset keys fall back to defaults.
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region = \"eu-west-1\"\nresult_limit = 25").unwrap();

        let config = AsgConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.result_limit, 25);
    }

    #[test]
    fn test_from_file_missing() {
        let err = AsgConfig::load(Some(Path::new("/nonexistent/asgctl.toml"))).unwrap_err();
        assert!(matches!(err, AsgError::Io(_)));
    }

    #[test]
    fn overrides_take_precedence() {
        let base: AsgConfig = toml::from_str("region = \"eu-west-1\"\nprofile = \"ops\"").unwrap();
        let config = base.with_overrides(ConfigOverrides {
            region: Some("ap-south-1".to_string()),
            missing_fields: Some(MissingFieldPolicy::Default),
            ..Default::default()
        });

        assert_eq!(config.region, "ap-south-1");
        assert_eq!(config.profile, "ops");
        assert_eq!(config.missing_fields, MissingFieldPolicy::Default);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AsgConfig::default();
        config.result_limit = 0;
        assert!(matches!(config.validate(), Err(AsgError::Config(_))));

        config.result_limit = MAX_RESULT_LIMIT + 1;
        assert!(config.validate().is_err());

        let mut config = AsgConfig::default();
        config.group_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn tag_filter_key_strips_prefix() {
        let mut config = AsgConfig::default();
        assert_eq!(config.tag_filter_key(), "role");
        config.tag_key = "team".to_string();
        assert_eq!(config.tag_filter_key(), "team");
    }

    #[test]
    fn enums_parse_from_strings() {
        assert_eq!("scale-out".parse::<Mode>().unwrap(), Mode::ScaleOut);
        assert_eq!("Describe".parse::<Mode>().unwrap(), Mode::Describe);
        assert!("grow".parse::<Mode>().is_err());
        assert_eq!("default".parse::<MissingFieldPolicy>().unwrap(), MissingFieldPolicy::Default);
        assert_eq!("continue".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Continue);
    }

    #[test]
    fn toml_round_trip_keeps_mode() {
        let mut config = AsgConfig::default();
        config.mode = Mode::Describe;
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("mode = \"describe\""));
        let parsed: AsgConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
